use super::guard::MeasureGuard;
use super::request::RequestInfo;
use super::timing::TimingFilter;
use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http_body_util::BodyExt;

/// Axum middleware running every request through the [`TimingFilter`].
///
/// Use with `axum::middleware::from_fn_with_state`:
/// ```ignore
/// Router::new()
///     .route("/myApp/users", get(handler))
///     .layer(axum::middleware::from_fn_with_state(filter.clone(), track_timing))
/// ```
///
/// The sample covers the handler and the response body: timing ends once
/// the body has been fully sent, or when it is dropped early. A handler
/// that panics, or a client that disconnects mid-request, still produces a
/// sample because the filter measures on drop.
pub async fn track_timing(
    State(filter): State<TimingFilter>,
    request: Request,
    next: Next,
) -> Response {
    // ---
    let info = RequestInfo::from_request(&request);
    tracing::debug!(
        "Filtering request with context [{}] and path [{}]",
        info.context_path(),
        info.endpoint_path()
    );

    if !filter.decide(&info) {
        return next.run(request).await;
    }

    let mut guard = filter.measure(&info);
    let response = next.run(request).await;
    guard.set_status(response.status().as_u16());

    let (parts, body) = response.into_parts();
    Response::from_parts(parts, timed_body(body, guard))
}

/// Keeps `guard` alive until the body yields its trailers or is dropped.
fn timed_body(body: Body, guard: MeasureGuard) -> Body {
    // ---
    let mut guard = Some(guard);
    Body::new(body.map_frame(move |frame| {
        if frame.is_trailers() {
            guard.take();
        }
        frame
    }))
}
