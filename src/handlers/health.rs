use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};

#[derive(serde::Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

/// Responds with the health status of the server.
///
/// # Responses
/// - `200 OK` with `{ "status": "ok" }` while the metrics registry is running.
/// - `503 SERVICE UNAVAILABLE` with `{ "status": "stopped" }` once the
///   registry has been closed by `TimingFilter::destroy`.
#[tracing::instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    // ---
    if state.metrics().is_closed() {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse { status: "stopped" }),
        )
    } else {
        (StatusCode::OK, Json(HealthResponse { status: "ok" }))
    }
}
