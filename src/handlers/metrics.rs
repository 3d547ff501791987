use crate::app_state::AppState;
use crate::domain::TimerSnapshot;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

/// Handler for the `/metrics` endpoint.
///
/// Returns the registry rendered as text for scraping. The format depends
/// on the backend in AppState: one summary line per metric for the
/// in-process registry, Prometheus exposition text for `prom`, nothing for
/// no-op.
#[tracing::instrument(skip(app_state))]
pub async fn metrics_handler(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, StatusCode> {
    // ---

    let metrics_text = app_state.metrics().render();

    Ok((
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        metrics_text,
    ))
}

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    name: String,
}

#[derive(Serialize)]
pub struct LookupResponse {
    name: String,
    timer: TimerSnapshot,
}

/// Handler for `/metrics/lookup?name=...`.
///
/// Returns one aggregate by its published name, e.g.
/// `axum_timing_filter.TimingFilter./myApp/users.responseCode.200`.
///
/// - `200 OK` with `{ "name": ..., "timer": { "count": ..., ... } }` when found.
/// - `404 Not Found` when no such metric exists or the backend does not
///   support lookups.
#[tracing::instrument(skip(app_state))]
pub async fn metric_lookup_handler(
    State(app_state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<LookupResponse>, StatusCode> {
    // ---
    let timer = app_state
        .metrics()
        .snapshot(&query.name)
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(LookupResponse {
        name: query.name,
        timer,
    }))
}

/// Handler for `/metrics/names`: every published metric name as JSON.
#[tracing::instrument(skip(app_state))]
pub async fn metric_names_handler(State(app_state): State<AppState>) -> Json<Vec<String>> {
    // ---
    Json(app_state.metrics().names())
}
