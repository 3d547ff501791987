use axum::{extract::Query, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound for `/myApp/slow`, to keep the demo from parking tasks forever.
const MAX_DELAY_MS: u64 = 10_000;

#[derive(Debug, Serialize)]
pub struct User {
    id: u32,
    name: &'static str,
}

/// Sample endpoint returning a fixed user list.
#[tracing::instrument]
pub async fn list_users() -> Json<Vec<User>> {
    // ---
    Json(vec![
        User { id: 1, name: "ada" },
        User { id: 2, name: "grace" },
    ])
}

/// Sample endpoint that always answers `404 Not Found`.
#[tracing::instrument]
pub async fn missing() -> StatusCode {
    StatusCode::NOT_FOUND
}

#[derive(Debug, Deserialize)]
pub struct SlowQuery {
    ms: Option<u64>,
}

/// Sample endpoint sleeping `?ms=` milliseconds (default 100) before `200 OK`.
#[tracing::instrument]
pub async fn slow(Query(query): Query<SlowQuery>) -> StatusCode {
    // ---
    let delay = query.ms.unwrap_or(100).min(MAX_DELAY_MS);
    tokio::time::sleep(Duration::from_millis(delay)).await;
    StatusCode::OK
}

/// Sample endpoint failing with `500 Internal Server Error`.
#[tracing::instrument]
pub async fn boom() -> StatusCode {
    // ---
    tracing::error!("Demo endpoint failed on purpose");
    StatusCode::INTERNAL_SERVER_ERROR
}
