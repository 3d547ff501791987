use axum::response::IntoResponse;

pub async fn root_handler() -> impl IntoResponse {
    let version = env!("CARGO_PKG_VERSION");
    format!(
        r#"Welcome to the Timing Filter demo 👋
Version: {version}

Available endpoints:
  - GET /myApp/users                    - Sample endpoint (200)
  - GET /myApp/missing                  - Sample endpoint (404)
  - GET /myApp/slow?ms=N                - Sample endpoint sleeping N ms
  - GET /myApp/boom                     - Sample endpoint (500)
  - GET /metrics                        - All metrics as text
  - GET /metrics/names                  - Published metric names
  - GET /metrics/lookup?name=<metric>   - One metric as JSON
  - GET /health                         - Registry health

Requests are timed per endpoint and response code, subject to the
configured context whitelist/blacklist.
"#
    )
}
