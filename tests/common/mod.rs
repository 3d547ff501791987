// Test helpers are intentionally partially used
#![allow(dead_code)]

use axum_timing_filter::domain::KeySource;
use axum_timing_filter::{
    create_filter, create_router, AppConfig, FilterConfig, MetricsBackend, TimingFilter,
};
use reqwest::Client;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::sleep;

// ============================================================================
// Test Setup
// ============================================================================

/// Application config with the given filter settings, independent of env.
pub fn test_config(backend: MetricsBackend, contexts: &str, whitelist: bool) -> AppConfig {
    // ---
    AppConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        backend,
        prefix: "metrics".to_string(),
        key_source: KeySource::RequestUri,
        filter: FilterConfig {
            contexts: axum_timing_filter::parse_contexts(contexts),
            whitelist,
        },
    }
}

/// Name under which the registry backend publishes `(uri, status)`.
pub fn metric_name(uri: &str, status: u16) -> String {
    // ---
    format!("metrics.{uri}.responseCode.{status}")
}

pub struct TestServer {
    pub addr: std::net::SocketAddr,
    pub client: Client,
    pub filter: TimingFilter,
}

impl TestServer {
    // ---
    pub async fn new(config: AppConfig) -> Self {
        // --

        // Enable debug logging only when requested
        if std::env::var("TEST_DEBUG").is_ok() {
            std::env::set_var("RUST_LOG", "debug");
            axum_timing_filter::init_tracing();
        }

        let filter = create_filter(&config).expect("Should be able to create filter");
        let app = create_router(filter.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Spawn the server in the background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start
        sleep(Duration::from_millis(100)).await;

        let client = Client::new();

        Self {
            addr,
            client,
            filter,
        }
    }

    pub fn url(&self, path: &str) -> String {
        // ---
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        // ---
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send request")
    }
}
