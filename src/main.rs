use anyhow::Result;
use axum_timing_filter::{create_filter, create_router, init_tracing, AppConfig};
use std::time::Duration;
use tokio::sync::watch;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env();
    info!(
        "Starting Timing Filter demo v{} with {:?} metrics...",
        env!("CARGO_PKG_VERSION"),
        config.backend
    );

    let filter = create_filter(&config)?;
    let app = create_router(filter.clone());

    info!("Starting at endpoint:{}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    let (signal_tx, mut signal_rx) = watch::channel(false);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = signal_tx.send(true);
    });
    let mut server = tokio::spawn(async move { server.await });

    let grace = Duration::from_secs(AppConfig::shutdown_grace_secs());
    tokio::select! {
        result = &mut server => result??,
        _ = signal_rx.changed() => {
            info!("Shutdown requested, draining for up to {:?}", grace);
            match tokio::time::timeout(grace, &mut server).await {
                Ok(result) => result??,
                Err(_) => tracing::warn!("Requests still in flight after {:?}, stopping anyway", grace),
            }
        }
    }

    // No request reaches the measurement path past this point.
    filter.destroy()?;
    info!("Timing filter destroyed");
    Ok(())
}

async fn shutdown_signal() {
    // ---
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {:?}", err);
        std::future::pending::<()>().await;
    }
}
