//! Task Suggest: HTTP server entry point.

use ts_runner::SimulatedUpstream;
use ts_server::config::{ServerConfig, DEFAULT_LOG_FILTER};
use ts_server::router::build_router;
use ts_server::state::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    info!("Task Suggest {} starting", env!("CARGO_PKG_VERSION"));

    let config = ServerConfig::from_env()?;

    // Compile the built-in catalog before the first request.
    let catalog = ts_classifier::default_catalog();
    info!(
        "Pattern catalog ready: {} tasks, {} patterns",
        catalog.len(),
        catalog.pattern_count()
    );

    let state = AppState::new(SimulatedUpstream::new(config.upstream_failures));
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("Listening on http://{}", config.addr);
    info!("  POST http://{}/suggestTask", config.addr);

    axum::serve(listener, router).await?;

    Ok(())
}
