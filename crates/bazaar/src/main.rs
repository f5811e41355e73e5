//! # Bazaar server
//!
//! 1. Load [`BazaarConfig`] (defaults, `BAZAAR_CONFIG` file, environment)
//! 2. Install tracing
//! 3. Start the [`MarketSystem`] actors
//! 4. Serve the HTTP API until Ctrl-C, then stop the actors

use bazaar::config::BazaarConfig;
use bazaar::http::{self, AppState};
use bazaar::lifecycle::MarketSystem;
use bazaar_actor::tracing::setup_tracing;
use tracing::{error, info};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Cannot listen for Ctrl-C; serving until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = BazaarConfig::load().map_err(|e| e.to_string())?;

    // Setup tracing once for the entire application
    setup_tracing(&config.log_filter);
    info!(?config, "Starting bazaar");

    let system = MarketSystem::new(&config);
    let app = http::router(AppState::new(&system));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .map_err(|e| format!("cannot bind {}: {e}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "Listening");

    // The router, and its client clones, are dropped when serve returns
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| e.to_string())?;

    system.shutdown().await?;

    info!("Bazaar stopped");
    Ok(())
}
