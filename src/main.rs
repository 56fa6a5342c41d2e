//! Rover Scout Game Server
//!
//! Serves the authoritative game state to the browser client.

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use rover_scout::{
    network::server::{GameServer, ServerConfig},
    HAZARD_INTERVAL_MS, VERSION,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let default_level = if cfg!(feature = "debug-tracing") { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    info!("Rover Scout Server v{}", VERSION);

    let config = ServerConfig::from_env();
    if config.hazard_interval.as_millis() != u128::from(HAZARD_INTERVAL_MS) {
        warn!("Hazard interval overridden to {:?}", config.hazard_interval);
    }

    let server = GameServer::new(config);

    let shutdown = server.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown.send(());
        }
    });

    server.run().await.context("game server stopped")?;
    info!("Server stopped");
    Ok(())
}
