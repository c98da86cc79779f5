use anyhow::Context;
use memebot::config::Config;
use memebot::orchestrator::POST_INTERVAL;
use memebot::startup::{build_orchestrator, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    tracing::info!("starting up...");

    // --- Configuration ---
    let config = Config::load().context("Failed to load configuration")?;
    tracing::debug!(?config, "Configuration loaded");

    let mut orchestrator = build_orchestrator(&config).context("Failed to build HTTP client")?;

    // Only returns once a cycle has failed.
    let err = anyhow::Error::from(orchestrator.run(POST_INTERVAL).await);
    tracing::error!("Publish cycle failed, shutting down: {:#}", err);
    Err(err)
}
