use crate::config::Config;
use crate::mastodon::MastodonClient;
use crate::meme_source::HttpMemeSource;
use crate::orchestrator::Orchestrator;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initializes tracing (logging), honouring `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "memebot=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wires the HTTP clients and the orchestrator from configuration.
pub fn build_orchestrator(config: &Config) -> Result<Orchestrator, reqwest::Error> {
    // One pooled client for both the meme source and the publish target.
    let http = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;

    tracing::info!("Startup: Initializing meme source and publish target...");
    let source = HttpMemeSource::new(http.clone(), config.meme_metadata_endpoint.clone());
    let target = MastodonClient::new(http, &config.mastodon_url, config.mastodon_access_token.clone());

    let scratch_dir = config.scratch_dir();
    tracing::info!(scratch_dir = %scratch_dir.display(), "Startup: Using scratch directory");
    Ok(Orchestrator::new(Arc::new(source), Arc::new(target), scratch_dir))
}
