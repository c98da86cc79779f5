use crate::errors::ConfigError;
use clap::Parser;
use std::{fmt, path::PathBuf};
use url::Url;

pub const DEFAULT_MEME_METADATA_ENDPOINT: &str = "https://meme-api.herokuapp.com/gimme";

/// Posts a random meme to Mastodon every two hours.
///
/// Every option can also be given through the environment (or a `.env` file).
#[derive(Parser, Clone)]
#[command(name = "memebot", version)]
pub struct Config {
    /// Endpoint returning meme metadata as JSON
    #[arg(long, alias = "meme_metadata_endpoint", env = "MEME_METADATA_ENDPOINT", default_value = DEFAULT_MEME_METADATA_ENDPOINT)]
    pub meme_metadata_endpoint: Url,

    /// Base URL of the Mastodon server
    #[arg(long, alias = "mastodon_url", env = "MASTODON_URL")]
    pub mastodon_url: Url,

    /// Access token used as bearer authorization
    #[arg(long, alias = "mastodon_access_token", env = "MASTODON_ACCESS_TOKEN", hide_env_values = true)]
    pub mastodon_access_token: String,

    /// Directory for staging downloaded images [default: OS temp dir]
    #[arg(long, env = "MEMEBOT_SCRATCH_DIR")]
    pub scratch_dir: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from flags and environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignores errors, relies on env vars otherwise)
        dotenvy::dotenv().ok();
        let config = Config::parse();
        config.validate()?;
        Ok(config)
    }

    /// Checks what clap cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, url) in [
            ("meme_metadata_endpoint", &self.meme_metadata_endpoint),
            ("mastodon_url", &self.mastodon_url),
        ] {
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidValue(name, format!("unsupported scheme in {}", url)));
            }
        }
        if self.mastodon_access_token.trim().is_empty() {
            return Err(ConfigError::InvalidValue("mastodon_access_token", "token is empty".into()));
        }
        let dir = self.scratch_dir();
        if !dir.is_dir() {
            return Err(ConfigError::ScratchDir { path: dir, reason: "not a directory".into() });
        }
        Ok(())
    }

    pub fn scratch_dir(&self) -> PathBuf {
        self.scratch_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("meme_metadata_endpoint", &self.meme_metadata_endpoint.as_str())
            .field("mastodon_url", &self.mastodon_url.as_str())
            .field("mastodon_access_token", &"<redacted>")
            .field("scratch_dir", &self.scratch_dir())
            .finish()
    }
}
