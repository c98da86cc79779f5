use crate::{
    domain::{MemeSource, PublishTarget},
    errors::CycleError,
    models::{Meme, StatusPost},
    scratch::ScratchFile,
};
use std::{path::PathBuf, sync::Arc, time::Duration};
use tracing::{self, instrument};

/// Delay between two successful posts.
pub const POST_INTERVAL: Duration = Duration::from_secs(2 * 60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotState {
    Idle,
    Publishing,
    Terminated,
}

/// Drives the fetch, stage, publish cycle.
pub struct Orchestrator {
    source: Arc<dyn MemeSource>,
    target: Arc<dyn PublishTarget>,
    scratch_dir: PathBuf,
    state: BotState,
}

impl Orchestrator {
    pub fn new(source: Arc<dyn MemeSource>, target: Arc<dyn PublishTarget>, scratch_dir: PathBuf) -> Self {
        Self {
            source,
            target,
            scratch_dir,
            state: BotState::Idle,
        }
    }

    pub fn state(&self) -> BotState {
        self.state
    }

    /// Posts one meme. Any failure moves the bot to `Terminated`.
    pub async fn run_cycle(&mut self) -> Result<(), CycleError> {
        self.state = BotState::Publishing;
        match self.post_meme().await {
            Ok(()) => {
                self.state = BotState::Idle;
                Ok(())
            }
            Err(e) => {
                self.state = BotState::Terminated;
                Err(e)
            }
        }
    }

    /// Posts forever, sleeping `interval` after each success. Returns the
    /// error of the first cycle that fails.
    pub async fn run(&mut self, interval: Duration) -> CycleError {
        loop {
            if let Err(e) = self.run_cycle().await {
                return e;
            }
            tracing::info!(next_in_secs = interval.as_secs(), "status posted!");
            tokio::time::sleep(interval).await;
        }
    }

    #[instrument(skip(self))]
    async fn post_meme(&self) -> Result<(), CycleError> {
        let meme = self.source.fetch().await?;

        let scratch = ScratchFile::write(&self.scratch_dir, &meme.metadata.image_file_name(), &meme.image_bytes)
            .map_err(CycleError::Stage)?;
        tracing::info!(path = %scratch.path().display(), "fetched meme and wrote it to scratch storage");

        let published = self.publish(&meme, &scratch).await;
        let cleanup = scratch.remove();

        match (published, cleanup) {
            (Err(e), Err(cleanup_err)) => {
                tracing::warn!(error = ?cleanup_err, "Scratch cleanup failed after publish error");
                Err(e)
            }
            (Err(e), Ok(())) => Err(e),
            (Ok(()), Err(cleanup_err)) => Err(CycleError::Cleanup(cleanup_err)),
            (Ok(()), Ok(())) => Ok(()),
        }
    }

    async fn publish(&self, meme: &Meme, scratch: &ScratchFile) -> Result<(), CycleError> {
        let bytes = scratch.read().await.map_err(CycleError::Stage)?;
        let media = self
            .target
            .upload_media(bytes, scratch.upload_name())
            .await
            .map_err(CycleError::Media)?;

        let status = StatusPost::for_meme(&meme.metadata);
        self.target
            .create_status(&status, &media)
            .await
            .map_err(CycleError::Status)?;

        tracing::info!(media_id = %media, post_link = %meme.metadata.post_link, "Meme published");
        Ok(())
    }
}
