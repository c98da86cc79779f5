use crate::errors::{PublishError, SourceError};
use crate::models::{MediaHandle, Meme, StatusPost};
use async_trait::async_trait;

/// Somewhere memes come from.
#[async_trait]
pub trait MemeSource: Send + Sync + 'static { // Send+Sync+'static required for Arc<dyn>
    /// Fetches the metadata for one meme and downloads its image.
    async fn fetch(&self) -> Result<Meme, SourceError>;
}

/// Somewhere memes are published to.
#[async_trait]
pub trait PublishTarget: Send + Sync + 'static {
    /// Uploads image bytes as media. `suggested_name` may carry a directory
    /// prefix; only the final component is sent.
    async fn upload_media(&self, bytes: Vec<u8>, suggested_name: &str) -> Result<MediaHandle, PublishError>;

    /// Creates a status with the given media attached.
    async fn create_status(&self, status: &StatusPost, media: &MediaHandle) -> Result<(), PublishError>;
}
