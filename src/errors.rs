use std::path::PathBuf;
use thiserror::Error;

// --- Meme source errors ---

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("error fetching meme metadata from {url}: {reason}")]
    MetadataFetch { url: String, reason: String },

    #[error("error parsing meme metadata from {url}: {reason}")]
    MetadataParse { url: String, reason: String },

    #[error("error fetching meme image from {url}: {reason}")]
    ImageFetch { url: String, reason: String },

    #[error("error reading meme image body from {url}")]
    ImageRead {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

// --- Scratch storage errors ---

#[derive(Error, Debug)]
pub enum ScratchError {
    #[error("error writing scratch file {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error reading scratch file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error removing scratch file {}", .path.display())]
    Delete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// --- Publish target errors ---

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("media upload to {url} failed: {reason}")]
    MediaUpload { url: String, reason: String },

    #[error("status publish to {url} failed: {reason}")]
    StatusPublish { url: String, reason: String },
}

// --- Cycle level error ---

/// Error ending a publish cycle, carrying the step that failed.
///
/// The message names the step only; the cause is reachable through `source()`.
#[derive(Error, Debug)]
pub enum CycleError {
    #[error("could not fetch meme")]
    Fetch(#[source] SourceError),

    #[error("error staging meme")]
    Stage(#[source] ScratchError),

    #[error("error publishing media")]
    Media(#[source] PublishError),

    #[error("error publishing status")]
    Status(#[source] PublishError),

    #[error("error cleaning up scratch file")]
    Cleanup(#[source] ScratchError),
}

impl From<SourceError> for CycleError {
    fn from(err: SourceError) -> Self {
        CycleError::Fetch(err)
    }
}

// --- Configuration errors ---

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
    #[error("Scratch directory {} is not usable: {reason}", .path.display())]
    ScratchDir { path: PathBuf, reason: String },
}
