use crate::errors::ScratchError;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};

const SCRATCH_PREFIX: &str = "memebot-";

/// A meme image staged on local disk for the length of one publish attempt.
///
/// The file is removed by [`ScratchFile::remove`]. If the guard is dropped
/// without being removed, the file is still deleted, but any error is lost.
#[derive(Debug)]
pub struct ScratchFile {
    file: NamedTempFile,
    upload_name: String,
}

impl ScratchFile {
    /// Writes `bytes` to a uniquely named file in `dir` whose name ends in `upload_name`.
    pub fn write(dir: &Path, upload_name: &str, bytes: &[u8]) -> Result<Self, ScratchError> {
        let suffix = format!("-{}", upload_name);
        let mut file = Builder::new()
            .prefix(SCRATCH_PREFIX)
            .suffix(&suffix)
            .tempfile_in(dir)
            .map_err(|source| ScratchError::Write { path: dir.join(upload_name), source })?;

        file.write_all(bytes)
            .and_then(|_| file.flush())
            .map_err(|source| ScratchError::Write { path: file.path().to_path_buf(), source })?;

        tracing::info!(path = %file.path().display(), bytes = bytes.len(), "Meme written to scratch storage");
        Ok(Self {
            file,
            upload_name: upload_name.to_string(),
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Name the media should be uploaded under.
    pub fn upload_name(&self) -> &str {
        &self.upload_name
    }

    pub async fn read(&self) -> Result<Vec<u8>, ScratchError> {
        tokio::fs::read(self.path())
            .await
            .map_err(|source| ScratchError::Read { path: self.path().to_path_buf(), source })
    }

    /// Deletes the file, reporting failure.
    pub fn remove(self) -> Result<(), ScratchError> {
        let path: PathBuf = self.file.path().to_path_buf();
        self.file
            .close()
            .map_err(|source| ScratchError::Delete { path: path.clone(), source })?;
        tracing::debug!(path = %path.display(), "Scratch file removed");
        Ok(())
    }
}
