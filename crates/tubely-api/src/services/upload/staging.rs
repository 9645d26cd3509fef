//! Staging of upload bodies
//!
//! Thumbnails are written straight to their final path as a `PendingFile`;
//! videos are spooled to a private temp file so the committer can rewind and
//! read them in full. Both kinds remove their bytes when dropped uncommitted,
//! which covers error returns as well as cancelled request futures.

use bytes::Bytes;
use std::path::{Path, PathBuf};
use tempfile::TempPath;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tubely_core::AppError;
use tubely_storage::{PendingFile, StorageError};

use crate::error::storage_error_to_app;

const SPOOL_PREFIX: &str = "tubely-upload";
const SPOOL_SUFFIX: &str = ".mp4";

/// Bytes written but not yet committed to their final address.
#[derive(Debug)]
pub enum StagedObject {
    /// Written in place under the assets root.
    InPlace(PendingFile),
    /// Spooled to a private temp file awaiting upload.
    Spooled(SpooledFile),
}

impl StagedObject {
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), AppError> {
        match self {
            StagedObject::InPlace(file) => file
                .write_chunk(chunk)
                .await
                .map_err(|e| staging_error("Couldn't write file", e)),
            StagedObject::Spooled(file) => file.write_chunk(chunk).await,
        }
    }

    pub fn size(&self) -> u64 {
        match self {
            StagedObject::InPlace(file) => file.size(),
            StagedObject::Spooled(file) => file.size(),
        }
    }
}

/// Failures while staging are IO errors; anything else keeps its storage mapping.
pub(crate) fn staging_error(context: &str, err: StorageError) -> AppError {
    match err {
        StorageError::IoError(source) => AppError::io(context, source),
        other => storage_error_to_app(other),
    }
}

/// A temp file holding a complete upload body.
///
/// The file is deleted when the handle is dropped; a failed deletion is
/// logged and otherwise ignored.
#[derive(Debug)]
pub struct SpooledFile {
    file: File,
    path: Option<TempPath>,
    size: u64,
}

impl SpooledFile {
    pub async fn create(dir: Option<&Path>) -> Result<Self, AppError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(SPOOL_PREFIX).suffix(SPOOL_SUFFIX);

        let named = match dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(|e| AppError::io("Couldn't create temp file", e))?;

        let (file, path) = named.into_parts();
        tracing::debug!(path = %path.display(), "Spooling upload to temp file");

        Ok(Self {
            file: File::from_std(file),
            path: Some(path),
            size: 0,
        })
    }

    pub async fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), AppError> {
        self.file
            .write_all(chunk)
            .await
            .map_err(|e| AppError::io("Couldn't write temp file", e))?;
        self.size += chunk.len() as u64;
        Ok(())
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn path(&self) -> Option<PathBuf> {
        self.path.as_ref().map(|p| p.to_path_buf())
    }

    /// Rewind to the start and read the whole spooled body.
    pub async fn read_all(&mut self) -> Result<Bytes, AppError> {
        self.file
            .flush()
            .await
            .map_err(|e| AppError::io("Couldn't flush temp file", e))?;
        self.file
            .seek(std::io::SeekFrom::Start(0))
            .await
            .map_err(|e| AppError::io("Couldn't rewind temp file", e))?;

        let mut data = Vec::with_capacity(self.size as usize);
        self.file
            .read_to_end(&mut data)
            .await
            .map_err(|e| AppError::io("Couldn't read temp file", e))?;

        if data.len() as u64 != self.size {
            return Err(AppError::io(
                "Temp file changed while spooled",
                std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    format!("expected {} bytes, read {}", self.size, data.len()),
                ),
            ));
        }

        Ok(Bytes::from(data))
    }
}

impl Drop for SpooledFile {
    fn drop(&mut self) {
        let Some(path) = self.path.take() else {
            return;
        };
        let shown = path.display().to_string();
        match path.close() {
            Ok(()) => tracing::debug!(path = %shown, "Removed spooled upload"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                error = %e,
                path = %shown,
                "Failed to remove spooled upload"
            ),
        }
    }
}
