use crate::traits::{validate_key, StorageError, StorageResult};
use crate::StorageBackend;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
///
/// Files are written flat under `base_path` and addressed as `{base_url}/{key}`.
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "./assets")
    /// * `base_url` - Base URL for serving files (e.g., "http://localhost:8091/assets")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }

    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        validate_key(storage_key)?;
        Ok(self.base_path.join(storage_key))
    }

    /// Generate public URL for file
    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    /// Open a new file at its final location for incremental writes.
    ///
    /// The file is created exclusively; an existing entry with the same key is
    /// never overwritten. Until [`PendingFile::finish`] succeeds the returned
    /// handle removes the file when dropped. Create and write failures are
    /// reported as `StorageError::IoError`.
    pub async fn create_pending(&self, storage_key: &str) -> StorageResult<PendingFile> {
        let path = self.key_to_path(storage_key)?;

        let file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;

        Ok(PendingFile {
            file,
            path,
            key: storage_key.to_string(),
            url: self.generate_url(storage_key),
            size: 0,
            started: Instant::now(),
            armed: true,
        })
    }
}

/// A file being written under the storage root.
///
/// Dropping an unfinished `PendingFile` deletes the partial file, so an
/// aborted or cancelled write never leaves a half-written asset behind.
#[derive(Debug)]
pub struct PendingFile {
    file: fs::File,
    path: PathBuf,
    key: String,
    url: String,
    size: u64,
    started: Instant,
    armed: bool,
}

impl PendingFile {
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> StorageResult<()> {
        self.file.write_all(chunk).await?;
        self.size += chunk.len() as u64;
        Ok(())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Flush and sync the file, returning its public URL.
    pub async fn finish(mut self) -> StorageResult<String> {
        self.file.flush().await?;
        self.file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to sync file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        self.armed = false;

        tracing::info!(
            path = %self.path.display(),
            key = %self.key,
            size_bytes = self.size,
            duration_ms = self.started.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(std::mem::take(&mut self.url))
    }
}

impl Drop for PendingFile {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(
                path = %self.path.display(),
                size_bytes = self.size,
                "Removed partially written file"
            ),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                error = %e,
                path = %self.path.display(),
                "Failed to remove partially written file"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn storage(dir: &tempfile::TempDir) -> LocalStorage {
        LocalStorage::new(dir.path(), "http://localhost:8091/assets/".to_string())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn finished_file_is_kept_and_addressable() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir).await;

        let mut pending = storage.create_pending("abc.png").await.unwrap();
        pending.write_chunk(b"hello ").await.unwrap();
        pending.write_chunk(b"world").await.unwrap();
        assert_eq!(pending.size(), 11);
        assert_eq!(pending.key(), "abc.png");
        let url = pending.finish().await.unwrap();

        assert_eq!(url, "http://localhost:8091/assets/abc.png");
        assert_eq!(std::fs::read(dir.path().join("abc.png")).unwrap(), b"hello world");
    }

    #[tokio::test]
    async fn dropped_pending_file_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir).await;

        let mut pending = storage.create_pending("partial.jpg").await.unwrap();
        pending.write_chunk(b"half").await.unwrap();
        assert!(dir.path().join("partial.jpg").exists());
        drop(pending);

        assert!(!dir.path().join("partial.jpg").exists());
    }

    #[tokio::test]
    async fn existing_file_is_never_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir).await;
        std::fs::write(dir.path().join("taken.png"), b"first").unwrap();

        let err = storage.create_pending("taken.png").await.unwrap_err();
        match err {
            StorageError::IoError(e) => assert_eq!(e.kind(), std::io::ErrorKind::AlreadyExists),
            other => panic!("expected an IO error, got {:?}", other),
        }
        assert_eq!(std::fs::read(dir.path().join("taken.png")).unwrap(), b"first");
    }

    #[tokio::test]
    async fn traversal_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir).await;

        let err = storage.create_pending("../escape.png").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
        assert_eq!(storage.backend_type(), StorageBackend::Local);
    }
}
