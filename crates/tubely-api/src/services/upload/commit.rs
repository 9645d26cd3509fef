//! Storage committers
//!
//! A committer is chosen per upload class. It opens the staging target for a
//! generated name and later turns the staged bytes into a stored reference.

use std::path::PathBuf;
use std::sync::Arc;
use tubely_core::AppError;
use tubely_storage::{LocalStorage, Storage};

use super::staging::{staging_error, SpooledFile, StagedObject};
use super::types::AcceptedMedia;
use crate::error::storage_error_to_app;

#[derive(Clone)]
pub enum Committer {
    /// Writes in place under the assets root; committing closes the file.
    Filesystem(LocalStorage),
    /// Spools to a temp file, then puts the whole body under the key.
    ObjectStorage {
        storage: Arc<dyn Storage>,
        staging_dir: Option<PathBuf>,
    },
}

impl Committer {
    pub fn kind(&self) -> &'static str {
        match self {
            Committer::Filesystem(_) => "filesystem",
            Committer::ObjectStorage { .. } => "object_storage",
        }
    }

    /// Open the staging target for `name`.
    pub async fn open(&self, name: &str) -> Result<StagedObject, AppError> {
        match self {
            Committer::Filesystem(storage) => storage
                .create_pending(name)
                .await
                .map(StagedObject::InPlace)
                .map_err(|e| staging_error("Couldn't create file", e)),
            Committer::ObjectStorage { staging_dir, .. } => {
                SpooledFile::create(staging_dir.as_deref())
                    .await
                    .map(StagedObject::Spooled)
            }
        }
    }

    /// Commit staged bytes and return the stored reference.
    ///
    /// The staged object is consumed; spooled bytes are removed whether or
    /// not the put succeeds.
    pub async fn commit(
        &self,
        staged: StagedObject,
        name: &str,
        media: &AcceptedMedia,
    ) -> Result<String, AppError> {
        match (self, staged) {
            (Committer::Filesystem(_), StagedObject::InPlace(pending)) => {
                pending.finish().await.map_err(storage_error_to_app)
            }
            (Committer::ObjectStorage { storage, .. }, StagedObject::Spooled(mut spooled)) => {
                let data = spooled.read_all().await?;
                let url = storage
                    .upload_with_key(name, data, media.content_type)
                    .await
                    .map_err(|e| match e {
                        tubely_storage::StorageError::IoError(err) => {
                            AppError::StorageUpload(err.to_string())
                        }
                        other => storage_error_to_app(other),
                    })?;
                drop(spooled);
                Ok(url)
            }
            _ => Err(AppError::Internal(
                "Staged object does not belong to this committer".to_string(),
            )),
        }
    }
}
