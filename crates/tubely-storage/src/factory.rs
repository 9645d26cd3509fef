#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(feature = "storage-s3")]
use crate::S3Storage;
use crate::{Storage, StorageError, StorageResult};
use std::sync::Arc;
use tubely_core::Config;

/// Create the object storage backend video files are committed to.
#[cfg(feature = "storage-s3")]
pub async fn create_object_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let bucket = config
        .s3_bucket()
        .map(String::from)
        .ok_or_else(|| StorageError::ConfigError("S3_BUCKET not configured".to_string()))?;
    let endpoint = config.s3_endpoint().map(String::from);
    // S3-compatible providers ignore the region but the client still needs one.
    let region = match (config.s3_region(), &endpoint) {
        (Some(region), _) => region.to_string(),
        (None, Some(_)) => "us-east-1".to_string(),
        (None, None) => {
            return Err(StorageError::ConfigError(
                "S3_REGION or AWS_REGION not configured".to_string(),
            ))
        }
    };

    let storage = S3Storage::new(bucket, region, endpoint).await?;
    Ok(Arc::new(storage))
}

#[cfg(not(feature = "storage-s3"))]
pub async fn create_object_storage(_config: &Config) -> StorageResult<Arc<dyn Storage>> {
    Err(StorageError::ConfigError(
        "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
    ))
}

/// Create the local storage rooted at the assets directory.
///
/// Files are addressed as `{assets_base_url}/assets/{key}`.
#[cfg(feature = "storage-local")]
pub async fn create_assets_storage(config: &Config) -> StorageResult<LocalStorage> {
    let base_url = format!("{}/assets", config.assets_base_url.trim_end_matches('/'));
    LocalStorage::new(config.assets_root.clone(), base_url).await
}
