//! Storage setup and initialization

use anyhow::Result;
use std::sync::Arc;
use tubely_core::Config;
use tubely_storage::{create_assets_storage, create_object_storage, LocalStorage, Storage};

/// Setup the assets root for thumbnails and the object store for videos.
pub async fn setup_storage(config: &Config) -> Result<(LocalStorage, Arc<dyn Storage>)> {
    tracing::info!("Initializing storage...");

    let assets = create_assets_storage(config).await?;
    tracing::info!(
        backend = %assets.backend_type(),
        path = %assets.base_path().display(),
        "Assets storage initialized"
    );

    let objects = create_object_storage(config).await?;
    tracing::info!(
        backend = %objects.backend_type(),
        bucket = config.s3_bucket().unwrap_or_default(),
        "Object storage initialized"
    );

    Ok((assets, objects))
}
