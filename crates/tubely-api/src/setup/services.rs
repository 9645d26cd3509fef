//! Service wiring

use crate::auth::{IdentityVerifier, JwtVerifier};
use crate::services::upload::{Committer, IngestService, UploadSettings};
use crate::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;
use tubely_core::Config;
use tubely_db::{VideoRepository, VideoStore};
use tubely_storage::{LocalStorage, Storage};

/// Build the application state from configuration and connected backends.
pub fn initialize_services(
    config: &Config,
    pool: PgPool,
    assets: LocalStorage,
    objects: Arc<dyn Storage>,
) -> Arc<AppState> {
    let verifier: Arc<dyn IdentityVerifier> =
        Arc::new(JwtVerifier::new(config.jwt_secret(), config.jwt_issuer()));
    let videos: Arc<dyn VideoStore> = Arc::new(VideoRepository::new(pool));

    build_state(
        verifier,
        videos,
        assets,
        objects,
        UploadSettings::from_config(config),
    )
}

/// Assemble the application state from its collaborators.
pub fn build_state(
    verifier: Arc<dyn IdentityVerifier>,
    videos: Arc<dyn VideoStore>,
    assets: LocalStorage,
    objects: Arc<dyn Storage>,
    settings: UploadSettings,
) -> Arc<AppState> {
    let assets_root = assets.base_path().to_path_buf();
    let video_files = Committer::ObjectStorage {
        storage: objects,
        staging_dir: settings.staging_dir.clone(),
    };
    let uploads = IngestService::new(
        verifier,
        videos,
        Committer::Filesystem(assets),
        video_files,
        settings,
    );

    Arc::new(AppState {
        uploads: Arc::new(uploads),
        assets_root,
    })
}
