pub mod auth;
pub mod fixtures;
pub mod storage;
pub mod store;

use axum_test::TestServer;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tubely_api::auth::JwtVerifier;
use tubely_api::setup::{routes::setup_routes, services::build_state};
use tubely_api::state::AppState;
use tubely_api::UploadSettings;
use tubely_storage::LocalStorage;

use self::auth::{TEST_ISSUER, TEST_JWT_SECRET};
use self::storage::MockStorage;
use self::store::InMemoryVideoStore;

/// Test application state
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub store: Arc<InMemoryVideoStore>,
    pub objects: Arc<MockStorage>,
    pub assets: LocalStorage,
    pub assets_dir: TempDir,
    pub staging_dir: TempDir,
}

impl TestApp {
    /// Get the HTTP test client
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Number of files currently under the assets root.
    pub fn asset_count(&self) -> usize {
        std::fs::read_dir(self.assets_dir.path()).unwrap().count()
    }

    /// Number of spooled video files left in the staging directory.
    pub fn staged_count(&self) -> usize {
        std::fs::read_dir(self.staging_dir.path()).unwrap().count()
    }
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with_limits(1024 * 1024, 4 * 1024 * 1024).await
}

/// Build the real router over in-memory collaborators and temp directories.
pub async fn setup_test_app_with_limits(max_thumbnail_bytes: usize, max_video_bytes: usize) -> TestApp {
    let assets_dir = tempfile::tempdir().unwrap();
    let staging_dir = tempfile::tempdir().unwrap();

    let assets = LocalStorage::new(
        assets_dir.path(),
        "http://localhost:8091/assets".to_string(),
    )
    .await
    .unwrap();
    let store = Arc::new(InMemoryVideoStore::default());
    let objects = Arc::new(MockStorage::default());

    let settings = UploadSettings {
        max_thumbnail_bytes,
        max_video_bytes,
        staging_dir: Some(staging_dir.path().to_path_buf()),
        request_timeout: Duration::from_secs(30),
    };

    let state = build_state(
        Arc::new(JwtVerifier::new(TEST_JWT_SECRET, TEST_ISSUER)),
        store.clone(),
        assets.clone(),
        objects.clone(),
        settings,
    );
    let server = TestServer::new(setup_routes(state.clone())).expect("Failed to create test server");

    TestApp {
        server,
        state,
        store,
        objects,
        assets,
        assets_dir,
        staging_dir,
    }
}
