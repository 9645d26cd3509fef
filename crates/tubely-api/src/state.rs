//! Application state shared by all handlers.

use crate::services::upload::IngestService;
use std::path::PathBuf;

#[derive(Clone)]
pub struct AppState {
    pub uploads: std::sync::Arc<IngestService>,
    /// Directory served under `/assets`.
    pub assets_root: PathBuf,
}
