//! Route configuration and setup

use crate::constants::{API_BASE, ASSETS_PATH, MULTIPART_OVERHEAD_BYTES};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(state: Arc<AppState>) -> Router<()> {
    let settings = state.uploads.settings();
    let thumbnail_limit = settings.max_thumbnail_bytes + MULTIPART_OVERHEAD_BYTES;
    let video_limit = settings.max_video_bytes + MULTIPART_OVERHEAD_BYTES;
    let request_timeout = settings.request_timeout;

    tracing::info!(
        max_thumbnail_bytes = settings.max_thumbnail_bytes,
        max_video_bytes = settings.max_video_bytes,
        timeout_secs = request_timeout.as_secs(),
        "Upload limits configured"
    );

    let api_routes = Router::new()
        .route(
            "/thumbnail_upload/{video_id}",
            post(handlers::thumbnail_upload::upload_thumbnail)
                .layer(DefaultBodyLimit::max(thumbnail_limit)),
        )
        .route(
            "/video_upload/{video_id}",
            post(handlers::video_upload::upload_video).layer(DefaultBodyLimit::max(video_limit)),
        )
        .route("/videos/{video_id}", get(handlers::video_get::get_video));

    Router::new()
        .route("/health", get(handlers::health::liveness_check))
        .nest(API_BASE, api_routes)
        .nest_service(ASSETS_PATH, ServeDir::new(&state.assets_root))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
