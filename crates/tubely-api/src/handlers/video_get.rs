use crate::error::HttpAppError;
use crate::handlers::parse_video_id;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use std::sync::Arc;
use tubely_core::models::VideoResponse;

/// `GET /api/videos/{video_id}`: the caller's own video record.
pub async fn get_video(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<VideoResponse>, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;
    let video = state.uploads.load_owned(&headers, video_id).await?;
    Ok(Json(VideoResponse::from(video)))
}
