use crate::error::HttpAppError;
use crate::handlers::parse_video_id;
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::HeaderMap,
    Json,
};
use std::sync::Arc;
use tubely_core::{models::VideoResponse, UploadClass};

/// `POST /api/thumbnail_upload/{video_id}`
///
/// Multipart field `thumbnail` (`image/jpeg` or `image/png`). Responds with
/// the updated video record.
pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<VideoResponse>, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;

    let video = state
        .uploads
        .ingest(UploadClass::Thumbnail, video_id, &headers, multipart)
        .await?;

    Ok(Json(VideoResponse::from(video)))
}
