use crate::error::HttpAppError;
use crate::handlers::parse_video_id;
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::{HeaderMap, StatusCode},
};
use std::sync::Arc;
use tubely_core::UploadClass;

/// `POST /api/video_upload/{video_id}`
///
/// Multipart field `video` (`video/mp4`). Responds 200 with an empty body;
/// the record's `video_url` is set as a side effect.
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<StatusCode, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;

    state
        .uploads
        .ingest(UploadClass::Video, video_id, &headers, multipart)
        .await?;

    Ok(StatusCode::OK)
}
