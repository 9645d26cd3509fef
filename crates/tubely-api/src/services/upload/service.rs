//! Upload ingestion service
//!
//! Runs one request through the ingestion state machine exactly once. Every
//! failure is terminal; nothing is retried.

use std::sync::Arc;

use axum::extract::multipart::{Field, Multipart, MultipartRejection};
use axum::http::HeaderMap;
use tracing::Instrument;
use tubely_core::{models::Video, AppError, UploadClass};
use tubely_db::VideoStore;
use uuid::Uuid;

use super::commit::Committer;
use super::naming::generate_name;
use super::staging::StagedObject;
use super::types::{AcceptedMedia, IngestStage, UploadSettings};
use super::validator::validate_media;
use crate::auth::IdentityVerifier;
use crate::error::{multipart_error_to_app, multipart_rejection_to_app};

/// Attaches thumbnails and video files to video records.
pub struct IngestService {
    verifier: Arc<dyn IdentityVerifier>,
    videos: Arc<dyn VideoStore>,
    thumbnails: Committer,
    video_files: Committer,
    settings: UploadSettings,
}

impl IngestService {
    pub fn new(
        verifier: Arc<dyn IdentityVerifier>,
        videos: Arc<dyn VideoStore>,
        thumbnails: Committer,
        video_files: Committer,
        settings: UploadSettings,
    ) -> Self {
        Self {
            verifier,
            videos,
            thumbnails,
            video_files,
            settings,
        }
    }

    pub fn settings(&self) -> &UploadSettings {
        &self.settings
    }

    fn committer(&self, class: UploadClass) -> &Committer {
        match class {
            UploadClass::Thumbnail => &self.thumbnails,
            UploadClass::Video => &self.video_files,
        }
    }

    /// Authenticate the caller and load a video they own.
    ///
    /// The credential is checked before the record store is touched.
    pub async fn load_owned(&self, headers: &HeaderMap, video_id: Uuid) -> Result<Video, AppError> {
        let identity = self.verifier.verify(headers)?;
        self.fetch_owned(video_id, identity.user_id).await
    }

    async fn fetch_owned(&self, video_id: Uuid, user_id: Uuid) -> Result<Video, AppError> {
        let video = self
            .videos
            .fetch(video_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Couldn't find video".to_string()))?;

        if !video.is_owned_by(user_id) {
            tracing::warn!(
                video_id = %video_id,
                user_id = %user_id,
                "Upload attempted by non-owner"
            );
            return Err(AppError::Forbidden("Not permitted".to_string()));
        }

        Ok(video)
    }

    /// Ingest the file part of `multipart` into the record `video_id`.
    ///
    /// The multipart body is not read until the caller has been
    /// authenticated and its ownership of the record confirmed.
    pub async fn ingest(
        &self,
        class: UploadClass,
        video_id: Uuid,
        headers: &HeaderMap,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<Video, AppError> {
        let span = tracing::info_span!("ingest_upload", video_id = %video_id, class = %class);
        async move {
            let mut stage = IngestStage::Authenticating;
            let result = self
                .run(class, video_id, headers, multipart, &mut stage)
                .await;
            match &result {
                Ok(video) => tracing::info!(
                    thumbnail_url = ?video.thumbnail_url,
                    video_url = ?video.video_url,
                    "Upload ingested"
                ),
                Err(e) => tracing::info!(stage = %stage, error = %e, "Upload rejected"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run(
        &self,
        class: UploadClass,
        video_id: Uuid,
        headers: &HeaderMap,
        multipart: Result<Multipart, MultipartRejection>,
        stage: &mut IngestStage,
    ) -> Result<Video, AppError> {
        let identity = self.verifier.verify(headers)?;

        advance(stage, IngestStage::Authorizing);
        let mut video = self.fetch_owned(video_id, identity.user_id).await?;

        advance(stage, IngestStage::Validating);
        let mut multipart = multipart.map_err(multipart_rejection_to_app)?;
        let (media, name, staged) = self.stage_file(&mut multipart, class, stage).await?;
        let committer = self.committer(class);
        let size_bytes = staged.size();

        advance(stage, IngestStage::Committing);
        let reference = committer.commit(staged, &name, &media).await?;
        tracing::debug!(
            backend = committer.kind(),
            name = %name,
            size_bytes,
            content_type = media.content_type,
            "Upload committed"
        );

        advance(stage, IngestStage::Persisting);
        match class {
            UploadClass::Thumbnail => video.thumbnail_url = Some(reference.clone()),
            UploadClass::Video => video.video_url = Some(reference.clone()),
        }
        let updated = self.videos.update(&video).await.map_err(|e| {
            tracing::warn!(
                reference = %reference,
                error = %e,
                "Stored object is orphaned: record update failed"
            );
            e
        })?;

        advance(stage, IngestStage::Done);
        Ok(updated)
    }

    /// Validate the file part named after `class`, then name and stage it.
    /// Other parts are skipped.
    async fn stage_file(
        &self,
        multipart: &mut Multipart,
        class: UploadClass,
        stage: &mut IngestStage,
    ) -> Result<(AcceptedMedia, String, StagedObject), AppError> {
        loop {
            let Some(mut field) = multipart.next_field().await.map_err(multipart_error_to_app)?
            else {
                return Err(AppError::BadRequest(format!(
                    "Unable to parse form file: missing '{}' field",
                    class.field_name()
                )));
            };
            if field.name() != Some(class.field_name()) {
                continue;
            }

            let media = validate_media(field.content_type(), class)?;

            advance(stage, IngestStage::Staging);
            let name = generate_name(&media)?;
            let mut staged = self.committer(class).open(&name).await?;
            // `staged` removes its bytes if this future errors or is dropped.
            copy_field(&mut field, &mut staged, self.settings.max_file_bytes(class)).await?;

            return Ok((media, name, staged));
        }
    }
}

fn advance(stage: &mut IngestStage, next: IngestStage) {
    tracing::debug!(from = %stage, to = %next, "Ingest stage transition");
    *stage = next;
}

async fn copy_field(
    field: &mut Field<'_>,
    staged: &mut StagedObject,
    max_bytes: usize,
) -> Result<(), AppError> {
    while let Some(chunk) = field.chunk().await.map_err(multipart_error_to_app)? {
        if staged.size() + chunk.len() as u64 > max_bytes as u64 {
            return Err(AppError::PayloadTooLarge(format!(
                "File exceeds the {} byte limit",
                max_bytes
            )));
        }
        staged.write_chunk(&chunk).await?;
    }
    Ok(())
}
