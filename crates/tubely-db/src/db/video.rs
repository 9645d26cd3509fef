use chrono::Utc;
use sqlx::{PgPool, Postgres};
use tubely_core::{models::Video, AppError};
use uuid::Uuid;

/// Record store operations the upload pipeline depends on.
///
/// Writes are last-write-wins; callers enforce ordering by fetching and
/// checking ownership before they update.
#[async_trait::async_trait]
pub trait VideoStore: Send + Sync {
    /// Fetch a video by ID. `Ok(None)` when no such record exists.
    async fn fetch(&self, id: Uuid) -> Result<Option<Video>, AppError>;

    /// Persist the mutable fields of `video` and return the stored record.
    /// The owning user is never rewritten.
    async fn update(&self, video: &Video) -> Result<Video, AppError>;
}

/// Repository for video records
#[derive(Clone)]
pub struct VideoRepository {
    pool: PgPool,
}

impl VideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl VideoStore for VideoRepository {
    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select", db.record_id = %id))]
    async fn fetch(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        let video = sqlx::query_as::<Postgres, Video>(
            r#"
            SELECT id, user_id, title, description, created_at, updated_at, thumbnail_url, video_url
            FROM videos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(video)
    }

    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.operation = "update", db.record_id = %video.id))]
    async fn update(&self, video: &Video) -> Result<Video, AppError> {
        let updated = sqlx::query_as::<Postgres, Video>(
            r#"
            UPDATE videos
            SET title = $2, description = $3, thumbnail_url = $4, video_url = $5, updated_at = $6
            WHERE id = $1
            RETURNING id, user_id, title, description, created_at, updated_at, thumbnail_url, video_url
            "#,
        )
        .bind(video.id)
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail_url)
        .bind(&video.video_url)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| AppError::NotFound(format!("Video {} not found", video.id)))
    }
}
