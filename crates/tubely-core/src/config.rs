//! Configuration module
//!
//! Process configuration is read once from the environment at startup. The
//! upload pipeline never consults the environment itself; it receives the
//! values it needs through the structs built from `Config`.

use std::env;
use std::path::PathBuf;

// Common constants
const DEFAULT_PORT: u16 = 8091;
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const MAX_THUMBNAIL_SIZE_MB: usize = 10;
const MAX_VIDEO_SIZE_MB: usize = 1024;
const UPLOAD_TIMEOUT_SECS: u64 = 600;
const DEFAULT_JWT_ISSUER: &str = "tubely-access";

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    /// Directory thumbnails are written to and served from under `/assets`.
    pub assets_root: PathBuf,
    /// Public origin used to build thumbnail URLs (`{assets_base_url}/assets/{name}`).
    pub assets_base_url: String,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>,
    /// Directory for staged video files; `None` uses the OS temp dir.
    pub upload_staging_dir: Option<PathBuf>,
    pub max_thumbnail_size_bytes: usize,
    pub max_video_size_bytes: usize,
    pub upload_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let _ = dotenvy::dotenv();

        let server_port = env::var("PORT")
            .unwrap_or_else(|_| DEFAULT_PORT.to_string())
            .parse()?;

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let max_thumbnail_size_mb: usize = env::var("MAX_THUMBNAIL_SIZE_MB")
            .unwrap_or_else(|_| MAX_THUMBNAIL_SIZE_MB.to_string())
            .parse()?;

        let max_video_size_mb: usize = env::var("MAX_VIDEO_SIZE_MB")
            .unwrap_or_else(|_| MAX_VIDEO_SIZE_MB.to_string())
            .parse()?;

        Ok(Config {
            server_port,
            environment,
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set"))?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| DEFAULT_JWT_ISSUER.to_string()),
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()?,
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()?,
            assets_root: env::var("ASSETS_ROOT")
                .unwrap_or_else(|_| "./assets".to_string())
                .into(),
            assets_base_url: env::var("ASSETS_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{}", server_port)),
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION").or_else(|_| env::var("AWS_REGION")).ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            upload_staging_dir: env::var("UPLOAD_STAGING_DIR").ok().map(PathBuf::from),
            max_thumbnail_size_bytes: max_thumbnail_size_mb * 1024 * 1024,
            max_video_size_bytes: max_video_size_mb * 1024 * 1024,
            upload_timeout_secs: env::var("UPLOAD_TIMEOUT_SECS")
                .unwrap_or_else(|_| UPLOAD_TIMEOUT_SECS.to_string())
                .parse()?,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.jwt_secret.len() < 32 {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least 32 characters long"
            ));
        }

        if !self.database_url.starts_with("postgres://")
            && !self.database_url.starts_with("postgresql://")
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        if self.s3_bucket.as_deref().map_or(true, str::is_empty) {
            return Err(anyhow::anyhow!("S3_BUCKET must be set for video uploads"));
        }

        if self.s3_region.is_none() && self.s3_endpoint.is_none() {
            return Err(anyhow::anyhow!(
                "S3_REGION (or AWS_REGION) is required when S3_ENDPOINT is not set"
            ));
        }

        if self.max_thumbnail_size_bytes == 0 || self.max_video_size_bytes == 0 {
            return Err(anyhow::anyhow!("Upload size limits must be greater than zero"));
        }

        Ok(())
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn jwt_issuer(&self) -> &str {
        &self.jwt_issuer
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.s3_bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.s3_endpoint.as_deref()
    }
}
