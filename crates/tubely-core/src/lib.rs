//! Tubely Core Library
//!
//! This crate provides the video record model, error types, configuration and
//! storage backend identifiers shared by every Tubely component.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
pub use models::{UploadClass, Video, VideoResponse};
