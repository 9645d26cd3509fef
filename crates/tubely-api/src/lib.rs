//! Tubely API Library
//!
//! HTTP surface for attaching thumbnails and video files to video records.

pub mod auth;
pub mod constants;
pub mod error;
mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::upload::{IngestService, UploadSettings};
