//! Tubely Storage Library
//!
//! This crate provides the storage abstraction used by the upload pipeline and
//! its two backends: the local assets root that thumbnails are written to and
//! served from, and an S3-compatible object store for video files.
//!
//! # Storage key format
//!
//! Keys are flat, randomly generated names. They must not be empty, contain
//! `..`, or contain a path separator.

pub mod factory;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
#[cfg(feature = "storage-local")]
pub use factory::create_assets_storage;
pub use factory::create_object_storage;
#[cfg(feature = "storage-local")]
pub use local::{LocalStorage, PendingFile};
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
pub use tubely_core::StorageBackend;
