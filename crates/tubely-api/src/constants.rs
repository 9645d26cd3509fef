//! API constants

/// API base path prefix
pub const API_BASE: &str = "/api";

/// Public path thumbnails are served from
pub const ASSETS_PATH: &str = "/assets";

/// Headroom above each per-file cap for multipart boundaries and part headers.
/// The file part itself is held to the exact cap while it is staged.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;
