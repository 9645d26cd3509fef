//! Upload ingestion pipeline
//!
//! authenticate → authorize → validate → name → stage → commit → persist
//!
//! Thumbnails are written in place under the assets root; videos are spooled
//! to a private temp file and put into object storage in one call. Staged
//! bytes are removed on every exit path that does not end in a commit.

pub mod commit;
pub mod naming;
pub mod service;
pub mod staging;
pub mod types;
pub mod validator;

pub use commit::Committer;
pub use service::IngestService;
pub use types::{AcceptedMedia, IngestStage, UploadSettings};
