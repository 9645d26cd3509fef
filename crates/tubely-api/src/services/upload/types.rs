//! Types used by the upload ingestion pipeline

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;
use std::time::Duration;
use tubely_core::{Config, UploadClass};

/// Limits and locations the pipeline needs, fixed at construction.
#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub max_thumbnail_bytes: usize,
    pub max_video_bytes: usize,
    /// Directory for spooled video files; `None` uses the OS temp dir.
    pub staging_dir: Option<PathBuf>,
    pub request_timeout: Duration,
}

impl UploadSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_thumbnail_bytes: config.max_thumbnail_size_bytes,
            max_video_bytes: config.max_video_size_bytes,
            staging_dir: config.upload_staging_dir.clone(),
            request_timeout: Duration::from_secs(config.upload_timeout_secs),
        }
    }

    /// Largest file body accepted for `class`.
    pub fn max_file_bytes(&self, class: UploadClass) -> usize {
        match class {
            UploadClass::Thumbnail => self.max_thumbnail_bytes,
            UploadClass::Video => self.max_video_bytes,
        }
    }
}

/// A declared content type that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedMedia {
    pub class: UploadClass,
    /// Canonical `type/subtype`, lowercased and without parameters
    pub content_type: &'static str,
    /// File extension without the leading dot
    pub extension: &'static str,
}

/// Position of a request in the ingestion state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestStage {
    Authenticating,
    Authorizing,
    Validating,
    Staging,
    Committing,
    Persisting,
    Done,
}

impl Display for IngestStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            IngestStage::Authenticating => "authenticating",
            IngestStage::Authorizing => "authorizing",
            IngestStage::Validating => "validating",
            IngestStage::Staging => "staging",
            IngestStage::Committing => "committing",
            IngestStage::Persisting => "persisting",
            IngestStage::Done => "done",
        };
        f.write_str(name)
    }
}
