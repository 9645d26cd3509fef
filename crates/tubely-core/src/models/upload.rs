use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Kind of media being attached to a video record. Selects the accepted
/// content types, the multipart field name and the storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadClass {
    Thumbnail,
    Video,
}

impl UploadClass {
    /// Multipart form field carrying the file.
    pub fn field_name(&self) -> &'static str {
        match self {
            UploadClass::Thumbnail => "thumbnail",
            UploadClass::Video => "video",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UploadClass::Thumbnail => "thumbnail",
            UploadClass::Video => "video",
        }
    }
}

impl Display for UploadClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}
