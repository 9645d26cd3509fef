//! Declared content type validation
//!
//! Only the declared header is inspected; file contents are never sniffed.

use super::types::AcceptedMedia;
use tubely_core::{AppError, UploadClass};

/// (class, content type, canonical extension)
const ACCEPTED_MEDIA: &[(UploadClass, &str, &str)] = &[
    (UploadClass::Thumbnail, "image/jpeg", "jpg"),
    (UploadClass::Thumbnail, "image/png", "png"),
    (UploadClass::Video, "video/mp4", "mp4"),
];

pub fn validate_media(
    declared: Option<&str>,
    class: UploadClass,
) -> Result<AcceptedMedia, AppError> {
    let declared = declared.map(str::trim).unwrap_or_default();
    if declared.is_empty() {
        return Err(AppError::UnsupportedMediaType(
            "Missing content type".to_string(),
        ));
    }

    let parsed: mime::Mime = declared.parse().map_err(|_| {
        AppError::UnsupportedMediaType(format!("Unable to parse content type '{}'", declared))
    })?;
    let essence = parsed.essence_str().to_ascii_lowercase();

    ACCEPTED_MEDIA
        .iter()
        .find(|(c, content_type, _)| *c == class && *content_type == essence)
        .map(|&(class, content_type, extension)| AcceptedMedia {
            class,
            content_type,
            extension,
        })
        .ok_or_else(|| {
            let reason = match class {
                UploadClass::Thumbnail => "Not a valid image format",
                UploadClass::Video => "Video isn't mp4",
            };
            AppError::UnsupportedMediaType(format!("{} ({})", reason, essence))
        })
}
