//! Storage name generation
//!
//! Names carry enough OS randomness that collisions are not checked for.

use super::types::AcceptedMedia;
use base64::Engine;
use rand::rngs::OsRng;
use rand::TryRngCore;
use tubely_core::{AppError, UploadClass};

const THUMBNAIL_NAME_BYTES: usize = 32;
const VIDEO_KEY_BYTES: usize = 16;

/// Generate a fresh storage name for `media`.
///
/// Thumbnails: url-safe base64 of 256 random bits plus `.{ext}`.
/// Videos: lowercase hex of 128 random bits, no extension (the content type
/// travels as object metadata).
pub fn generate_name(media: &AcceptedMedia) -> Result<String, AppError> {
    match media.class {
        UploadClass::Thumbnail => {
            let bytes = random_bytes::<THUMBNAIL_NAME_BYTES>()?;
            let encoded = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes);
            Ok(format!("{}.{}", encoded, media.extension))
        }
        UploadClass::Video => Ok(hex::encode(random_bytes::<VIDEO_KEY_BYTES>()?)),
    }
}

fn random_bytes<const N: usize>() -> Result<[u8; N], AppError> {
    let mut buf = [0u8; N];
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|e| AppError::RandomnessUnavailable(e.to_string()))?;
    Ok(buf)
}
