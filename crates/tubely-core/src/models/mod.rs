//! Data models for the application

mod upload;
mod video;

pub use upload::UploadClass;
pub use video::{Video, VideoResponse};
