//! Tubely DB Library
//!
//! Record store access for video records.

pub mod db;

pub use db::{VideoRepository, VideoStore};
