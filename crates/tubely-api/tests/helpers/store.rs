use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use tubely_core::{models::Video, AppError};
use tubely_db::VideoStore;
use uuid::Uuid;

/// In-memory record store that counts calls and can be told to fail updates.
#[derive(Default)]
pub struct InMemoryVideoStore {
    videos: Mutex<HashMap<Uuid, Video>>,
    fetches: AtomicUsize,
    updates: AtomicUsize,
    fail_updates: AtomicBool,
}

impl InMemoryVideoStore {
    pub fn seed(&self, user_id: Uuid) -> Video {
        let now = Utc::now();
        let video = Video {
            id: Uuid::new_v4(),
            user_id,
            title: "Boots".to_string(),
            description: "Boot.dev mascot".to_string(),
            created_at: now,
            updated_at: now,
            thumbnail_url: None,
            video_url: None,
        };
        self.videos.lock().unwrap().insert(video.id, video.clone());
        video
    }

    pub fn get(&self, id: Uuid) -> Option<Video> {
        self.videos.lock().unwrap().get(&id).cloned()
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn fail_updates(&self) {
        self.fail_updates.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl VideoStore for InMemoryVideoStore {
    async fn fetch(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.get(id))
    }

    async fn update(&self, video: &Video) -> Result<Video, AppError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(AppError::Store("connection reset by peer".to_string()));
        }

        let mut videos = self.videos.lock().unwrap();
        let stored = videos
            .get_mut(&video.id)
            .ok_or_else(|| AppError::NotFound(format!("Video {} not found", video.id)))?;
        stored.title = video.title.clone();
        stored.description = video.description.clone();
        stored.thumbnail_url = video.thumbnail_url.clone();
        stored.video_url = video.video_url.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }
}
