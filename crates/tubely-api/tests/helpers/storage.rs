use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tubely_storage::{Storage, StorageBackend, StorageError, StorageResult};

/// Object store double: keeps puts in memory, or fails them on demand.
#[derive(Default)]
pub struct MockStorage {
    objects: Mutex<HashMap<String, (Vec<u8>, String)>>,
    fail: AtomicBool,
}

impl MockStorage {
    pub fn fail_uploads(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    /// (bytes, content type) stored under `key`
    pub fn object(&self, key: &str) -> Option<(Vec<u8>, String)> {
        self.objects.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl Storage for MockStorage {
    async fn upload_with_key(
        &self,
        storage_key: &str,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<String> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StorageError::UploadFailed(
                "simulated transport error".to_string(),
            ));
        }
        self.objects.lock().unwrap().insert(
            storage_key.to_string(),
            (data.to_vec(), content_type.to_string()),
        );
        Ok(format!(
            "https://tubely-test.s3.us-east-1.amazonaws.com/{}",
            storage_key
        ))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
