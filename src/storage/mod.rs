// Storage abstraction for the listing-image bucket

pub mod r2;

pub use r2::R2Backend;

use crate::error::AppResult;

/// Path-addressed object storage (Cloudflare R2 / any S3-compatible store).
#[tonic::async_trait]
pub trait StorageBackend: Send + Sync {
    /// Upload an object. Returns the storage path the row should reference.
    async fn upload(&self, key: &str, data: &[u8], content_type: &str) -> AppResult<String>;

    /// Delete an object.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Public read URL for a stored path.
    fn public_url(&self, key: &str) -> String;
}

#[cfg(test)]
pub mod memory {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::StorageBackend;
    use crate::error::{AppError, AppResult};

    /// In-memory backend for exercising upload paths in tests.
    #[derive(Default)]
    pub struct MemoryBackend {
        pub objects: Mutex<HashMap<String, (Vec<u8>, String)>>,
        pub fail_uploads: bool,
        /// When set, uploads beyond this count are rejected
        pub fail_after: Option<usize>,
        pub upload_attempts: std::sync::atomic::AtomicUsize,
    }

    #[tonic::async_trait]
    impl StorageBackend for MemoryBackend {
        async fn upload(&self, key: &str, data: &[u8], content_type: &str) -> AppResult<String> {
            let attempt = self
                .upload_attempts
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            if self.fail_uploads {
                return Err(AppError::Storage("upload rejected".to_string()));
            }
            if let Some(limit) = self.fail_after {
                if attempt >= limit {
                    return Err(AppError::Storage("upload rejected".to_string()));
                }
            }
            self.objects
                .lock()
                .unwrap()
                .insert(key.to_string(), (data.to_vec(), content_type.to_string()));
            Ok(key.to_string())
        }

        async fn delete(&self, key: &str) -> AppResult<()> {
            self.objects.lock().unwrap().remove(key);
            Ok(())
        }

        fn public_url(&self, key: &str) -> String {
            format!("memory://{}", key)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryBackend;
    use super::*;

    #[tokio::test]
    async fn memory_backend_round_trip() {
        let backend = MemoryBackend::default();
        let path = backend
            .upload("product-images/x/0-a.jpg", b"jpeg bytes", "image/jpeg")
            .await
            .unwrap();
        assert_eq!(path, "product-images/x/0-a.jpg");
        assert!(backend.objects.lock().unwrap().contains_key(&path));

        backend.delete(&path).await.unwrap();
        assert!(backend.objects.lock().unwrap().is_empty());
    }
}
