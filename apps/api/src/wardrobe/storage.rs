//! Object storage for wardrobe photos.
//!
//! `AppState` holds an `Arc<dyn ImageStore>`; production uses S3 (MinIO
//! locally), tests use the in-memory store.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;

#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), AppError>;
    async fn get(&self, key: &str) -> Result<Vec<u8>, AppError>;
    async fn delete(&self, key: &str) -> Result<(), AppError>;
}

/// Object key for a wardrobe item's photo.
pub fn image_key(user_id: Uuid, item_id: Uuid, ext: &str) -> String {
    format!("wardrobe/{user_id}/{item_id}.{ext}")
}

pub struct S3ImageStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3ImageStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl ImageStore for S3ImageStore {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), AppError> {
        let size = bytes.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 upload of {key} failed: {e}")))?;

        info!("Uploaded {size} bytes to s3://{}/{}", self.bucket, key);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, AppError> {
        let object = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 download of {key} failed: {e}")))?;

        let data = object
            .body
            .collect()
            .await
            .map_err(|e| AppError::Storage(format!("S3 read of {key} failed: {e}")))?;
        Ok(data.into_bytes().to_vec())
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 delete of {key} failed: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct MemoryImageStore {
    objects: std::sync::Mutex<std::collections::HashMap<String, Vec<u8>>>,
}

#[cfg(test)]
impl MemoryImageStore {
    pub fn is_empty(&self) -> bool {
        self.objects.lock().unwrap().is_empty()
    }
}

#[cfg(test)]
#[async_trait]
impl ImageStore for MemoryImageStore {
    async fn put(&self, key: &str, bytes: Vec<u8>, _content_type: &str) -> Result<(), AppError> {
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), bytes);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, AppError> {
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Image {key} not found")))
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_key_layout() {
        let user = Uuid::nil();
        let item = Uuid::nil();
        assert_eq!(
            image_key(user, item, "jpg"),
            format!("wardrobe/{user}/{item}.jpg")
        );
    }

    #[tokio::test]
    async fn test_memory_store_put_get_delete() {
        let store = MemoryImageStore::default();
        store.put("a", vec![1, 2, 3], "image/jpeg").await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), vec![1, 2, 3]);
        store.delete("a").await.unwrap();
        assert!(matches!(store.get("a").await, Err(AppError::NotFound(_))));
    }
}
