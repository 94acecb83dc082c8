//! In-memory blob store for tests and demos.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;

use crate::error::{Result, StorageError};
use crate::traits::BlobStore;
use crate::types::{BlobId, NftMetadata};

/// Blob store that keeps everything in process memory.
///
/// Simulates the gateway without network access. Uploads can be switched to
/// fail so callers can exercise their abort paths.
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<BlobId, StoredBlob>>,
    counter: AtomicU64,
    fail_uploads: AtomicBool,
}

struct StoredBlob {
    content_type: String,
    bytes: Vec<u8>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self {
            blobs: Mutex::new(HashMap::new()),
            counter: AtomicU64::new(0),
            fail_uploads: AtomicBool::new(false),
        }
    }

    /// Make every subsequent upload fail with `UploadFailed`.
    pub fn fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    /// Number of stored blobs.
    pub fn len(&self) -> usize {
        self.blobs.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, blob_id: &BlobId) -> bool {
        self.blobs.lock().unwrap().contains_key(blob_id)
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload_blob(&self, bytes: Vec<u8>, content_type: &str) -> Result<BlobId> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::UploadFailed("injected failure".to_string()));
        }

        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let blob_id = BlobId::new(format!("blob-{n}"));

        self.blobs.lock().unwrap().insert(
            blob_id.clone(),
            StoredBlob {
                content_type: content_type.to_string(),
                bytes,
            },
        );

        Ok(blob_id)
    }

    async fn retrieve_metadata(&self, blob_id: &BlobId) -> Result<NftMetadata> {
        let blobs = self.blobs.lock().unwrap();
        let stored = blobs
            .get(blob_id)
            .ok_or_else(|| StorageError::NotFound(blob_id.as_str().to_string()))?;

        serde_json::from_slice(&stored.bytes)
            .map_err(|e| StorageError::InvalidDocument(e.to_string()))
    }

    fn public_url(&self, blob_id: &BlobId) -> String {
        format!("memory://blob/{}", blob_id.as_str())
    }

    async fn check_availability(&self, blob_id: &BlobId) -> bool {
        self.contains(blob_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TraitPair;

    fn metadata() -> NftMetadata {
        NftMetadata {
            name: "Sample".to_string(),
            description: "A sample token".to_string(),
            image: "memory://blob/blob-1".to_string(),
            attributes: vec![TraitPair::new("Background", "Blue")],
            creator: "0xabc".to_string(),
            created_at: "2025-06-01T12:00:00+00:00".to_string(),
            extra: Default::default(),
        }
    }

    #[tokio::test]
    async fn metadata_round_trip() {
        let store = MemoryBlobStore::new();

        let blob_id = store.store_metadata(&metadata()).await.unwrap();
        assert!(store.check_availability(&blob_id).await);

        let decoded = store.retrieve_metadata(&blob_id).await.unwrap();
        assert_eq!(decoded, metadata());
    }

    #[tokio::test]
    async fn missing_blob_is_not_found() {
        let store = MemoryBlobStore::new();
        let blob_id = BlobId::new("absent");

        assert!(!store.check_availability(&blob_id).await);
        let err = store.retrieve_metadata(&blob_id).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn injected_failures_surface_as_upload_failed() {
        let store = MemoryBlobStore::new();
        store.fail_uploads(true);

        let err = store
            .upload_blob(vec![1, 2, 3], "image/png")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::UploadFailed(_)));
        assert!(store.is_empty());
    }
}
