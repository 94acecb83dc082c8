//! Storage contract the rest of the client programs against.

use async_trait::async_trait;

use crate::error::{Result, StorageError};
use crate::types::{BlobId, NftMetadata};

/// Blob store operations used by the marketplace client.
///
/// Implementations talk to a decentralized storage gateway; the in-memory
/// variant backs tests. All durable state lives behind this seam — the
/// client never persists blobs itself.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload raw bytes, returning the gateway-assigned blob identifier.
    ///
    /// # Errors
    ///
    /// `UploadFailed` on any transport error or non-success status.
    async fn upload_blob(&self, bytes: Vec<u8>, content_type: &str) -> Result<BlobId>;

    /// Serialize and store a metadata document.
    ///
    /// The encoding is canonical: two calls with equal input produce
    /// byte-identical payloads (struct field order and attribute insertion
    /// order are preserved).
    async fn store_metadata(&self, metadata: &NftMetadata) -> Result<BlobId> {
        let bytes = serde_json::to_vec(metadata)
            .map_err(|e| StorageError::InvalidDocument(e.to_string()))?;
        self.upload_blob(bytes, "application/json").await
    }

    /// Fetch and decode a previously stored metadata document.
    ///
    /// # Errors
    ///
    /// `NotFound` if the gateway reports absence, `RetrievalFailed` on any
    /// other transport failure, `InvalidDocument` if the body does not
    /// decode.
    async fn retrieve_metadata(&self, blob_id: &BlobId) -> Result<NftMetadata>;

    /// Derive the public URL for a blob. Pure derivation, no I/O.
    fn public_url(&self, blob_id: &BlobId) -> String;

    /// Best-effort existence probe.
    ///
    /// Transport failures are reported as `false`: through this call,
    /// absence cannot be distinguished from a transient network fault.
    async fn check_availability(&self, blob_id: &BlobId) -> bool;
}
