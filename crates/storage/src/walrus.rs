//! Walrus HTTP gateway client.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{Result, StorageError};
use crate::traits::BlobStore;
use crate::types::{BlobId, NftMetadata};

/// Connection settings for the Walrus gateway.
#[derive(Debug, Clone)]
pub struct WalrusConfig {
    /// Publisher endpoint (blob uploads).
    pub api_url: String,

    /// Aggregator endpoint (blob retrieval and public URLs).
    pub gateway_url: String,

    /// Optional bearer token attached to publish requests.
    pub api_key: Option<String>,
}

impl Default for WalrusConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.walrus.testnet.sui.io".to_string(),
            gateway_url: "https://gateway.walrus.testnet.sui.io".to_string(),
            api_key: None,
        }
    }
}

/// Response body of `POST {api}/blob/publish`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublishResponse {
    blob_id: String,
}

/// Walrus storage client using the HTTP API.
pub struct WalrusClient {
    config: WalrusConfig,
    http_client: reqwest::Client,
}

impl WalrusClient {
    /// Create a client for the given gateway endpoints.
    pub fn new(config: WalrusConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &WalrusConfig {
        &self.config
    }

    fn blob_url(&self, blob_id: &BlobId) -> String {
        format!("{}/blob/{}", self.config.gateway_url, blob_id.as_str())
    }
}

#[async_trait]
impl BlobStore for WalrusClient {
    async fn upload_blob(&self, bytes: Vec<u8>, content_type: &str) -> Result<BlobId> {
        let url = format!("{}/blob/publish", self.config.api_url);

        tracing::debug!(
            "Uploading blob: {} bytes, content type {}",
            bytes.len(),
            content_type
        );

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name("blob")
            .mime_str(content_type)
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let mut request = self.http_client.post(&url).multipart(form);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(StorageError::UploadFailed(format!(
                "status {status}: {body}"
            )));
        }

        let publish: PublishResponse = response.json().await.map_err(|e| {
            StorageError::UploadFailed(format!("malformed publish response: {e}"))
        })?;

        tracing::info!("✓ Blob uploaded: {}", publish.blob_id);

        Ok(BlobId::new(publish.blob_id))
    }

    async fn retrieve_metadata(&self, blob_id: &BlobId) -> Result<NftMetadata> {
        let url = self.blob_url(blob_id);

        tracing::debug!("Fetching metadata document: {}", blob_id);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| StorageError::RetrievalFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound(blob_id.as_str().to_string()));
        }

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(StorageError::RetrievalFailed(format!(
                "status {status}: {body}"
            )));
        }

        response
            .json::<NftMetadata>()
            .await
            .map_err(|e| StorageError::InvalidDocument(e.to_string()))
    }

    fn public_url(&self, blob_id: &BlobId) -> String {
        self.blob_url(blob_id)
    }

    async fn check_availability(&self, blob_id: &BlobId) -> bool {
        let url = self.blob_url(blob_id);

        match self.http_client.head(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!("Availability probe failed for {}: {}", blob_id, e);
                false
            }
        }
    }
}
