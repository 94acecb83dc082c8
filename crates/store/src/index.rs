//! Query interface to the external NFT indexing service.

use async_trait::async_trait;
use tokio::sync::Mutex;

use wallet_core::Address;
use walrus_storage::{BlobId, NftMetadata, TraitPair};

use crate::types::{NftId, NftRecord};

/// Indexing-service errors.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("index query failed: {0}")]
    Query(String),
}

/// Read-side catalogue of tokens, served by an external indexer.
///
/// The store never derives these views itself; its refresh operations
/// replace a collection wholesale with whatever the index returns.
#[async_trait]
pub trait NftIndex: Send + Sync {
    /// Every token the indexer knows about.
    async fn all(&self) -> Result<Vec<NftRecord>, IndexError>;

    /// Tokens currently owned by `owner`.
    async fn owned_by(&self, owner: &Address) -> Result<Vec<NftRecord>, IndexError>;

    /// Tokens currently listed for sale.
    async fn listed(&self) -> Result<Vec<NftRecord>, IndexError>;
}

/// Index backed by a fixed in-process catalogue.
///
/// Stands in for the real indexing service in demos and tests.
pub struct FixtureIndex {
    records: Mutex<Vec<NftRecord>>,
}

impl FixtureIndex {
    pub fn new(records: Vec<NftRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    /// Catalogue with a couple of sample tokens.
    pub fn demo() -> Self {
        Self::new(vec![
            sample_record(
                "0x123",
                "Pixel Art #1",
                "A beautiful pixel art piece",
                "https://example.com/image1.png",
                "0xabc",
                Some("1.5"),
                vec![
                    TraitPair::new("Background", "Blue"),
                    TraitPair::new("Character", "Robot"),
                ],
                "0xblob1",
            ),
            sample_record(
                "0x456",
                "Retro Game Character",
                "A character from a retro game",
                "https://example.com/image2.png",
                "0xdef",
                None,
                vec![
                    TraitPair::new("Type", "Character"),
                    TraitPair::new("Game", "Adventure Quest"),
                ],
                "0xblob2",
            ),
        ])
    }

    pub async fn insert(&self, record: NftRecord) {
        self.records.lock().await.push(record);
    }
}

#[async_trait]
impl NftIndex for FixtureIndex {
    async fn all(&self) -> Result<Vec<NftRecord>, IndexError> {
        Ok(self.records.lock().await.clone())
    }

    async fn owned_by(&self, owner: &Address) -> Result<Vec<NftRecord>, IndexError> {
        Ok(self
            .records
            .lock()
            .await
            .iter()
            .filter(|r| &r.owner == owner)
            .cloned()
            .collect())
    }

    async fn listed(&self) -> Result<Vec<NftRecord>, IndexError> {
        Ok(self
            .records
            .lock()
            .await
            .iter()
            .filter(|r| r.listed)
            .cloned()
            .collect())
    }
}

#[allow(clippy::too_many_arguments)]
fn sample_record(
    id: &str,
    name: &str,
    description: &str,
    image_url: &str,
    owner: &str,
    price: Option<&str>,
    attributes: Vec<TraitPair>,
    blob_id: &str,
) -> NftRecord {
    NftRecord {
        id: NftId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        image_url: image_url.to_string(),
        owner: Address::new(owner),
        creator: Address::new(owner),
        price: price.map(str::to_string),
        listed: price.is_some(),
        metadata: NftMetadata {
            name: name.to_string(),
            description: description.to_string(),
            image: image_url.to_string(),
            attributes,
            creator: owner.to_string(),
            created_at: "2025-01-01T00:00:00+00:00".to_string(),
            extra: Default::default(),
        },
        blob_id: BlobId::new(blob_id),
    }
}
