//! NFT records held by the state store.

use serde::{Deserialize, Serialize};

use wallet_core::Address;
use walrus_storage::{BlobId, NftMetadata, TraitPair};

/// Token identifier assigned by the network at mint time. Immutable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NftId(pub String);

impl NftId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NftId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One token known to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftRecord {
    pub id: NftId,
    pub name: String,
    pub description: String,
    /// Public URL of the stored image.
    pub image_url: String,
    /// Changes only through a successful purchase.
    pub owner: Address,
    /// Never changes after mint.
    pub creator: Address,
    /// Present iff the token is currently listed.
    pub price: Option<String>,
    pub listed: bool,
    pub metadata: NftMetadata,
    /// Blob holding the persisted metadata document.
    pub blob_id: BlobId,
}

impl NftRecord {
    /// Mark as listed at the given price, or clear the listing.
    ///
    /// Keeps `listed` and `price` in lockstep.
    pub fn set_listing(&mut self, price: Option<String>) {
        self.listed = price.is_some();
        self.price = price;
    }
}

/// Input to [`crate::NftStore::create_nft`].
#[derive(Debug, Clone)]
pub struct CreateNftRequest {
    pub name: String,
    pub description: String,
    pub image_bytes: Vec<u8>,
    pub image_content_type: String,
    /// Ordered trait pairs; order is preserved in the stored document.
    pub attributes: Vec<TraitPair>,
}
