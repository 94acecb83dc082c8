//! Blob identifiers and the NFT metadata document.

use serde::{Deserialize, Serialize};

/// Opaque handle assigned by the storage gateway when a blob is published.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlobId(pub String);

impl BlobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BlobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One `{trait_type, value}` attribute pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitPair {
    pub trait_type: String,
    pub value: TraitValue,
}

impl TraitPair {
    pub fn new(trait_type: impl Into<String>, value: impl Into<TraitValue>) -> Self {
        Self {
            trait_type: trait_type.into(),
            value: value.into(),
        }
    }
}

/// Attribute values are either text or numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraitValue {
    Text(String),
    Number(serde_json::Number),
}

impl From<&str> for TraitValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for TraitValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for TraitValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

/// Metadata document persisted alongside every token.
///
/// The struct field order is the serialization order, and attributes keep
/// their insertion order, so equal documents always encode to byte-identical
/// JSON. Unknown fields from documents written by other clients survive a
/// round trip through `extra` (sorted, so the encoding stays canonical).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftMetadata {
    pub name: String,
    pub description: String,
    /// Public URL of the stored image, used directly as an image `src`.
    pub image: String,
    pub attributes: Vec<TraitPair>,
    /// Address of the minting account. Never changes.
    pub creator: String,
    /// ISO-8601 creation timestamp.
    pub created_at: String,
    /// Catch-all for additional document fields.
    #[serde(flatten)]
    pub extra: std::collections::BTreeMap<String, serde_json::Value>,
}
