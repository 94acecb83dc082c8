//! Decentralized blob storage for NFT media and metadata.
//!
//! Media bytes and metadata documents are persisted in an external blob
//! store and referenced on-chain by their blob identifiers. This crate
//! defines the storage contract the rest of the client programs against
//! and ships two implementations:
//!
//! - [`WalrusClient`]: HTTP client for the Walrus publisher/gateway API
//! - [`MemoryBlobStore`]: in-process store backing tests and demos
//!
//! ## Integration Pattern
//!
//! 1. Upload the image blob via the publisher endpoint → blob id
//! 2. Derive the public URL and embed it in the metadata document
//! 3. Upload the metadata document → blob id
//! 4. Reference the metadata blob id from the mint transaction

pub mod error;
pub mod memory;
pub mod traits;
pub mod types;
pub mod walrus;

pub use error::StorageError;
pub use memory::MemoryBlobStore;
pub use traits::BlobStore;
pub use types::{BlobId, NftMetadata, TraitPair, TraitValue};
pub use walrus::{WalrusClient, WalrusConfig};
