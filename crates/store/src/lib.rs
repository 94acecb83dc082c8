//! Client-side NFT state store.
//!
//! Holds the in-memory collections of known, owned, and listed tokens and
//! exposes the mutating operations that compose a blob upload, a
//! transaction submission, and a local state update. Durable state lives
//! in the external ledger and blob store; these collections are a cache
//! the view layer renders from.
//!
//! Write path: `View → NftStore → WalletAdapter / BlobStore → NftStore`.
//! Read path: `NftStore → View` (cloned snapshots).

pub mod error;
pub mod index;
pub mod store;
pub mod types;

pub use error::{CreationError, StoreError};
pub use index::{FixtureIndex, IndexError, NftIndex};
pub use store::{ContractConfig, NftStore};
pub use types::{CreateNftRequest, NftId, NftRecord};
