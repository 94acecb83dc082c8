//! State-store error taxonomy.

use thiserror::Error;

use wallet_core::WalletError;
use walrus_storage::StorageError;

use crate::index::IndexError;
use crate::types::NftId;

/// Failure cause inside the multi-step create flow.
#[derive(Debug, Error)]
pub enum CreationError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    /// The network reported success but its effects carried no created
    /// object to take the token identifier from.
    #[error("mint succeeded without a created object in its effects")]
    MintResultMalformed,
}

/// Errors surfaced by state-store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("wallet session is not connected")]
    NotConnected,

    #[error("NFT not found: {0}")]
    NotFound(NftId),

    #[error("NFT {0} is not owned by the connected account")]
    NotOwned(NftId),

    /// The remote network rejected or could not execute the call. Local
    /// collections are untouched; retrying is safe.
    #[error("transaction failed")]
    Transaction(#[source] WalletError),

    /// A step of the create flow failed; nothing was inserted.
    #[error("NFT creation failed")]
    CreationFailed(#[source] CreationError),

    #[error(transparent)]
    Index(#[from] IndexError),
}
