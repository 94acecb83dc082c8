//! Wallet abstraction for the marketplace client.
//!
//! This crate separates the session-owning adapter from the signing
//! backend behind it:
//!
//! ```text
//! WalletAdapter (owns the session, one per app)
//!     └── SigningProvider (pluggable: Sui keystore, mock, ...)
//! ```
//!
//! Which provider backs the adapter is a construction-time configuration
//! choice; callers only ever see the adapter. Transaction requests pass
//! through untouched and resolve to terminal results — a pending state is
//! never surfaced.

pub mod adapter;
pub mod mock;
pub mod traits;
pub mod types;

pub use adapter::{ConnectOutcome, WalletAdapter};
pub use mock::MockSigningProvider;
pub use traits::{SigningProvider, WalletError};
pub use types::{
    Address, CallArg, CreatedObject, TransactionEvent, TransactionRequest, TransactionResponse,
    TxDigest, WalletSession,
};
