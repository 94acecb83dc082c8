//! Sui-backed signing provider for the marketplace client.
//!
//! Implements the `SigningProvider` seam from `wallet-core` on top of the
//! Sui SDK: requests are turned into Programmable Transaction Blocks,
//! signed with the local CLI keystore, executed through the quorum driver,
//! and mapped back into the chain-agnostic response types.
//!
//! ```text
//! TransactionRequest → PTB → sign (keystore) → execute → TransactionResponse
//! ```
//!
//! The provider reports only terminal results: an on-chain `Failure`
//! status is surfaced as an error even when the RPC call itself succeeded.

pub mod config;
pub mod error;
pub mod provider;

pub use config::{SuiConfig, SuiNetwork};
pub use error::SuiProviderError;
pub use provider::SuiSigningProvider;
