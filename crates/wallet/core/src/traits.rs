//! The signing-provider seam.

use async_trait::async_trait;

use crate::types::{Address, TransactionRequest, TransactionResponse};

/// Wallet layer errors.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("wallet session is not connected")]
    NotConnected,

    #[error("connection rejected: {0}")]
    ConnectionRejected(String),

    #[error("transaction failed: {0}")]
    TransactionFailed(String),

    #[error("provider error: {0}")]
    Provider(String),
}

/// External signing provider capability.
///
/// Providers sign and broadcast transaction requests and report terminal
/// results. They hold whatever credentials the backend needs (a keystore,
/// a browser extension bridge); the session itself lives in the adapter.
#[async_trait]
pub trait SigningProvider: Send + Sync {
    /// Establish a provider-side session and return the account address.
    async fn connect(&self) -> Result<Address, WalletError>;

    /// Tear down the provider-side session. Must not fail the caller.
    async fn disconnect(&self);

    /// Sign, broadcast, and await a terminal result for a request.
    ///
    /// A single attempt per call: no retries happen at this layer.
    async fn sign_and_execute(
        &self,
        request: &TransactionRequest,
    ) -> Result<TransactionResponse, WalletError>;

    /// Provider name, e.g. "Sui" or "Mock".
    fn name(&self) -> &str;
}
