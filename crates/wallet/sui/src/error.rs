//! Error types for the Sui provider.

use thiserror::Error;

/// Errors that can occur while setting up or driving the Sui provider.
#[derive(Debug, Error)]
pub enum SuiProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("transaction failed: {0}")]
    TransactionFailed(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("keystore error: {0}")]
    Keystore(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SuiProviderError>;
