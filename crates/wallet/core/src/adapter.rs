//! Wallet adapter owning the local session state.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::traits::{SigningProvider, WalletError};
use crate::types::{Address, TransactionRequest, TransactionResponse, WalletSession};

/// Outcome of a connect request.
///
/// Rejection is an expected outcome the caller renders inline, not an
/// error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// Session established with the given address.
    Connected(Address),
    /// A session already existed; no provider round-trip happened.
    AlreadyConnected(Address),
    /// The provider declined; the session stays disconnected.
    Rejected(String),
}

/// Adapter over an external signing provider.
///
/// Owns session state exclusively — no other component mutates it. The
/// store reads connection state and submits transactions through the
/// adapter's public operations only.
pub struct WalletAdapter {
    provider: Arc<dyn SigningProvider>,
    session: RwLock<WalletSession>,
}

impl WalletAdapter {
    pub fn new(provider: Arc<dyn SigningProvider>) -> Self {
        Self {
            provider,
            session: RwLock::new(WalletSession::default()),
        }
    }

    /// Request a session from the provider.
    ///
    /// Idempotent when already connected. Rejection leaves the session
    /// disconnected and is reported through the outcome, never as an
    /// error.
    pub async fn connect(&self) -> ConnectOutcome {
        {
            let mut session = self.session.write().await;
            if let Some(address) = session.address.clone() {
                return ConnectOutcome::AlreadyConnected(address);
            }
            session.connecting = true;
        }

        let result = self.provider.connect().await;

        let mut session = self.session.write().await;
        session.connecting = false;
        match result {
            Ok(address) => {
                session.connected = true;
                session.address = Some(address.clone());
                tracing::info!("✓ Wallet connected: {}", address);
                ConnectOutcome::Connected(address)
            }
            Err(e) => {
                session.connected = false;
                session.address = None;
                tracing::warn!("Wallet connection failed: {}", e);
                ConnectOutcome::Rejected(e.to_string())
            }
        }
    }

    /// Clear the session unconditionally.
    ///
    /// Provider-side teardown failures are not observable here; local
    /// state is gone either way.
    pub async fn disconnect(&self) {
        self.provider.disconnect().await;

        let mut session = self.session.write().await;
        *session = WalletSession::default();
        tracing::info!("Wallet disconnected");
    }

    /// Submit a request and await its terminal result.
    ///
    /// Requires a connected session. A single attempt per call — callers
    /// decide whether to retry.
    pub async fn submit_transaction(
        &self,
        request: &TransactionRequest,
    ) -> Result<TransactionResponse, WalletError> {
        if !self.is_connected().await {
            return Err(WalletError::NotConnected);
        }

        tracing::debug!(
            "Submitting transaction: {}::{}::{}",
            request.package,
            request.module,
            request.function
        );

        let response = self
            .provider
            .sign_and_execute(request)
            .await
            .map_err(|e| match e {
                WalletError::TransactionFailed(_) => e,
                other => WalletError::TransactionFailed(other.to_string()),
            })?;

        tracing::info!("✓ Transaction executed: {}", response.digest);

        Ok(response)
    }

    /// Snapshot of the current session.
    pub async fn session(&self) -> WalletSession {
        self.session.read().await.clone()
    }

    /// Address of the connected account, if any.
    pub async fn address(&self) -> Option<Address> {
        self.session.read().await.address.clone()
    }

    pub async fn is_connected(&self) -> bool {
        self.session.read().await.connected
    }

    /// Name of the backing provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }
}
