//! Common types for wallet sessions and transaction handling.

use serde::{Deserialize, Serialize};

/// Account address as reported by the signing provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(pub String);

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Transaction digest assigned by the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxDigest(pub String);

impl TxDigest {
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TxDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Single argument of a remote call.
///
/// Object arguments are resolved to on-chain references by the provider;
/// pure arguments pass through as values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CallArg {
    /// Reference to an on-chain object by identifier.
    Object(String),
    /// UTF-8 string value.
    Text(String),
    /// Unsigned integer value.
    U64(u64),
}

/// Description of a remote call.
///
/// Constructed by the state store, passed through the wallet adapter, and
/// never inspected by the view layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRequest {
    /// Package the target module lives in.
    pub package: String,
    pub module: String,
    pub function: String,
    /// Positional arguments, in call order.
    pub arguments: Vec<CallArg>,
    /// Fee budget in the network's smallest unit.
    pub gas_budget: u64,
}

/// Object created by a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedObject {
    pub object_id: String,
}

/// Event emitted during transaction execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionEvent {
    pub event_type: String,
    pub data: serde_json::Value,
}

/// Terminal result of a submitted transaction.
///
/// Providers only ever return terminal states; pending transactions are
/// awaited internally before this is produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub digest: TxDigest,
    pub created: Vec<CreatedObject>,
    pub events: Vec<TransactionEvent>,
}

impl TransactionResponse {
    /// Identifier of the first object the transaction created, if any.
    pub fn first_created(&self) -> Option<&str> {
        self.created.first().map(|c| c.object_id.as_str())
    }
}

/// Local record of the connection to a signing provider.
///
/// `address` is present iff `connected`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletSession {
    pub connected: bool,
    pub connecting: bool,
    pub address: Option<Address>,
}
