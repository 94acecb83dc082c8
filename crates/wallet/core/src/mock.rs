//! Scripted signing provider for tests and demos.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::traits::{SigningProvider, WalletError};
use crate::types::{Address, CreatedObject, TransactionRequest, TransactionResponse, TxDigest};

/// Signing provider that replays scripted results without a network.
///
/// With nothing scripted, every submission succeeds and creates one object
/// with a synthesized identifier. Scripted responses are consumed in FIFO
/// order before the synthesized default kicks in again.
pub struct MockSigningProvider {
    address: Address,
    reject_connect: Mutex<Option<String>>,
    responses: Mutex<VecDeque<Result<TransactionResponse, WalletError>>>,
    submitted: Mutex<Vec<TransactionRequest>>,
    tx_counter: AtomicU64,
}

impl MockSigningProvider {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: Address::new(address),
            reject_connect: Mutex::new(None),
            responses: Mutex::new(VecDeque::new()),
            submitted: Mutex::new(Vec::new()),
            tx_counter: AtomicU64::new(0),
        }
    }

    /// Reject the next `connect` call with the given reason.
    pub fn reject_next_connect(&self, reason: impl Into<String>) {
        *self.reject_connect.lock().unwrap() = Some(reason.into());
    }

    /// Script the next submission result.
    pub fn push_response(&self, response: Result<TransactionResponse, WalletError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Script the next submission to fail with the given diagnostic.
    pub fn push_failure(&self, diagnostic: impl Into<String>) {
        self.push_response(Err(WalletError::TransactionFailed(diagnostic.into())));
    }

    /// Build a successful response creating a single object.
    pub fn success_with_created(object_id: impl Into<String>) -> TransactionResponse {
        TransactionResponse {
            digest: TxDigest::new("mock-digest"),
            created: vec![CreatedObject {
                object_id: object_id.into(),
            }],
            events: Vec::new(),
        }
    }

    /// Build a successful response that created nothing.
    pub fn success_without_created() -> TransactionResponse {
        TransactionResponse {
            digest: TxDigest::new("mock-digest"),
            created: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Requests submitted so far, in order.
    pub fn submitted(&self) -> Vec<TransactionRequest> {
        self.submitted.lock().unwrap().clone()
    }

    fn synthesized_success(&self) -> TransactionResponse {
        let n = self.tx_counter.fetch_add(1, Ordering::SeqCst) + 1;
        TransactionResponse {
            digest: TxDigest::new(format!("mock-digest-{n}")),
            created: vec![CreatedObject {
                object_id: format!("0xmock{n}"),
            }],
            events: Vec::new(),
        }
    }
}

#[async_trait]
impl SigningProvider for MockSigningProvider {
    async fn connect(&self) -> Result<Address, WalletError> {
        if let Some(reason) = self.reject_connect.lock().unwrap().take() {
            return Err(WalletError::ConnectionRejected(reason));
        }
        Ok(self.address.clone())
    }

    async fn disconnect(&self) {}

    async fn sign_and_execute(
        &self,
        request: &TransactionRequest,
    ) -> Result<TransactionResponse, WalletError> {
        self.submitted.lock().unwrap().push(request.clone());

        match self.responses.lock().unwrap().pop_front() {
            Some(scripted) => scripted,
            None => Ok(self.synthesized_success()),
        }
    }

    fn name(&self) -> &str {
        "Mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CallArg;

    #[tokio::test]
    async fn scripted_responses_are_consumed_in_order() {
        let provider = MockSigningProvider::new("0xabc");
        provider.push_failure("first");
        provider.push_response(Ok(MockSigningProvider::success_with_created("0xnft")));

        let request = TransactionRequest {
            package: "0x1".to_string(),
            module: "marketplace".to_string(),
            function: "buy".to_string(),
            arguments: vec![CallArg::Object("0x123".to_string())],
            gas_budget: 10_000,
        };

        assert!(provider.sign_and_execute(&request).await.is_err());

        let response = provider.sign_and_execute(&request).await.unwrap();
        assert_eq!(response.first_created(), Some("0xnft"));

        // Queue drained: back to synthesized successes.
        let response = provider.sign_and_execute(&request).await.unwrap();
        assert_eq!(response.created.len(), 1);

        assert_eq!(provider.submitted().len(), 3);
    }
}
