//! Keystore-backed Sui signing provider.

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use shared_crypto::intent::{Intent, IntentMessage};
use sui_keys::keystore::{AccountKeystore, FileBasedKeystore};
use sui_sdk::rpc_types::{
    ObjectChange, SuiExecutionStatus, SuiObjectDataOptions, SuiTransactionBlockEffectsAPI,
    SuiTransactionBlockResponseOptions,
};
use sui_sdk::{SuiClient, SuiClientBuilder};
use sui_types::Identifier;
use sui_types::base_types::{ObjectID, SuiAddress};
use sui_types::programmable_transaction_builder::ProgrammableTransactionBuilder;
use sui_types::transaction::{ObjectArg, Transaction, TransactionData};
use tokio::sync::RwLock;

use wallet_core::{
    Address, CallArg, CreatedObject, SigningProvider, TransactionEvent, TransactionRequest,
    TransactionResponse, TxDigest, WalletError,
};

use crate::config::SuiConfig;
use crate::error::SuiProviderError;

/// Everything a connected provider holds.
struct ProviderState {
    client: SuiClient,
    keystore: FileBasedKeystore,
    active_address: SuiAddress,
}

/// Signing provider backed by a Sui fullnode and the local CLI keystore.
///
/// The first keystore address is the active signer. Requests are executed
/// as single-call Programmable Transaction Blocks paid for with the first
/// available gas coin.
pub struct SuiSigningProvider {
    config: SuiConfig,
    state: RwLock<Option<ProviderState>>,
}

impl SuiSigningProvider {
    pub fn new(config: SuiConfig) -> Result<Self, SuiProviderError> {
        config
            .validate()
            .map_err(SuiProviderError::InvalidConfig)?;

        Ok(Self {
            config,
            state: RwLock::new(None),
        })
    }

    pub fn config(&self) -> &SuiConfig {
        &self.config
    }

    async fn establish(&self) -> Result<Address> {
        let client = SuiClientBuilder::default()
            .build(self.config.rpc_url())
            .await
            .context("Failed to connect to Sui fullnode")?;

        let keystore_path = self.config.keystore_path();
        let keystore = FileBasedKeystore::new(&keystore_path).with_context(|| {
            format!("Failed to open keystore at {}", keystore_path.display())
        })?;

        let active_address = keystore
            .addresses()
            .first()
            .copied()
            .ok_or_else(|| anyhow!("Keystore holds no addresses"))?;

        let address = Address::new(active_address.to_string());

        let mut state = self.state.write().await;
        *state = Some(ProviderState {
            client,
            keystore,
            active_address,
        });

        tracing::info!(
            "✓ Sui provider connected: {} on {}",
            address,
            self.config.network.name()
        );

        Ok(address)
    }

    /// Build, sign, and execute a request as a PTB; await the terminal
    /// on-chain status.
    async fn execute(
        &self,
        state: &ProviderState,
        request: &TransactionRequest,
    ) -> Result<TransactionResponse> {
        let package_id: ObjectID = request
            .package
            .parse()
            .context("Invalid package ID format")?;

        // Build Programmable Transaction Block
        let mut ptb = ProgrammableTransactionBuilder::new();

        let mut call_args = Vec::with_capacity(request.arguments.len());
        for arg in &request.arguments {
            let built = match arg {
                CallArg::Object(id) => {
                    let object_id: ObjectID = id.parse().context("Invalid object ID format")?;
                    let object = state
                        .client
                        .read_api()
                        .get_object_with_options(object_id, SuiObjectDataOptions::default())
                        .await
                        .context("Failed to fetch object argument")?
                        .into_object()
                        .with_context(|| format!("Object not found: {id}"))?;

                    ptb.obj(ObjectArg::ImmOrOwnedObject(object.object_ref()))?
                }
                CallArg::Text(value) => ptb.pure(value.clone())?,
                CallArg::U64(value) => ptb.pure(*value)?,
            };
            call_args.push(built);
        }

        ptb.programmable_move_call(
            package_id,
            Identifier::new(request.module.as_str())?,
            Identifier::new(request.function.as_str())?,
            vec![], // No type arguments
            call_args,
        );

        let pt = ptb.finish();

        // Get current gas price
        let gas_price = state
            .client
            .read_api()
            .get_reference_gas_price()
            .await
            .context("Failed to get reference gas price")?;

        // Get gas coin for payment
        let gas_coin = Self::get_gas_coin(&state.client, state.active_address).await?;

        // Build transaction data
        let tx_data = TransactionData::new_programmable(
            state.active_address,
            vec![gas_coin],
            pt,
            request.gas_budget,
            gas_price,
        );

        // Sign transaction with intent
        let keypair = state
            .keystore
            .export(&state.active_address)
            .context("Failed to export keypair from keystore")?;

        let signature = sui_types::crypto::Signature::new_secure(
            &IntentMessage::new(Intent::sui_transaction(), &tx_data),
            keypair,
        );

        // Execute transaction
        tracing::debug!(
            "Executing {}::{} transaction...",
            request.module,
            request.function
        );
        let response = state
            .client
            .quorum_driver_api()
            .execute_transaction_block(
                Transaction::from_data(tx_data, vec![signature]),
                SuiTransactionBlockResponseOptions::new()
                    .with_effects()
                    .with_events()
                    .with_object_changes(),
                None, // No execution options
            )
            .await
            .context("Failed to execute transaction")?;

        let digest = TxDigest::new(response.digest.to_string());

        let effects = response
            .effects
            .as_ref()
            .ok_or_else(|| anyhow!("No effects in transaction response"))?;

        if let SuiExecutionStatus::Failure { error } = effects.status() {
            return Err(anyhow!(
                "Transaction failed on-chain: {} (tx: {})",
                error,
                digest
            ));
        }

        let created: Vec<CreatedObject> = response
            .object_changes
            .unwrap_or_default()
            .into_iter()
            .filter_map(|change| match change {
                ObjectChange::Created { object_id, .. } => Some(CreatedObject {
                    object_id: object_id.to_string(),
                }),
                _ => None,
            })
            .collect();

        let events: Vec<TransactionEvent> = response
            .events
            .map(|events| {
                events
                    .data
                    .into_iter()
                    .map(|event| TransactionEvent {
                        event_type: event.type_.to_string(),
                        data: event.parsed_json,
                    })
                    .collect()
            })
            .unwrap_or_default();

        tracing::info!("✓ Transaction confirmed: {}", digest);

        Ok(TransactionResponse {
            digest,
            created,
            events,
        })
    }

    /// Get gas coin for transaction payment.
    ///
    /// Fetches the first available gas coin for the given address.
    async fn get_gas_coin(
        client: &SuiClient,
        active_address: SuiAddress,
    ) -> Result<sui_types::base_types::ObjectRef> {
        let gas_coins = client
            .coin_read_api()
            .get_coins(active_address, None, None, None)
            .await
            .context("Failed to get gas coins")?;

        let gas_coin = gas_coins
            .data
            .first()
            .ok_or_else(|| anyhow!("No gas coins available for address {}", active_address))?;

        tracing::debug!(
            "Using gas coin: {} with balance: {}",
            gas_coin.coin_object_id,
            gas_coin.balance
        );

        Ok(gas_coin.object_ref())
    }
}

#[async_trait]
impl SigningProvider for SuiSigningProvider {
    async fn connect(&self) -> Result<Address, WalletError> {
        self.establish()
            .await
            .map_err(|e| WalletError::Provider(format!("{e:#}")))
    }

    async fn disconnect(&self) {
        *self.state.write().await = None;
    }

    async fn sign_and_execute(
        &self,
        request: &TransactionRequest,
    ) -> Result<TransactionResponse, WalletError> {
        let state = self.state.read().await;
        let state = state.as_ref().ok_or(WalletError::NotConnected)?;

        self.execute(state, request)
            .await
            .map_err(|e| WalletError::TransactionFailed(format!("{e:#}")))
    }

    fn name(&self) -> &str {
        "Sui"
    }
}
