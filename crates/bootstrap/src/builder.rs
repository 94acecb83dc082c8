//! Assembles storage, wallet, and store into a client handle bundle.

use std::sync::Arc;

use anyhow::Result;

use nft_store::{FixtureIndex, NftIndex, NftStore};
use wallet_core::{MockSigningProvider, SigningProvider, WalletAdapter};
use wallet_sui::SuiSigningProvider;
use walrus_storage::{BlobStore, WalrusClient};

use crate::config::{AppConfig, ProviderKind};

/// Address the mock provider reports when selected via configuration.
const MOCK_ADDRESS: &str = "0xmock";

/// Builder that wires the client component graph.
pub struct ClientBuilder {
    config: AppConfig,
    index: Option<Arc<dyn NftIndex>>,
}

impl ClientBuilder {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            index: None,
        }
    }

    /// Replace the default index (e.g. with a live indexer client).
    pub fn index(mut self, index: Arc<dyn NftIndex>) -> Self {
        self.index = Some(index);
        self
    }

    pub fn build(self) -> Result<Client> {
        let storage: Arc<dyn BlobStore> =
            Arc::new(WalrusClient::new(self.config.walrus.clone()));

        let provider: Arc<dyn SigningProvider> = match self.config.provider {
            ProviderKind::Sui => Arc::new(SuiSigningProvider::new(self.config.sui.clone())?),
            ProviderKind::Mock => Arc::new(MockSigningProvider::new(MOCK_ADDRESS)),
        };

        tracing::info!("Building client with {} provider", provider.name());

        let wallet = Arc::new(WalletAdapter::new(provider));
        let index = self
            .index
            .unwrap_or_else(|| Arc::new(FixtureIndex::demo()));
        let store = Arc::new(NftStore::new(
            wallet.clone(),
            storage.clone(),
            index,
            self.config.contract.clone(),
        ));

        Ok(Client {
            config: self.config,
            storage,
            wallet,
            store,
        })
    }
}

/// Handle bundle passed to front-ends at startup.
///
/// Built once at app start, active while the front-end runs, torn down
/// with [`Client::shutdown`].
pub struct Client {
    pub config: AppConfig,
    pub storage: Arc<dyn BlobStore>,
    pub wallet: Arc<WalletAdapter>,
    pub store: Arc<NftStore>,
}

impl Client {
    pub fn builder(config: AppConfig) -> ClientBuilder {
        ClientBuilder::new(config)
    }

    /// Disconnect the wallet and release the handles.
    pub async fn shutdown(self) {
        self.wallet.disconnect().await;
    }
}
