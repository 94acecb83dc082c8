//! Client configuration structures and loaders.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use nft_store::ContractConfig;
use wallet_sui::{SuiConfig, SuiNetwork};
use walrus_storage::WalrusConfig;

/// Which signing provider backs the wallet adapter.
///
/// A configuration choice, not a code path: callers always talk to the
/// same adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    /// Keystore-backed Sui provider.
    #[default]
    Sui,
    /// Scripted in-process provider (demos, tests).
    Mock,
}

impl ProviderKind {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "sui" => Some(ProviderKind::Sui),
            "mock" => Some(ProviderKind::Mock),
            _ => None,
        }
    }
}

/// Configuration required to assemble a marketplace client.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub provider: ProviderKind,
    pub walrus: WalrusConfig,
    pub sui: SuiConfig,
    pub contract: ContractConfig,
}

impl AppConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `MARKET_PROVIDER` - `sui` or `mock` (default: sui)
    /// - `MARKET_PACKAGE_ID` - marketplace package id
    /// - `MARKET_GAS_BUDGET` - fee budget per call
    /// - `WALRUS_API_URL` / `WALRUS_GATEWAY_URL` / `WALRUS_API_KEY`
    /// - `SUI_NETWORK` / `SUI_RPC_URL` / `SUI_KEYSTORE_PATH`
    pub fn from_env() -> Self {
        let mut config = Self {
            sui: SuiConfig::from_env(),
            ..Self::default()
        };

        if let Some(provider) = env::var("MARKET_PROVIDER")
            .ok()
            .and_then(|p| ProviderKind::parse(&p))
        {
            config.provider = provider;
        }

        if let Ok(package_id) = env::var("MARKET_PACKAGE_ID") {
            config.contract.package_id = package_id;
        }
        if let Some(gas_budget) = read_env::<u64>("MARKET_GAS_BUDGET") {
            config.contract.gas_budget = gas_budget;
        }

        if let Ok(url) = env::var("WALRUS_API_URL") {
            config.walrus.api_url = url;
        }
        if let Ok(url) = env::var("WALRUS_GATEWAY_URL") {
            config.walrus.gateway_url = url;
        }
        config.walrus.api_key = env::var("WALRUS_API_KEY").ok();

        config
    }

    /// Load configuration: environment first, then an optional TOML file
    /// named by `MARKET_CONFIG` overriding individual fields.
    pub fn load() -> Result<Self> {
        let mut config = Self::from_env();

        if let Ok(path) = env::var("MARKET_CONFIG") {
            let file = FileConfig::read(Path::new(&path))?;
            config.apply_file(file);
        }

        Ok(config)
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(provider) = file.provider.as_deref().and_then(ProviderKind::parse) {
            self.provider = provider;
        }
        if let Some(package_id) = file.package_id {
            self.contract.package_id = package_id;
        }
        if let Some(gas_budget) = file.gas_budget {
            self.contract.gas_budget = gas_budget;
        }
        if let Some(url) = file.walrus_api_url {
            self.walrus.api_url = url;
        }
        if let Some(url) = file.walrus_gateway_url {
            self.walrus.gateway_url = url;
        }
        if let Some(key) = file.walrus_api_key {
            self.walrus.api_key = Some(key);
        }
        if let Some(network) = file.sui_network.as_deref().and_then(SuiNetwork::parse) {
            self.sui.network = network;
        }
        if let Some(url) = file.sui_rpc_url {
            self.sui.rpc_url = Some(url);
        }
        if let Some(path) = file.sui_keystore_path {
            self.sui.keystore_path = Some(path);
        }
    }
}

/// Optional TOML overlay; every field overrides the environment value.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    provider: Option<String>,
    package_id: Option<String>,
    gas_budget: Option<u64>,
    walrus_api_url: Option<String>,
    walrus_gateway_url: Option<String>,
    walrus_api_key: Option<String>,
    sui_network: Option<String>,
    sui_rpc_url: Option<String>,
    sui_keystore_path: Option<PathBuf>,
}

impl FileConfig {
    fn read(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
