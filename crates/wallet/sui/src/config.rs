//! Sui network configuration.

use std::env;
use std::path::PathBuf;

/// Target Sui network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuiNetwork {
    Mainnet,
    #[default]
    Testnet,
    Devnet,
    Local,
}

impl SuiNetwork {
    /// Default fullnode RPC URL for this network.
    pub fn rpc_url(&self) -> &'static str {
        match self {
            SuiNetwork::Mainnet => "https://fullnode.mainnet.sui.io:443",
            SuiNetwork::Testnet => "https://fullnode.testnet.sui.io:443",
            SuiNetwork::Devnet => "https://fullnode.devnet.sui.io:443",
            SuiNetwork::Local => "http://127.0.0.1:9000",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SuiNetwork::Mainnet => "mainnet",
            SuiNetwork::Testnet => "testnet",
            SuiNetwork::Devnet => "devnet",
            SuiNetwork::Local => "local",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "mainnet" => Some(SuiNetwork::Mainnet),
            "testnet" => Some(SuiNetwork::Testnet),
            "devnet" => Some(SuiNetwork::Devnet),
            "local" => Some(SuiNetwork::Local),
            _ => None,
        }
    }
}

/// Configuration for the Sui signing provider.
#[derive(Debug, Clone, Default)]
pub struct SuiConfig {
    pub network: SuiNetwork,

    /// Overrides the network's default fullnode URL when set.
    pub rpc_url: Option<String>,

    /// Keystore location; defaults to the Sui CLI keystore.
    pub keystore_path: Option<PathBuf>,
}

impl SuiConfig {
    pub fn new(network: SuiNetwork) -> Self {
        Self {
            network,
            rpc_url: None,
            keystore_path: None,
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SUI_NETWORK` - `mainnet` / `testnet` / `devnet` / `local` (default: testnet)
    /// - `SUI_RPC_URL` - fullnode URL override
    /// - `SUI_KEYSTORE_PATH` - keystore file override
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(network) = env::var("SUI_NETWORK").ok().and_then(|n| SuiNetwork::parse(&n)) {
            config.network = network;
        }
        config.rpc_url = env::var("SUI_RPC_URL").ok();
        config.keystore_path = env::var("SUI_KEYSTORE_PATH").ok().map(PathBuf::from);

        config
    }

    /// Effective RPC URL.
    pub fn rpc_url(&self) -> &str {
        self.rpc_url
            .as_deref()
            .unwrap_or_else(|| self.network.rpc_url())
    }

    /// Effective keystore path.
    pub fn keystore_path(&self) -> PathBuf {
        self.keystore_path
            .clone()
            .unwrap_or_else(default_keystore_path)
    }

    pub fn validate(&self) -> Result<(), String> {
        let url = self.rpc_url();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(format!("invalid RPC URL: {url}"));
        }
        Ok(())
    }
}

fn default_keystore_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".sui")
        .join("sui_config")
        .join("sui.keystore")
}
