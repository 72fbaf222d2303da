use std::path::Path;

use ethkl_gateway::EthGatewayConfig;
use ethkl_types::{NetworkId, WalletAddress};
use ethkl_utils::LogFormat;
use serde::{Deserialize, Serialize};

use crate::error::WalletError;
use crate::history::FetchMode;

/// Lock contract deployed on Scroll Sepolia.
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x29Dc9A21190D63A8f2505B27a67b268377a0ed4c";

/// Environment variable the signer key is read from.
pub const DEFAULT_PRIVATE_KEY_ENV: &str = "ETHKL_PRIVATE_KEY";

/// Client configuration, loaded from TOML. Every field has a default.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_network")]
    pub network: NetworkId,
    /// Overrides the network's public RPC endpoint.
    #[serde(default)]
    pub rpc_url: Option<String>,
    #[serde(default = "default_contract_address")]
    pub contract_address: String,
    /// Overrides the network's chain id for the connect-time check.
    #[serde(default)]
    pub expected_chain_id: Option<u64>,
    /// Name of the environment variable holding the signer key.
    #[serde(default = "default_private_key_env")]
    pub private_key_env: String,
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Fetch claim histories concurrently.
    #[serde(default)]
    pub concurrent_history: bool,
}

fn default_network() -> NetworkId {
    NetworkId::ScrollSepolia
}
fn default_contract_address() -> String {
    DEFAULT_CONTRACT_ADDRESS.to_string()
}
fn default_private_key_env() -> String {
    DEFAULT_PRIVATE_KEY_ENV.to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            network: default_network(),
            rpc_url: None,
            contract_address: default_contract_address(),
            expected_chain_id: None,
            private_key_env: default_private_key_env(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            concurrent_history: false,
        }
    }
}

impl ClientConfig {
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, WalletError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| WalletError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, WalletError> {
        toml::from_str(text).map_err(|e| WalletError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, WalletError> {
        toml::to_string_pretty(self).map_err(|e| WalletError::Config(e.to_string()))
    }

    pub fn resolved_rpc_url(&self) -> String {
        self.rpc_url
            .clone()
            .unwrap_or_else(|| self.network.default_rpc_url().to_string())
    }

    pub fn resolved_chain_id(&self) -> u64 {
        self.expected_chain_id
            .unwrap_or_else(|| self.network.chain_id())
    }

    pub fn contract(&self) -> Result<WalletAddress, WalletError> {
        self.contract_address
            .parse()
            .map_err(|e: ethkl_types::TypeError| WalletError::Config(e.to_string()))
    }

    pub fn fetch_mode(&self) -> FetchMode {
        if self.concurrent_history {
            FetchMode::Concurrent
        } else {
            FetchMode::Sequential
        }
    }

    /// Gateway settings for this config and the given signer key.
    pub fn gateway_config(&self, private_key: String) -> Result<EthGatewayConfig, WalletError> {
        Ok(EthGatewayConfig {
            rpc_url: self.resolved_rpc_url(),
            contract_address: self.contract()?,
            expected_chain_id: Some(self.resolved_chain_id()),
            private_key,
        })
    }
}
