//! Network identifier.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::TypeError;

/// Identifies which EVM chain the client talks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NetworkId {
    /// Scroll Sepolia testnet, where the lock contract is deployed.
    ScrollSepolia,
    /// A local Anvil / Hardhat node.
    Anvil,
}

impl NetworkId {
    /// EIP-155 chain id.
    pub fn chain_id(&self) -> u64 {
        match self {
            Self::ScrollSepolia => 534_351,
            Self::Anvil => 31_337,
        }
    }

    /// Public RPC endpoint used when no override is configured.
    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Self::ScrollSepolia => "https://sepolia-rpc.scroll.io/",
            Self::Anvil => "http://127.0.0.1:8545",
        }
    }

    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ScrollSepolia => "scroll-sepolia",
            Self::Anvil => "anvil",
        }
    }
}

impl FromStr for NetworkId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scroll-sepolia" | "scroll_sepolia" | "scroll" => Ok(Self::ScrollSepolia),
            "anvil" | "local" | "dev" => Ok(Self::Anvil),
            other => Err(TypeError::UnknownNetwork(other.to_string())),
        }
    }
}
