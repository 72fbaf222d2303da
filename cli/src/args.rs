use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use ethkl_types::NetworkId;
use ethkl_utils::LogFormat;
use ethkl_wallet_core::ClientConfig;

#[derive(Parser, Debug)]
#[command(name = "ethkl", about = "Lock ETH behind an NFC tag and claim it back")]
pub struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Network: "scroll-sepolia" or "anvil".
    #[arg(long, env = "ETHKL_NETWORK")]
    pub network: Option<NetworkId>,

    /// JSON-RPC endpoint (defaults to the network's public endpoint).
    #[arg(long, env = "ETHKL_RPC_URL")]
    pub rpc_url: Option<String>,

    /// Lock contract address.
    #[arg(long, env = "ETHKL_CONTRACT")]
    pub contract: Option<String>,

    /// Chain id the RPC endpoint must report.
    #[arg(long, env = "ETHKL_CHAIN_ID")]
    pub chain_id: Option<u64>,

    /// Signer key (hex). Without one the wallet stays disconnected.
    #[arg(long, env = "ETHKL_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "ETHKL_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "ETHKL_LOG_FORMAT")]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the balance of the connected account, or of `--address`.
    Balance {
        #[arg(long)]
        address: Option<String>,
    },
    /// Lock ETH and optionally write the lock hash to a tag.
    Lock {
        /// Amount in ETH, e.g. "0.01".
        #[arg(long)]
        amount: String,
        /// Tag image to write the lock hash to.
        #[arg(long)]
        tag: Option<PathBuf>,
    },
    /// Claim ETH from a lock, read from `--hash` or a tag.
    Claim {
        #[arg(long)]
        amount: String,
        #[arg(long, conflicts_with = "tag", required_unless_present = "tag")]
        hash: Option<String>,
        #[arg(long)]
        tag: Option<PathBuf>,
    },
    /// Show how much ETH is still claimable from a lock.
    Locked {
        #[arg(long)]
        hash: String,
    },
    /// List locks created by the connected account, or by `--sender`.
    Hashes {
        #[arg(long)]
        sender: Option<String>,
    },
    /// Show the claim history of a lock, newest first.
    History {
        #[arg(long, conflicts_with = "tag", required_unless_present = "tag")]
        hash: Option<String>,
        #[arg(long)]
        tag: Option<PathBuf>,
        /// Fetch per-claimer histories concurrently.
        #[arg(long)]
        concurrent: bool,
    },
    /// Raw tag operations.
    Tag {
        #[command(subcommand)]
        action: TagAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum TagAction {
    /// Print the text stored on a tag.
    Read {
        #[arg(long)]
        file: PathBuf,
    },
    /// Store text on a tag as a single Text record.
    Write {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        text: String,
    },
}

impl Cli {
    /// File config (or defaults) with CLI flags and env vars applied on top.
    pub fn resolve_config(&self) -> anyhow::Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::from_toml_file(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => ClientConfig::default(),
        };

        if let Some(network) = self.network {
            config.network = network;
        }
        if let Some(rpc_url) = &self.rpc_url {
            config.rpc_url = Some(rpc_url.clone());
        }
        if let Some(contract) = &self.contract {
            config.contract_address = contract.clone();
        }
        if let Some(chain_id) = self.chain_id {
            config.expected_chain_id = Some(chain_id);
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HASH: &str = "0x1b2f6c0e3e0d4c9a8b7a6f5e4d3c2b1a0f9e8d7c6b5a49382716051423324150";

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "ethkl",
            "--network",
            "anvil",
            "--log-format",
            "json",
            "history",
            "--hash",
            HASH,
            "--concurrent",
        ])
        .unwrap();
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.network, NetworkId::Anvil);
        assert_eq!(config.resolved_chain_id(), 31337);
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(matches!(cli.command, Command::History { concurrent: true, .. }));
    }

    #[test]
    fn flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "network = \"anvil\"\nlog_level = \"debug\"\nrpc_url = \"http://a\"").unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::try_parse_from(["ethkl", "--config", path, "--rpc-url", "http://b", "hashes"])
            .unwrap();
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.network, NetworkId::Anvil);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.resolved_rpc_url(), "http://b");
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli::try_parse_from(["ethkl", "--config", "/nonexistent/ethkl.toml", "hashes"])
            .unwrap();
        assert!(cli.resolve_config().is_err());
    }

    #[test]
    fn claim_needs_exactly_one_hash_source() {
        assert!(Cli::try_parse_from(["ethkl", "claim", "--amount", "1"]).is_err());
        assert!(Cli::try_parse_from([
            "ethkl", "claim", "--amount", "1", "--hash", HASH, "--tag", "t.ndef"
        ])
        .is_err());
        assert!(Cli::try_parse_from(["ethkl", "claim", "--amount", "1", "--tag", "t.ndef"]).is_ok());
    }

    #[test]
    fn tag_write_needs_text() {
        assert!(Cli::try_parse_from(["ethkl", "tag", "write", "--file", "t.ndef"]).is_err());
        let cli = Cli::try_parse_from(["ethkl", "tag", "read", "--file", "t.ndef"]).unwrap();
        assert!(matches!(cli.command, Command::Tag { action: TagAction::Read { .. } }));
    }

    #[test]
    fn unknown_network_rejected() {
        assert!(Cli::try_parse_from(["ethkl", "--network", "mainnet", "balance"]).is_err());
    }
}
