//! ethkl: lock ETH behind an NFC tag, claim it, inspect claim history.

mod args;
mod commands;
mod render;

use std::sync::Arc;

use anyhow::Context;
use args::{Cli, Command};
use clap::Parser;
use ethkl_gateway::{EthGateway, EthSigner};
use ethkl_wallet_core::{ClientConfig, WalletSession};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    ethkl_utils::init_logging(config.log_format, &config.log_level);

    if let Some(path) = &cli.config {
        tracing::debug!("loaded config from {}", path.display());
    }

    let lines = match &cli.command {
        Command::Tag { action } => commands::run_tag(action)?,
        command => {
            let session = connect(&config, cli.private_key.clone()).await?;
            commands::execute(&session, command, config.fetch_mode()).await?
        }
    };

    for line in lines {
        println!("{line}");
    }
    Ok(())
}

/// Connect when a signer key is available; otherwise stay disconnected.
async fn connect(config: &ClientConfig, private_key: Option<String>) -> anyhow::Result<WalletSession> {
    let key = private_key
        .or_else(|| std::env::var(&config.private_key_env).ok())
        .filter(|key| !key.trim().is_empty());
    let Some(key) = key else {
        tracing::warn!(
            env = %config.private_key_env,
            "no private key configured, wallet not connected"
        );
        return Ok(WalletSession::new());
    };

    tracing::info!(
        "connecting to {} network at {}",
        config.network.as_str(),
        config.resolved_rpc_url()
    );
    let gateway = EthGateway::<EthSigner>::connect(&config.gateway_config(key)?)
        .await
        .context("connecting to the lock contract")?;
    Ok(WalletSession::connected(Arc::new(gateway)))
}
