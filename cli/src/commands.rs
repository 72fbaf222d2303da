//! Subcommand execution against a wallet session.

use std::path::Path;

use anyhow::Context;
use ethkl_nfc::{read_tag_text, write_tag_text, FileTag};
use ethkl_types::{LockHash, WalletAddress};
use ethkl_wallet_core::balance::{format_account, format_balance};
use ethkl_wallet_core::{FetchMode, WalletSession};
use tracing::info;

use crate::args::{Command, TagAction};
use crate::render::{render_hashes, render_history};

/// Run one chain command and return the lines to print.
pub async fn execute(
    session: &WalletSession,
    command: &Command,
    default_mode: FetchMode,
) -> anyhow::Result<Vec<String>> {
    match command {
        Command::Balance { address } => match address {
            Some(address) => {
                let address: WalletAddress = address.parse()?;
                Ok(vec![format_balance(session.balance_of(&address).await?)])
            }
            None => {
                let balance = session.balance().await?;
                Ok(vec![
                    format_account(session.address().as_ref()),
                    format_balance(balance),
                ])
            }
        },
        Command::Lock { amount, tag } => {
            let receipt = session.lock_eth(amount).await?;
            let mut lines = vec![
                format!("Locked {} ETH", receipt.amount.to_ether_string()),
                format!("Lock hash: {}", receipt.lock_hash),
                format!("Transaction: {}", receipt.tx_hash),
            ];
            if let Some(path) = tag {
                write_tag_text(&mut FileTag::new(path), &receipt.lock_hash.to_string())
                    .with_context(|| {
                        format!("ETH locked under {} but the tag write failed", receipt.lock_hash)
                    })?;
                lines.push(format!("Lock hash written to {}", path.display()));
            }
            Ok(lines)
        }
        Command::Claim { amount, hash, tag } => {
            let hash_text = resolve_hash_text(hash.as_deref(), tag.as_deref())?;
            let receipt = session.claim_eth(&hash_text, amount).await?;
            Ok(vec![
                format!(
                    "Claimed {} ETH from {}",
                    receipt.amount.to_ether_string(),
                    receipt.lock_hash
                ),
                format!("Transaction: {}", receipt.tx_hash),
            ])
        }
        Command::Locked { hash } => {
            let hash: LockHash = hash.parse()?;
            let amount = session.locked_amount(&hash).await?;
            Ok(vec![format!("Locked: {} ETH", amount.to_ether_string())])
        }
        Command::Hashes { sender } => {
            let hashes = match sender {
                Some(sender) => session.transaction_hashes_of(&sender.parse()?).await?,
                None => session.transaction_hashes().await?,
            };
            Ok(render_hashes(&hashes))
        }
        Command::History {
            hash,
            tag,
            concurrent,
        } => {
            let hash = resolve_hash(hash.as_deref(), tag.as_deref())?;
            let mode = if *concurrent {
                FetchMode::Concurrent
            } else {
                default_mode
            };
            let reconciliation = session.claim_history(&hash, mode).await?;
            Ok(render_history(&hash, &reconciliation))
        }
        Command::Tag { action } => run_tag(action),
    }
}

/// Tag commands need no wallet.
pub fn run_tag(action: &TagAction) -> anyhow::Result<Vec<String>> {
    match action {
        TagAction::Read { file } => Ok(vec![read_tag_text(&mut FileTag::new(file))?]),
        TagAction::Write { file, text } => {
            write_tag_text(&mut FileTag::new(file), text)?;
            Ok(vec![format!("Wrote {} bytes of text to {}", text.len(), file.display())])
        }
    }
}

/// The lock hash as typed with `--hash` or scanned from `--tag`, unparsed.
fn resolve_hash_text(hash: Option<&str>, tag: Option<&Path>) -> anyhow::Result<String> {
    match (hash, tag) {
        (Some(hash), _) => Ok(hash.to_string()),
        (None, Some(path)) => {
            let text = read_tag_text(&mut FileTag::new(path))
                .with_context(|| format!("reading lock hash from {}", path.display()))?;
            info!(%text, "lock hash scanned");
            Ok(text)
        }
        (None, None) => anyhow::bail!("either --hash or --tag is required"),
    }
}

fn resolve_hash(hash: Option<&str>, tag: Option<&Path>) -> anyhow::Result<LockHash> {
    let text = resolve_hash_text(hash, tag)?;
    text.parse()
        .with_context(|| format!("{text:?} is not a lock hash"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Cli;
    use clap::Parser;
    use ethkl_nullables::{GatewayCall, NullGateway};
    use ethkl_types::WeiAmount;
    use std::sync::Arc;

    fn parse(args: &[&str]) -> Command {
        let mut argv = vec!["ethkl"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command
    }

    async fn run(session: &WalletSession, args: &[&str]) -> anyhow::Result<Vec<String>> {
        execute(session, &parse(args), FetchMode::Sequential).await
    }

    #[tokio::test]
    async fn lock_to_tag_then_claim_from_tag() {
        let dir = tempfile::tempdir().unwrap();
        let tag = dir.path().join("tag.ndef");
        let tag = tag.to_str().unwrap();

        let chain = NullGateway::funded(WalletAddress::from_low_u64(1), WeiAmount::from_ether(2));
        let sender = WalletSession::connected(Arc::new(chain.clone()));
        let claimer =
            WalletSession::connected(Arc::new(chain.with_account(WalletAddress::from_low_u64(2))));

        let lines = run(&sender, &["lock", "--amount", "1", "--tag", tag]).await.unwrap();
        assert_eq!(lines[0], "Locked 1.0 ETH");

        let lines = run(&claimer, &["claim", "--amount", "0.25", "--tag", tag])
            .await
            .unwrap();
        assert!(lines[0].starts_with("Claimed 0.25 ETH from 0x"));

        let lines = run(&sender, &["history", "--tag", tag]).await.unwrap();
        assert_eq!(lines.len(), 3);
        assert!(lines[2].contains("| 0.25 ETH |"));

        let hashes = run(&sender, &["hashes"]).await.unwrap();
        let lines = run(&sender, &["locked", "--hash", &hashes[0]]).await.unwrap();
        assert_eq!(lines, vec!["Locked: 0.75 ETH"]);
    }

    #[tokio::test]
    async fn balance_lines() {
        let chain = NullGateway::funded(WalletAddress::from_low_u64(1), WeiAmount::from_ether(2));
        let session = WalletSession::connected(Arc::new(chain));
        let lines = run(&session, &["balance"]).await.unwrap();
        assert_eq!(lines[1], "Balance: 2.0000 ETH");
    }

    #[tokio::test]
    async fn disconnected_wallet_asks_to_connect() {
        let session = WalletSession::new();
        let err = run(&session, &["balance"]).await.unwrap_err();
        assert_eq!(err.to_string(), "Please connect your wallet first");
    }

    #[tokio::test]
    async fn hashes_for_unknown_sender() {
        let session = WalletSession::connected(Arc::new(NullGateway::new(
            WalletAddress::from_low_u64(1),
        )));
        let lines = run(
            &session,
            &["hashes", "--sender", "0x29dc9a21190d63a8f2505b27a67b268377a0ed4c"],
        )
        .await
        .unwrap();
        assert_eq!(lines, vec!["No transactions found"]);
    }

    #[test]
    fn tag_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("tag.ndef");
        let file = file.to_str().unwrap();

        let Command::Tag { action } = parse(&["tag", "write", "--file", file, "--text", "hello"])
        else {
            panic!("expected tag command");
        };
        run_tag(&action).unwrap();

        let Command::Tag { action } = parse(&["tag", "read", "--file", file]) else {
            panic!("expected tag command");
        };
        assert_eq!(run_tag(&action).unwrap(), vec!["hello"]);
    }

    #[test]
    fn non_hash_tag_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("tag.ndef");
        write_tag_text(&mut FileTag::new(&file), "not a hash").unwrap();
        assert!(resolve_hash(None, Some(&file)).is_err());
    }

    #[tokio::test]
    async fn claim_from_non_hash_tag_sends_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("tag.ndef");
        write_tag_text(&mut FileTag::new(&file), "not a hash").unwrap();

        let chain = NullGateway::funded(WalletAddress::from_low_u64(1), WeiAmount::from_ether(2));
        let session = WalletSession::connected(Arc::new(chain.clone()));
        let err = run(
            &session,
            &["claim", "--amount", "1", "--tag", file.to_str().unwrap()],
        )
        .await
        .unwrap_err();
        assert!(err.to_string().starts_with("invalid lock hash"));
        assert_eq!(chain.call_count(GatewayCall::ClaimEth), 0);
    }
}
