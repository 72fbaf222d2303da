//! Plain-text output for the subcommands.

use ethkl_types::{ClaimRecord, LockHash};
use ethkl_utils::{format_malaysia_time, shorten_key};
use ethkl_wallet_core::Reconciliation;

/// `0x29...ed4c | 1.5 ETH | 15/01/2024, 3:30:05 pm`
pub fn history_row(record: &ClaimRecord) -> String {
    format!(
        "{} | {} ETH | {}",
        shorten_key(&record.claimer.to_string()),
        record.amount.to_ether_string(),
        format_malaysia_time(record.timestamp)
    )
}

pub fn render_history(hash: &LockHash, reconciliation: &Reconciliation) -> Vec<String> {
    let mut lines = vec![format!("Claim history for {hash}")];
    if reconciliation.is_empty() {
        lines.push("No claims yet".to_string());
    } else {
        lines.push("Claimer | Amount | Time (MYT)".to_string());
        lines.extend(reconciliation.records.iter().map(history_row));
    }
    if !reconciliation.is_complete() {
        lines.push(format!(
            "{} claimer(s) skipped, {} entries with mismatched contract data",
            reconciliation.excluded_claimers, reconciliation.excluded_entries
        ));
    }
    lines
}

pub fn render_hashes(hashes: &[LockHash]) -> Vec<String> {
    if hashes.is_empty() {
        return vec!["No transactions found".to_string()];
    }
    hashes.iter().map(|hash| hash.to_string()).collect()
}
