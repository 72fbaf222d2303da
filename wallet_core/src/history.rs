//! Claim-history reconciliation.
//!
//! A lock's claim history is not stored as one list on chain. The lock
//! entry carries the claimer addresses, and each claimer has a pair of
//! parallel `amounts`/`timestamps` arrays. Reconciling a lock flattens those
//! arrays into one list of [`ClaimRecord`]s ordered newest first.

use std::cmp::Reverse;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use ethkl_gateway::ContractGateway;
use ethkl_types::{ClaimHistory, ClaimRecord, LockHash, WalletAddress};
use futures_util::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::error::WalletError;

/// How per-claimer histories are fetched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    /// One request at a time, in claimer order.
    #[default]
    Sequential,
    /// All requests in flight at once. Results are merged in claimer order.
    Concurrent,
}

/// The flattened history of one lock.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Newest first. Equal timestamps keep claimer order, then array order.
    pub records: Vec<ClaimRecord>,
    /// Claimers skipped because their arrays had different lengths.
    pub excluded_claimers: usize,
    /// Raw entries dropped along with those claimers.
    pub excluded_entries: usize,
}

impl Reconciliation {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.excluded_claimers == 0
    }
}

/// Merge per-claimer histories, given in claimer order.
///
/// A claimer whose arrays do not line up contributes nothing and is counted
/// in the exclusion totals. A claimer listed twice contributes twice.
pub fn merge_histories<I>(histories: I) -> Reconciliation
where
    I: IntoIterator<Item = (WalletAddress, ClaimHistory)>,
{
    let mut merged = Reconciliation::default();

    for (claimer, history) in histories {
        if !history.is_consistent() {
            warn!(
                %claimer,
                amounts = history.amounts.len(),
                timestamps = history.timestamps.len(),
                "claim arrays differ in length, skipping claimer"
            );
            merged.excluded_claimers += 1;
            merged.excluded_entries += history.raw_len();
            continue;
        }

        merged.records.extend(
            history
                .amounts
                .into_iter()
                .zip(history.timestamps)
                .map(|(amount, timestamp)| ClaimRecord {
                    claimer,
                    amount,
                    timestamp,
                }),
        );
    }

    // sort_by_key is stable
    merged.records.sort_by_key(|record| Reverse(record.timestamp));
    merged
}

/// Fetch and flatten the claim history of one lock.
///
/// An unknown lock, or one nobody has claimed from, yields an empty result.
/// Any gateway failure fails the whole call; partial results are discarded.
pub async fn reconcile<G>(
    gateway: &G,
    hash: &LockHash,
    mode: FetchMode,
) -> Result<Reconciliation, WalletError>
where
    G: ContractGateway + ?Sized,
{
    let claimers = match gateway.get_transaction(hash).await? {
        Some(entry) if !entry.claimers.is_empty() => entry.claimers,
        Some(_) => {
            debug!(%hash, "lock has no claimers");
            return Ok(Reconciliation::default());
        }
        None => {
            debug!(%hash, "lock not found");
            return Ok(Reconciliation::default());
        }
    };

    debug!(%hash, claimers = claimers.len(), ?mode, "fetching claim histories");

    let histories = match mode {
        FetchMode::Sequential => {
            let mut histories = Vec::with_capacity(claimers.len());
            for claimer in &claimers {
                histories.push(gateway.get_claim_history(hash, claimer).await?);
            }
            histories
        }
        FetchMode::Concurrent => {
            try_join_all(
                claimers
                    .iter()
                    .map(|claimer| gateway.get_claim_history(hash, claimer)),
            )
            .await?
        }
    };

    let merged = merge_histories(claimers.into_iter().zip(histories));
    debug!(
        %hash,
        records = merged.records.len(),
        excluded = merged.excluded_claimers,
        "claim history reconciled"
    );
    Ok(merged)
}

/// Locks created by `sender`, most recent first.
pub async fn list_transaction_hashes_for_sender<G>(
    gateway: &G,
    sender: &WalletAddress,
) -> Result<Vec<LockHash>, WalletError>
where
    G: ContractGateway + ?Sized,
{
    let mut hashes = gateway.get_transaction_hashes_by_sender(sender).await?;
    hashes.reverse();
    Ok(hashes)
}

/// What a history view shows after a load finished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HistoryOutcome {
    Loaded {
        hash: LockHash,
        reconciliation: Reconciliation,
    },
    Failed {
        hash: LockHash,
        message: String,
    },
}

impl HistoryOutcome {
    pub fn hash(&self) -> &LockHash {
        match self {
            HistoryOutcome::Loaded { hash, .. } | HistoryOutcome::Failed { hash, .. } => hash,
        }
    }
}

/// Sequence number handed out by [`HistoryBoard::begin`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Holds the history currently on display.
///
/// History loads can be re-triggered while an earlier one is still running.
/// Only the most recently started load may publish, so a slow early load
/// never overwrites a later one.
#[derive(Debug, Default)]
pub struct HistoryBoard {
    issued: AtomicU64,
    shown: Mutex<Option<HistoryOutcome>>,
}

impl HistoryBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load. Invalidates every earlier ticket.
    pub fn begin(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` belongs to the most recently started load.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }

    /// Show `outcome` if `ticket` is still current. Returns whether it was shown.
    pub fn publish(&self, ticket: Ticket, outcome: HistoryOutcome) -> bool {
        let mut shown = self.shown.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.is_current(ticket) {
            debug!(hash = %outcome.hash(), "dropping stale history result");
            return false;
        }
        *shown = Some(outcome);
        true
    }

    pub fn current(&self) -> Option<HistoryOutcome> {
        self.shown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Reconcile `hash` and publish the result. Failures are shown, not returned.
    pub async fn refresh<G>(&self, gateway: &G, hash: &LockHash, mode: FetchMode) -> bool
    where
        G: ContractGateway + ?Sized,
    {
        let ticket = self.begin();
        let outcome = match reconcile(gateway, hash, mode).await {
            Ok(reconciliation) => HistoryOutcome::Loaded {
                hash: *hash,
                reconciliation,
            },
            Err(e) => {
                error!(%hash, "error fetching transaction history: {e}");
                HistoryOutcome::Failed {
                    hash: *hash,
                    message: e.to_string(),
                }
            }
        };
        self.publish(ticket, outcome)
    }
}
