//! Claim-side records read from the lock contract.

use serde::{Deserialize, Serialize};

use crate::{LockHash, Timestamp, WalletAddress, WeiAmount};

/// One claim event: who claimed how much, and when.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub claimer: WalletAddress,
    pub amount: WeiAmount,
    pub timestamp: Timestamp,
}

/// Snapshot of a lock as returned by `getTransaction`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEntry {
    pub hash: LockHash,
    pub sender: WalletAddress,
    /// Total ETH locked by the sender.
    pub amount: WeiAmount,
    /// ETH claimed so far.
    pub claimed: WeiAmount,
    /// Claimers in contract order. Duplicates are kept as returned.
    pub claimers: Vec<WalletAddress>,
}

/// Raw per-claimer arrays as returned by `getClaimHistory`.
///
/// The two vectors are parallel; the contract is expected to keep them the
/// same length but nothing here enforces it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimHistory {
    pub amounts: Vec<WeiAmount>,
    pub timestamps: Vec<Timestamp>,
}

impl ClaimHistory {
    pub fn new(amounts: Vec<WeiAmount>, timestamps: Vec<Timestamp>) -> Self {
        Self { amounts, timestamps }
    }

    /// Whether the parallel arrays line up.
    pub fn is_consistent(&self) -> bool {
        self.amounts.len() == self.timestamps.len()
    }

    /// Number of raw entries carried, counting the longer array.
    pub fn raw_len(&self) -> usize {
        self.amounts.len().max(self.timestamps.len())
    }
}
