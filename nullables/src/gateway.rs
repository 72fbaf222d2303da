//! Nullable contract gateway: an in-memory lock contract for testing.
//!
//! Several [`NullGateway`]s can share one ledger (see
//! [`NullGateway::with_account`]), so a locker and a claimer can be modelled
//! as two wallets on the same chain.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use ethers::utils::keccak256;
use ethkl_gateway::{ClaimReceipt, ContractGateway, GatewayError, LockReceipt};
use ethkl_types::{ClaimHistory, LockHash, TransactionEntry, WalletAddress, WeiAmount};

use crate::clock::NullClock;

/// Gateway operations, for the call log and failure injection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GatewayCall {
    BalanceOf,
    GetTransaction,
    GetClaimHistory,
    GetTransactionHashesBySender,
    GetLockedEthAmount,
    LockEth,
    ClaimEth,
}

#[derive(Default)]
struct Ledger {
    balances: HashMap<WalletAddress, WeiAmount>,
    locks: HashMap<LockHash, TransactionEntry>,
    histories: HashMap<(LockHash, WalletAddress), ClaimHistory>,
    by_sender: HashMap<WalletAddress, Vec<LockHash>>,
    nonce: u64,
    failures: HashMap<GatewayCall, String>,
    history_failures: HashMap<WalletAddress, String>,
    history_delays: HashMap<WalletAddress, Duration>,
    calls: Vec<GatewayCall>,
}

impl Ledger {
    fn record(&mut self, call: GatewayCall) -> Result<(), GatewayError> {
        self.calls.push(call);
        match self.failures.get(&call) {
            Some(message) => Err(GatewayError::Rpc(message.clone())),
            None => Ok(()),
        }
    }

    fn next_tx_hash(&mut self) -> String {
        self.nonce += 1;
        format!("0x{:064x}", self.nonce)
    }
}

struct Chain {
    ledger: Mutex<Ledger>,
    clock: NullClock,
}

/// An in-memory [`ContractGateway`] bound to one account.
/// Thread-safe for use with tokio's multi-threaded runtime.
#[derive(Clone)]
pub struct NullGateway {
    account: WalletAddress,
    chain: Arc<Chain>,
}

impl NullGateway {
    /// A fresh chain with `account` holding no ETH.
    pub fn new(account: WalletAddress) -> Self {
        Self {
            account,
            chain: Arc::new(Chain {
                ledger: Mutex::new(Ledger::default()),
                clock: NullClock::default(),
            }),
        }
    }

    /// A fresh chain with `account` holding `balance`.
    pub fn funded(account: WalletAddress, balance: WeiAmount) -> Self {
        let gateway = Self::new(account);
        gateway.fund(account, balance);
        gateway
    }

    /// Another wallet on the same chain.
    pub fn with_account(&self, account: WalletAddress) -> Self {
        Self {
            account,
            chain: Arc::clone(&self.chain),
        }
    }

    /// The chain clock. Claims are stamped with its current time.
    pub fn clock(&self) -> &NullClock {
        &self.chain.clock
    }

    pub fn fund(&self, address: WalletAddress, amount: WeiAmount) {
        self.ledger().balances.insert(address, amount);
    }

    /// Store a lock entry as-is, bypassing contract rules.
    pub fn insert_lock(&self, entry: TransactionEntry) {
        let mut ledger = self.ledger();
        ledger
            .by_sender
            .entry(entry.sender)
            .or_default()
            .push(entry.hash);
        ledger.locks.insert(entry.hash, entry);
    }

    /// Replace the raw claim arrays returned for one claimer of one lock.
    pub fn set_claim_history(&self, hash: LockHash, claimer: WalletAddress, history: ClaimHistory) {
        self.ledger().histories.insert((hash, claimer), history);
    }

    /// Make every `call` fail with an RPC error until cleared.
    pub fn fail(&self, call: GatewayCall, message: impl Into<String>) {
        self.ledger().failures.insert(call, message.into());
    }

    /// Make history fetches for one claimer fail.
    pub fn fail_history_for(&self, claimer: WalletAddress, message: impl Into<String>) {
        self.ledger()
            .history_failures
            .insert(claimer, message.into());
    }

    /// Hold history responses for one claimer back by `delay`.
    pub fn delay_history_for(&self, claimer: WalletAddress, delay: Duration) {
        self.ledger().history_delays.insert(claimer, delay);
    }

    pub fn clear_failures(&self) {
        let mut ledger = self.ledger();
        ledger.failures.clear();
        ledger.history_failures.clear();
    }

    /// Every call made on this chain, in order.
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.ledger().calls.clone()
    }

    pub fn call_count(&self, call: GatewayCall) -> usize {
        self.ledger().calls.iter().filter(|c| **c == call).count()
    }

    fn ledger(&self) -> std::sync::MutexGuard<'_, Ledger> {
        self.chain.ledger.lock().unwrap()
    }
}

#[async_trait]
impl ContractGateway for NullGateway {
    fn account(&self) -> WalletAddress {
        self.account
    }

    async fn balance_of(&self, address: &WalletAddress) -> Result<WeiAmount, GatewayError> {
        let mut ledger = self.ledger();
        ledger.record(GatewayCall::BalanceOf)?;
        Ok(ledger.balances.get(address).copied().unwrap_or_default())
    }

    async fn get_transaction(
        &self,
        hash: &LockHash,
    ) -> Result<Option<TransactionEntry>, GatewayError> {
        let mut ledger = self.ledger();
        ledger.record(GatewayCall::GetTransaction)?;
        Ok(ledger.locks.get(hash).cloned())
    }

    async fn get_claim_history(
        &self,
        hash: &LockHash,
        claimer: &WalletAddress,
    ) -> Result<ClaimHistory, GatewayError> {
        let delay = {
            let mut ledger = self.ledger();
            ledger.record(GatewayCall::GetClaimHistory)?;
            ledger.history_delays.get(claimer).copied()
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let ledger = self.ledger();
        if let Some(message) = ledger.history_failures.get(claimer) {
            return Err(GatewayError::Rpc(message.clone()));
        }
        Ok(ledger
            .histories
            .get(&(*hash, *claimer))
            .cloned()
            .unwrap_or_default())
    }

    async fn get_transaction_hashes_by_sender(
        &self,
        sender: &WalletAddress,
    ) -> Result<Vec<LockHash>, GatewayError> {
        let mut ledger = self.ledger();
        ledger.record(GatewayCall::GetTransactionHashesBySender)?;
        Ok(ledger.by_sender.get(sender).cloned().unwrap_or_default())
    }

    async fn get_locked_eth_amount(&self, hash: &LockHash) -> Result<WeiAmount, GatewayError> {
        let mut ledger = self.ledger();
        ledger.record(GatewayCall::GetLockedEthAmount)?;
        Ok(ledger
            .locks
            .get(hash)
            .map(|entry| entry.amount.saturating_sub(entry.claimed))
            .unwrap_or_default())
    }

    async fn lock_eth(&self, value: WeiAmount) -> Result<LockReceipt, GatewayError> {
        let mut ledger = self.ledger();
        ledger.record(GatewayCall::LockEth)?;

        if value.is_zero() {
            return Err(GatewayError::Reverted("Amount must be greater than 0".into()));
        }
        let balance = ledger.balances.get(&self.account).copied().unwrap_or_default();
        let remaining = balance
            .checked_sub(value)
            .ok_or_else(|| GatewayError::Rpc("insufficient funds for value".into()))?;

        let tx_hash = ledger.next_tx_hash();
        let mut preimage = self.account.inner().as_bytes().to_vec();
        preimage.extend_from_slice(&ledger.nonce.to_be_bytes());
        let lock_hash = LockHash::new(keccak256(preimage));

        ledger.balances.insert(self.account, remaining);
        ledger.locks.insert(
            lock_hash,
            TransactionEntry {
                hash: lock_hash,
                sender: self.account,
                amount: value,
                claimed: WeiAmount::ZERO,
                claimers: Vec::new(),
            },
        );
        ledger.by_sender.entry(self.account).or_default().push(lock_hash);

        Ok(LockReceipt {
            lock_hash,
            tx_hash,
            amount: value,
        })
    }

    async fn claim_eth(
        &self,
        hash: &LockHash,
        amount: WeiAmount,
    ) -> Result<ClaimReceipt, GatewayError> {
        let now = self.chain.clock.now();
        let mut ledger = self.ledger();
        ledger.record(GatewayCall::ClaimEth)?;

        let entry = ledger
            .locks
            .get_mut(hash)
            .ok_or_else(|| GatewayError::Reverted("Transaction does not exist".into()))?;
        if amount.is_zero() {
            return Err(GatewayError::Reverted("Amount must be greater than 0".into()));
        }
        if entry.amount.saturating_sub(entry.claimed) < amount {
            return Err(GatewayError::Reverted("Insufficient locked ETH".into()));
        }
        entry.claimed = entry
            .claimed
            .checked_add(amount)
            .ok_or_else(|| GatewayError::Reverted("overflow".into()))?;
        if !entry.claimers.contains(&self.account) {
            entry.claimers.push(self.account);
        }

        let history = ledger.histories.entry((*hash, self.account)).or_default();
        history.amounts.push(amount);
        history.timestamps.push(now);

        let balance = ledger.balances.entry(self.account).or_default();
        *balance = balance.checked_add(amount).unwrap_or(*balance);

        Ok(ClaimReceipt {
            lock_hash: *hash,
            tx_hash: ledger.next_tx_hash(),
            amount,
        })
    }
}
