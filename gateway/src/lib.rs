//! Contract gateway for the ETH lock contract.
//!
//! Everything that touches the chain goes through [`ContractGateway`]. The
//! rest of the workspace depends only on the trait; [`EthGateway`] is the
//! production implementation on top of `ethers`, and the nullables crate
//! provides an in-memory one for tests.

pub mod abi;
pub mod error;
pub mod eth;

use async_trait::async_trait;
use ethkl_types::{ClaimHistory, LockHash, TransactionEntry, WalletAddress, WeiAmount};

pub use error::GatewayError;
pub use eth::{EthGateway, EthGatewayConfig, EthSigner};

/// Outcome of a confirmed `lockEth` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LockReceipt {
    /// Lock id emitted by the `EthLocked` event.
    pub lock_hash: LockHash,
    /// Chain transaction hash (`0x`-prefixed hex).
    pub tx_hash: String,
    pub amount: WeiAmount,
}

/// Outcome of a confirmed `claimEth` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimReceipt {
    pub lock_hash: LockHash,
    pub tx_hash: String,
    pub amount: WeiAmount,
}

/// The read/write surface of the lock contract, bound to one signer account.
#[async_trait]
pub trait ContractGateway: Send + Sync {
    /// The signer account every write is sent from.
    fn account(&self) -> WalletAddress;

    /// Native balance of `address`.
    async fn balance_of(&self, address: &WalletAddress) -> Result<WeiAmount, GatewayError>;

    /// Lock snapshot, or `None` when the contract has never seen `hash`.
    async fn get_transaction(
        &self,
        hash: &LockHash,
    ) -> Result<Option<TransactionEntry>, GatewayError>;

    /// Raw claim arrays for one claimer of one lock.
    async fn get_claim_history(
        &self,
        hash: &LockHash,
        claimer: &WalletAddress,
    ) -> Result<ClaimHistory, GatewayError>;

    /// Lock hashes created by `sender`, oldest first.
    async fn get_transaction_hashes_by_sender(
        &self,
        sender: &WalletAddress,
    ) -> Result<Vec<LockHash>, GatewayError>;

    /// ETH still claimable from a lock.
    async fn get_locked_eth_amount(&self, hash: &LockHash) -> Result<WeiAmount, GatewayError>;

    /// Lock `value` wei and wait for the receipt.
    async fn lock_eth(&self, value: WeiAmount) -> Result<LockReceipt, GatewayError>;

    /// Claim `amount` wei from a lock and wait for the receipt.
    async fn claim_eth(
        &self,
        hash: &LockHash,
        amount: WeiAmount,
    ) -> Result<ClaimReceipt, GatewayError>;
}
