//! The connected wallet.

use std::sync::Arc;

use ethkl_gateway::{ClaimReceipt, ContractGateway, LockReceipt};
use ethkl_types::{LockHash, WalletAddress, WeiAmount};
use tracing::{info, warn};

use crate::error::WalletError;
use crate::history::{list_transaction_hashes_for_sender, reconcile, FetchMode, Reconciliation};
use crate::transaction_builder::{build_claim_request, build_lock_request, ClaimRequest};

/// A wallet session bound to at most one signer account.
///
/// Every chain operation fails with [`WalletError::NotConnected`] until a
/// gateway is attached.
#[derive(Default)]
pub struct WalletSession {
    gateway: Option<Arc<dyn ContractGateway>>,
}

impl WalletSession {
    /// A disconnected session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connected(gateway: Arc<dyn ContractGateway>) -> Self {
        let mut session = Self::new();
        session.connect(gateway);
        session
    }

    pub fn connect(&mut self, gateway: Arc<dyn ContractGateway>) {
        info!(account = %gateway.account(), "wallet connected");
        self.gateway = Some(gateway);
    }

    /// Drop the gateway. Returns whether a wallet was connected.
    pub fn disconnect(&mut self) -> bool {
        match self.gateway.take() {
            Some(gateway) => {
                info!(account = %gateway.account(), "wallet disconnected");
                true
            }
            None => false,
        }
    }

    pub fn reconnect(&mut self, gateway: Arc<dyn ContractGateway>) {
        self.disconnect();
        self.connect(gateway);
    }

    pub fn is_connected(&self) -> bool {
        self.gateway.is_some()
    }

    pub fn address(&self) -> Option<WalletAddress> {
        self.gateway.as_ref().map(|gateway| gateway.account())
    }

    pub fn gateway(&self) -> Result<&Arc<dyn ContractGateway>, WalletError> {
        self.gateway.as_ref().ok_or(WalletError::NotConnected)
    }

    /// Balance of the connected account.
    pub async fn balance(&self) -> Result<WeiAmount, WalletError> {
        let gateway = self.gateway()?;
        Ok(gateway.balance_of(&gateway.account()).await?)
    }

    pub async fn balance_of(&self, address: &WalletAddress) -> Result<WeiAmount, WalletError> {
        Ok(self.gateway()?.balance_of(address).await?)
    }

    /// Lock the ether amount typed by the user.
    pub async fn lock_eth(&self, amount_text: &str) -> Result<LockReceipt, WalletError> {
        let gateway = self.gateway()?;
        let request = build_lock_request(amount_text)?;

        info!(amount = %request.value, "locking ETH");
        let receipt = gateway.lock_eth(request.value).await.map_err(|e| {
            warn!("lock failed: {e}");
            WalletError::from(e)
        })?;
        info!(lock = %receipt.lock_hash, tx = %receipt.tx_hash, "ETH locked");
        Ok(receipt)
    }

    /// Claim the ether amount typed by the user from the lock whose hash was
    /// scanned or typed as `hash_text`.
    pub async fn claim_eth(
        &self,
        hash_text: &str,
        amount_text: &str,
    ) -> Result<ClaimReceipt, WalletError> {
        let gateway = self.gateway()?;
        let ClaimRequest { lock_hash, amount } = build_claim_request(hash_text, amount_text)?;

        info!(lock = %lock_hash, %amount, "claiming ETH");
        let receipt = gateway.claim_eth(&lock_hash, amount).await.map_err(|e| {
            warn!(lock = %lock_hash, "claim failed: {e}");
            WalletError::from(e)
        })?;
        info!(lock = %lock_hash, tx = %receipt.tx_hash, amount = %receipt.amount, "ETH claimed");
        Ok(receipt)
    }

    /// ETH still claimable from `hash`.
    pub async fn locked_amount(&self, hash: &LockHash) -> Result<WeiAmount, WalletError> {
        Ok(self.gateway()?.get_locked_eth_amount(hash).await?)
    }

    /// Locks created by the connected account, most recent first.
    pub async fn transaction_hashes(&self) -> Result<Vec<LockHash>, WalletError> {
        let gateway = self.gateway()?;
        list_transaction_hashes_for_sender(&**gateway, &gateway.account()).await
    }

    /// Locks created by any `sender`, most recent first.
    pub async fn transaction_hashes_of(
        &self,
        sender: &WalletAddress,
    ) -> Result<Vec<LockHash>, WalletError> {
        list_transaction_hashes_for_sender(&**self.gateway()?, sender).await
    }

    pub async fn claim_history(
        &self,
        hash: &LockHash,
        mode: FetchMode,
    ) -> Result<Reconciliation, WalletError> {
        reconcile(&**self.gateway()?, hash, mode).await
    }
}

impl std::fmt::Debug for WalletSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletSession")
            .field("account", &self.address())
            .finish()
    }
}
