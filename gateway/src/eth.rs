//! `ethers`-backed gateway.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ethers::abi::RawLog;
use ethers::contract::{ContractError, EthLogDecode};
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Middleware, Provider};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::{Address, Log, TransactionReceipt, U256, U64};
use tracing::{debug, info};

use ethkl_types::{ClaimHistory, LockHash, Timestamp, TransactionEntry, WalletAddress, WeiAmount};

use crate::abi::{EthClaimedFilter, EthLockedFilter, LockVault};
use crate::{ClaimReceipt, ContractGateway, GatewayError, LockReceipt};

/// Polling interval for pending transactions.
const POLL_INTERVAL: Duration = Duration::from_millis(2000);

pub type EthSigner = SignerMiddleware<Provider<Http>, LocalWallet>;

/// Everything needed to open a signing connection to the lock contract.
#[derive(Clone)]
pub struct EthGatewayConfig {
    pub rpc_url: String,
    pub contract_address: WalletAddress,
    /// Refuse to connect when the endpoint reports a different chain.
    pub expected_chain_id: Option<u64>,
    /// Hex-encoded secp256k1 private key.
    pub private_key: String,
}

impl fmt::Debug for EthGatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EthGatewayConfig")
            .field("rpc_url", &self.rpc_url)
            .field("contract_address", &self.contract_address)
            .field("expected_chain_id", &self.expected_chain_id)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Lock contract client over any `ethers` middleware stack.
pub struct EthGateway<M> {
    contract: LockVault<M>,
    client: Arc<M>,
    account: WalletAddress,
}

impl EthGateway<EthSigner> {
    /// Connect over HTTP and sign with the configured private key.
    pub async fn connect(config: &EthGatewayConfig) -> Result<Self, GatewayError> {
        let provider = Provider::<Http>::try_from(config.rpc_url.as_str())
            .map_err(|e| GatewayError::Config(format!("invalid RPC url {}: {e}", config.rpc_url)))?
            .interval(POLL_INTERVAL);

        let chain_id = provider
            .get_chainid()
            .await
            .map_err(|e| GatewayError::Rpc(e.to_string()))?
            .as_u64();
        check_chain_id(config.expected_chain_id, chain_id)?;

        let wallet = config
            .private_key
            .trim()
            .parse::<LocalWallet>()
            .map_err(|e| GatewayError::Config(format!("invalid private key: {e}")))?
            .with_chain_id(chain_id);

        let client = Arc::new(SignerMiddleware::new(provider, wallet));
        let account = WalletAddress::from(client.address());
        info!(
            chain_id,
            %account,
            contract = %config.contract_address,
            "connected to lock contract"
        );
        Ok(Self::new(client, config.contract_address, account))
    }
}

impl<M: Middleware + 'static> EthGateway<M> {
    pub fn new(client: Arc<M>, contract_address: WalletAddress, account: WalletAddress) -> Self {
        let contract = LockVault::new(Address::from(contract_address), client.clone());
        Self {
            contract,
            client,
            account,
        }
    }

    pub fn contract_address(&self) -> WalletAddress {
        WalletAddress::from(self.contract.address())
    }

    fn decode_event<E: EthLogDecode>(&self, logs: &[Log]) -> Option<E> {
        let contract = self.contract.address();
        logs.iter()
            .filter(|log| log.address == contract)
            .find_map(|log| {
                let raw = RawLog {
                    topics: log.topics.clone(),
                    data: log.data.to_vec(),
                };
                E::decode_log(&raw).ok()
            })
    }
}

/// Fail when the endpoint's chain differs from the expected one.
pub fn check_chain_id(expected: Option<u64>, actual: u64) -> Result<(), GatewayError> {
    match expected {
        Some(expected) if expected != actual => {
            Err(GatewayError::ChainIdMismatch { expected, actual })
        }
        _ => Ok(()),
    }
}

fn contract_error<M: Middleware>(err: ContractError<M>) -> GatewayError {
    match err.decode_revert::<String>() {
        Some(reason) => GatewayError::Reverted(reason),
        None => GatewayError::Contract(err.to_string()),
    }
}

fn timestamp_from_u256(value: U256) -> Result<Timestamp, GatewayError> {
    if value > U256::from(u64::MAX) {
        return Err(GatewayError::Decode(format!("timestamp out of range: {value}")));
    }
    Ok(Timestamp::new(value.low_u64()))
}

fn ensure_success(receipt: &TransactionReceipt) -> Result<(), GatewayError> {
    if receipt.status == Some(U64::zero()) {
        return Err(GatewayError::Reverted(format!(
            "transaction {:?} failed on chain",
            receipt.transaction_hash
        )));
    }
    Ok(())
}

#[async_trait]
impl<M> ContractGateway for EthGateway<M>
where
    M: Middleware + 'static,
{
    fn account(&self) -> WalletAddress {
        self.account
    }

    async fn balance_of(&self, address: &WalletAddress) -> Result<WeiAmount, GatewayError> {
        let balance = self
            .client
            .get_balance(address.inner(), None)
            .await
            .map_err(|e| GatewayError::Rpc(e.to_string()))?;
        Ok(WeiAmount::new(balance))
    }

    async fn get_transaction(
        &self,
        hash: &LockHash,
    ) -> Result<Option<TransactionEntry>, GatewayError> {
        let (sender, amount, claimed, claimers) = self
            .contract
            .get_transaction(hash.into_bytes())
            .call()
            .await
            .map_err(contract_error)?;

        if sender.is_zero() {
            debug!(%hash, "lock not found");
            return Ok(None);
        }

        Ok(Some(TransactionEntry {
            hash: *hash,
            sender: sender.into(),
            amount: amount.into(),
            claimed: claimed.into(),
            claimers: claimers.into_iter().map(WalletAddress::from).collect(),
        }))
    }

    async fn get_claim_history(
        &self,
        hash: &LockHash,
        claimer: &WalletAddress,
    ) -> Result<ClaimHistory, GatewayError> {
        let (amounts, timestamps) = self
            .contract
            .get_claim_history(hash.into_bytes(), claimer.inner())
            .call()
            .await
            .map_err(contract_error)?;

        let timestamps = timestamps
            .into_iter()
            .map(timestamp_from_u256)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ClaimHistory::new(
            amounts.into_iter().map(WeiAmount::new).collect(),
            timestamps,
        ))
    }

    async fn get_transaction_hashes_by_sender(
        &self,
        sender: &WalletAddress,
    ) -> Result<Vec<LockHash>, GatewayError> {
        let hashes = self
            .contract
            .get_transaction_hashes_by_sender(sender.inner())
            .call()
            .await
            .map_err(contract_error)?;
        Ok(hashes.into_iter().map(LockHash::new).collect())
    }

    async fn get_locked_eth_amount(&self, hash: &LockHash) -> Result<WeiAmount, GatewayError> {
        let amount = self
            .contract
            .get_locked_eth_amount(hash.into_bytes())
            .call()
            .await
            .map_err(contract_error)?;
        Ok(WeiAmount::new(amount))
    }

    async fn lock_eth(&self, value: WeiAmount) -> Result<LockReceipt, GatewayError> {
        let call = self.contract.lock_eth().value(value.raw());
        let pending = call.send().await.map_err(contract_error)?;
        let tx_hash = format!("{:?}", pending.tx_hash());
        debug!(%tx_hash, "lockEth sent, waiting for receipt");

        let receipt = pending
            .await
            .map_err(|e| GatewayError::Rpc(e.to_string()))?
            .ok_or(GatewayError::Dropped)?;
        ensure_success(&receipt)?;

        let event: EthLockedFilter = self
            .decode_event(&receipt.logs)
            .ok_or(GatewayError::MissingEvent("EthLocked"))?;
        Ok(LockReceipt {
            lock_hash: LockHash::new(event.transaction_hash),
            tx_hash,
            amount: WeiAmount::new(event.amount),
        })
    }

    async fn claim_eth(
        &self,
        hash: &LockHash,
        amount: WeiAmount,
    ) -> Result<ClaimReceipt, GatewayError> {
        let call = self.contract.claim_eth(hash.into_bytes(), amount.raw());
        let pending = call.send().await.map_err(contract_error)?;
        let tx_hash = format!("{:?}", pending.tx_hash());
        debug!(%tx_hash, %hash, "claimEth sent, waiting for receipt");

        let receipt = pending
            .await
            .map_err(|e| GatewayError::Rpc(e.to_string()))?
            .ok_or(GatewayError::Dropped)?;
        ensure_success(&receipt)?;

        // Older deployments emit no claim event; fall back to the requested amount.
        let claimed = self
            .decode_event::<EthClaimedFilter>(&receipt.logs)
            .map(|event| WeiAmount::new(event.amount))
            .unwrap_or(amount);
        Ok(ClaimReceipt {
            lock_hash: *hash,
            tx_hash,
            amount: claimed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_id_check() {
        assert!(check_chain_id(None, 1).is_ok());
        assert!(check_chain_id(Some(534_351), 534_351).is_ok());
        assert!(matches!(
            check_chain_id(Some(534_351), 1),
            Err(GatewayError::ChainIdMismatch {
                expected: 534_351,
                actual: 1
            })
        ));
    }

    #[test]
    fn timestamps_beyond_u64_are_rejected() {
        assert_eq!(
            timestamp_from_u256(U256::from(1_700_000_000u64)).unwrap(),
            Timestamp::new(1_700_000_000)
        );
        assert!(matches!(
            timestamp_from_u256(U256::from(u64::MAX) + U256::one()),
            Err(GatewayError::Decode(_))
        ));
    }

    #[test]
    fn failed_receipt_is_a_revert() {
        let receipt = TransactionReceipt {
            status: Some(U64::zero()),
            ..Default::default()
        };
        assert!(matches!(ensure_success(&receipt), Err(GatewayError::Reverted(_))));

        let receipt = TransactionReceipt {
            status: Some(U64::one()),
            ..Default::default()
        };
        assert!(ensure_success(&receipt).is_ok());
    }

    #[test]
    fn config_debug_hides_key() {
        let config = EthGatewayConfig {
            rpc_url: "http://127.0.0.1:8545".into(),
            contract_address: WalletAddress::from_low_u64(7),
            expected_chain_id: Some(31_337),
            private_key: "0xdeadbeef".into(),
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("deadbeef"));
        assert!(rendered.contains("<redacted>"));
    }
}
