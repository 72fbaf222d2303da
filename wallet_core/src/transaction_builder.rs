//! Validation of user-entered lock and claim requests.

use ethkl_types::{LockHash, WeiAmount};

use crate::error::WalletError;

/// A validated `lockEth` request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LockRequest {
    pub value: WeiAmount,
}

/// A validated `claimEth` request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClaimRequest {
    pub lock_hash: LockHash,
    pub amount: WeiAmount,
}

/// Build a lock request from the amount the user typed, in ether.
pub fn build_lock_request(amount_text: &str) -> Result<LockRequest, WalletError> {
    Ok(LockRequest {
        value: positive_ether(amount_text)?,
    })
}

/// Build a claim request from a scanned hash and a typed amount.
pub fn build_claim_request(hash_text: &str, amount_text: &str) -> Result<ClaimRequest, WalletError> {
    let lock_hash: LockHash = hash_text.parse()?;
    Ok(ClaimRequest {
        lock_hash,
        amount: positive_ether(amount_text)?,
    })
}

fn positive_ether(text: &str) -> Result<WeiAmount, WalletError> {
    let amount = WeiAmount::parse_ether(text)?;
    if amount.is_zero() {
        return Err(WalletError::InvalidAmount("amount must be greater than zero".into()));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "0x1b2f6c0e3e0d4c9a8b7a6f5e4d3c2b1a0f9e8d7c6b5a49382716051423324150";

    #[test]
    fn lock_request_in_wei() {
        let request = build_lock_request("0.01").unwrap();
        assert_eq!(request.value, WeiAmount::from_wei(10_000_000_000_000_000));
    }

    #[test]
    fn lock_rejects_zero_and_garbage() {
        assert!(matches!(build_lock_request("0"), Err(WalletError::InvalidAmount(_))));
        assert!(matches!(build_lock_request("0.0"), Err(WalletError::InvalidAmount(_))));
        assert!(matches!(build_lock_request(""), Err(WalletError::InvalidAmount(_))));
        assert!(matches!(build_lock_request("-2"), Err(WalletError::InvalidAmount(_))));
        assert!(matches!(build_lock_request("ten"), Err(WalletError::InvalidAmount(_))));
    }

    #[test]
    fn claim_request_parses_both_fields() {
        let request = build_claim_request(HASH, "1").unwrap();
        assert_eq!(request.lock_hash.to_string(), HASH);
        assert_eq!(request.amount, WeiAmount::from_ether(1));
    }

    #[test]
    fn claim_request_rejects_bad_hash() {
        assert!(matches!(
            build_claim_request("0xnothex", "1"),
            Err(WalletError::InvalidHash(_))
        ));
    }
}
