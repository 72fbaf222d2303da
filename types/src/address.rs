//! Ethereum wallet address.

use ethers::types::Address;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypeError;

/// A 20-byte Ethereum account address.
///
/// Displayed EIP-55 checksummed, which is also how addresses appear in the
/// history table and on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WalletAddress(Address);

impl WalletAddress {
    pub const ZERO: Self = Self(Address::zero());

    pub fn new(address: Address) -> Self {
        Self(address)
    }

    /// Build an address whose last eight bytes hold `n` (handy for fixtures).
    pub fn from_low_u64(n: u64) -> Self {
        Self(Address::from_low_u64_be(n))
    }

    pub fn inner(&self) -> Address {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl FromStr for WalletAddress {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        if digits.len() != 40 {
            return Err(TypeError::InvalidAddress(trimmed.to_string()));
        }
        let address = Address::from_str(digits)
            .map_err(|_| TypeError::InvalidAddress(trimmed.to_string()))?;

        // Mixed case carries an EIP-55 checksum; single-case input does not.
        let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
        let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
        if has_upper && has_lower {
            let checksummed = ethers::utils::to_checksum(&address, None);
            if checksummed[2..] != *digits {
                return Err(TypeError::InvalidAddress(format!("bad checksum: {trimmed}")));
            }
        }
        Ok(Self(address))
    }
}

impl From<Address> for WalletAddress {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

impl From<WalletAddress> for Address {
    fn from(address: WalletAddress) -> Self {
        address.0
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&ethers::utils::to_checksum(&self.0, None))
    }
}
