//! Wei amounts.
//!
//! Amounts are fixed-width 256-bit integers counted in wei, exactly as the
//! contract stores them. Floating point never touches a monetary value: ether
//! strings are parsed straight into wei and rendered back from wei.

use ethers::types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TypeError;

/// Number of decimals between wei and ether.
pub const ETHER_DECIMALS: usize = 18;

/// An ETH amount in wei.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WeiAmount(U256);

impl WeiAmount {
    pub const ZERO: Self = Self(U256::zero());

    pub fn new(raw: U256) -> Self {
        Self(raw)
    }

    pub fn from_wei(wei: u128) -> Self {
        Self(U256::from(wei))
    }

    /// Whole ether units (`1` → 10^18 wei).
    pub fn from_ether(units: u64) -> Self {
        Self(U256::from(units) * U256::exp10(ETHER_DECIMALS))
    }

    pub fn raw(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Parse a decimal ether string such as `"0.25"` into wei.
    ///
    /// Negative, empty and non-numeric input is rejected. Zero is accepted;
    /// callers that need a positive value check [`WeiAmount::is_zero`].
    pub fn parse_ether(text: &str) -> Result<Self, TypeError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TypeError::InvalidAmount("empty amount".into()));
        }
        if trimmed.starts_with('-') {
            return Err(TypeError::InvalidAmount(format!("negative amount: {trimmed}")));
        }
        if let Some((_, frac)) = trimmed.split_once('.') {
            if frac.len() > ETHER_DECIMALS {
                return Err(TypeError::InvalidAmount(format!("too many decimals: {trimmed}")));
            }
        }
        ethers::utils::parse_ether(trimmed)
            .map(Self)
            .map_err(|e| TypeError::InvalidAmount(format!("{trimmed}: {e}")))
    }

    /// Render as ether with trailing zeros trimmed, keeping at least one
    /// fractional digit (`1.0`, `0.25`).
    pub fn to_ether_string(&self) -> String {
        let (whole, frac) = self.0.div_mod(U256::exp10(ETHER_DECIMALS));
        let digits = format!("{:0>width$}", frac.to_string(), width = ETHER_DECIMALS);
        let trimmed = digits.trim_end_matches('0');
        if trimmed.is_empty() {
            format!("{whole}.0")
        } else {
            format!("{whole}.{trimmed}")
        }
    }

    /// Render as ether with exactly `decimals` fractional digits, rounding
    /// half up. `decimals` is capped at 18.
    pub fn to_ether_fixed(&self, decimals: usize) -> String {
        let decimals = decimals.min(ETHER_DECIMALS);
        let scale = U256::exp10(ETHER_DECIMALS - decimals);
        let (mut scaled, rem) = self.0.div_mod(scale);
        if rem.saturating_mul(U256::from(2u8)) >= scale {
            scaled = scaled.saturating_add(U256::one());
        }
        if decimals == 0 {
            return scaled.to_string();
        }
        let (whole, frac) = scaled.div_mod(U256::exp10(decimals));
        format!(
            "{whole}.{:0>width$}",
            frac.to_string(),
            width = decimals
        )
    }
}

impl From<U256> for WeiAmount {
    fn from(raw: U256) -> Self {
        Self(raw)
    }
}

impl fmt::Display for WeiAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ETH", self.to_ether_string())
    }
}
