//! Lock hash type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypeError;

/// The 32-byte identifier the contract assigns to a lock.
///
/// The contract ABI calls it `transactionHash`; it is what gets written to
/// an NFC tag and what claimers present back to the contract.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LockHash([u8; 32]);

impl LockHash {
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn into_bytes(self) -> [u8; 32] {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl FromStr for LockHash {
    type Err = TypeError;

    /// Accepts 64 hex digits, with or without a `0x` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.len() != 64 {
            return Err(TypeError::InvalidHash(format!(
                "expected 64 hex digits, got {}",
                digits.len()
            )));
        }
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| TypeError::InvalidHash(format!("{trimmed}: {e}")))?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for LockHash {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<LockHash> for String {
    fn from(hash: LockHash) -> Self {
        hash.to_string()
    }
}

impl From<[u8; 32]> for LockHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for LockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LockHash({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for LockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "0x1b2f6c0e3e0d4c9a8b7a6f5e4d3c2b1a0f9e8d7c6b5a49382716051423324150";

    #[test]
    fn parses_with_and_without_prefix() {
        let a: LockHash = HASH.parse().unwrap();
        let b: LockHash = HASH.trim_start_matches("0x").parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), HASH);
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let a: LockHash = format!("  {HASH}\n").parse().unwrap();
        assert_eq!(a.to_string(), HASH);
    }

    #[test]
    fn rejects_wrong_length_and_non_hex() {
        assert!(matches!("0x1234".parse::<LockHash>(), Err(TypeError::InvalidHash(_))));
        let bad = format!("0x{}", "zz".repeat(32));
        assert!(matches!(bad.parse::<LockHash>(), Err(TypeError::InvalidHash(_))));
    }

    #[test]
    fn serializes_as_hex_string() {
        let hash: LockHash = HASH.parse().unwrap();
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{HASH}\""));
        let back: LockHash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
    }
}
