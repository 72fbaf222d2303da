//! Fundamental types for ethkl.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! wei amounts, lock hashes, wallet addresses, timestamps, claim records and
//! the network identifiers the client knows how to reach.

pub mod address;
pub mod amount;
pub mod claim;
pub mod error;
pub mod hash;
pub mod network;
pub mod time;

pub use address::WalletAddress;
pub use amount::WeiAmount;
pub use claim::{ClaimHistory, ClaimRecord, TransactionEntry};
pub use error::TypeError;
pub use hash::LockHash;
pub use network::NetworkId;
pub use time::Timestamp;
