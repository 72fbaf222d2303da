//! Wallet core library for ethkl.
//!
//! Provides everything a wallet front end needs on top of the contract
//! gateway:
//! - Claim-history reconciliation (flatten per-claimer arrays, newest first)
//! - Sender lock listing, most recent first
//! - Last-call-wins bookkeeping for re-triggered history loads
//! - Wallet session: connect, balance, lock and claim sequencing
//! - Amount validation and client configuration

pub mod balance;
pub mod config;
pub mod error;
pub mod history;
pub mod session;
pub mod transaction_builder;

pub use config::ClientConfig;
pub use error::WalletError;
pub use history::{
    list_transaction_hashes_for_sender, merge_histories, reconcile, FetchMode, HistoryBoard,
    HistoryOutcome, Reconciliation, Ticket,
};
pub use session::WalletSession;
pub use transaction_builder::{build_claim_request, build_lock_request, ClaimRequest, LockRequest};
