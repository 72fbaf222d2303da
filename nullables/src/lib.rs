//! Nullable infrastructure for deterministic testing.
//!
//! Everything external to the wallet (the chain, the clock, the NFC reader)
//! sits behind a trait. This crate provides test-friendly implementations
//! that:
//! - Return deterministic values
//! - Can be controlled programmatically (funding, failures, raw contract data)
//! - Never touch the network or a radio
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod gateway;
pub mod tag;

pub use clock::NullClock;
pub use gateway::{GatewayCall, NullGateway};
pub use tag::NullTag;
