//! Shared utilities for ethkl.

pub mod display;
pub mod logging;
pub mod time;

pub use display::{abbreviate_address, shorten_key};
pub use logging::{init_logging, LogFormat};
pub use time::format_malaysia_time;
