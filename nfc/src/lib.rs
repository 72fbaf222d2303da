//! NFC support for ethkl.
//!
//! A lock hash travels on a physical tag as a single NDEF well-known Text
//! record. This crate owns the NDEF encoding, the [`NfcTag`] seam that a
//! radio driver implements, and the session-scoped read/write helpers.

pub mod error;
pub mod file;
pub mod ndef;
pub mod tag;

pub use error::NfcError;
pub use file::FileTag;
pub use ndef::{decode_message, encode_message, encode_text_message, NdefRecord, Tnf};
pub use tag::{read_tag_text, write_tag_text, NfcTag};
