//! Tag sessions.

use tracing::{debug, info, warn};

use crate::ndef::{decode_message, encode_text_message};
use crate::NfcError;

/// Language code written into Text records.
pub const DEFAULT_LANGUAGE: &str = "en";

/// One NDEF-capable tag reachable through some reader.
///
/// Reads and writes are only valid between `request_session` and
/// `cancel_session`.
pub trait NfcTag {
    /// Wait for a tag and open an NDEF session with it.
    fn request_session(&mut self) -> Result<(), NfcError>;

    /// Raw NDEF message bytes, or `None` for a blank tag.
    fn read_ndef(&mut self) -> Result<Option<Vec<u8>>, NfcError>;

    /// Replace the tag contents with `message`.
    fn write_ndef(&mut self, message: &[u8]) -> Result<(), NfcError>;

    /// Release the session. Safe to call when no session is open.
    fn cancel_session(&mut self);
}

/// Read the text of the first record on the tag.
///
/// The session is released whether or not the read succeeds.
pub fn read_tag_text<T: NfcTag + ?Sized>(tag: &mut T) -> Result<String, NfcError> {
    let result = read_in_session(tag);
    tag.cancel_session();
    match &result {
        Ok(text) => info!(%text, "read text from tag"),
        Err(e) => warn!("tag read failed: {e}"),
    }
    result
}

fn read_in_session<T: NfcTag + ?Sized>(tag: &mut T) -> Result<String, NfcError> {
    tag.request_session()?;
    let bytes = tag.read_ndef()?.ok_or(NfcError::NoNdefMessage)?;
    debug!(len = bytes.len(), "tag found");
    let records = decode_message(&bytes)?;
    records
        .first()
        .ok_or(NfcError::NoNdefMessage)?
        .text_content()
}

/// Write `text` to the tag as a single Text record.
///
/// The session is released whether or not the write succeeds.
pub fn write_tag_text<T: NfcTag + ?Sized>(tag: &mut T, text: &str) -> Result<(), NfcError> {
    let result = write_in_session(tag, text);
    tag.cancel_session();
    match &result {
        Ok(()) => info!(%text, "wrote text to tag"),
        Err(e) => warn!("tag write failed: {e}"),
    }
    result
}

fn write_in_session<T: NfcTag + ?Sized>(tag: &mut T, text: &str) -> Result<(), NfcError> {
    tag.request_session()?;
    let message = encode_text_message(text, DEFAULT_LANGUAGE)?;
    tag.write_ndef(&message)
}
