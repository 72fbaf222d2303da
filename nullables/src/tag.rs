//! Nullable NFC tag: an in-memory tag that is always in range.

use ethkl_nfc::{NfcError, NfcTag};

#[derive(Debug, Default)]
pub struct NullTag {
    contents: Option<Vec<u8>>,
    in_session: bool,
    out_of_range: bool,
    sessions_opened: usize,
    sessions_closed: usize,
}

impl NullTag {
    /// A blank tag.
    pub fn new() -> Self {
        Self::default()
    }

    /// A tag already holding `bytes`, which need not be valid NDEF.
    pub fn with_contents(bytes: Vec<u8>) -> Self {
        Self {
            contents: Some(bytes),
            ..Self::default()
        }
    }

    /// Make every session request fail, as if no tag were presented.
    pub fn remove(&mut self) {
        self.out_of_range = true;
    }

    pub fn contents(&self) -> Option<&[u8]> {
        self.contents.as_deref()
    }

    pub fn in_session(&self) -> bool {
        self.in_session
    }

    pub fn sessions_opened(&self) -> usize {
        self.sessions_opened
    }

    pub fn sessions_closed(&self) -> usize {
        self.sessions_closed
    }

    fn ensure_session(&self) -> Result<(), NfcError> {
        if self.in_session {
            Ok(())
        } else {
            Err(NfcError::NoSession)
        }
    }
}

impl NfcTag for NullTag {
    fn request_session(&mut self) -> Result<(), NfcError> {
        if self.out_of_range {
            return Err(NfcError::NoSession);
        }
        self.in_session = true;
        self.sessions_opened += 1;
        Ok(())
    }

    fn read_ndef(&mut self) -> Result<Option<Vec<u8>>, NfcError> {
        self.ensure_session()?;
        Ok(self.contents.clone())
    }

    fn write_ndef(&mut self, message: &[u8]) -> Result<(), NfcError> {
        self.ensure_session()?;
        self.contents = Some(message.to_vec());
        Ok(())
    }

    fn cancel_session(&mut self) {
        if self.in_session {
            self.in_session = false;
            self.sessions_closed += 1;
        }
    }
}
