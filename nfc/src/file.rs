//! A tag image kept in a file.
//!
//! Stands in for a radio on machines without an NFC reader: the file holds
//! the raw NDEF message exactly as it would sit on the tag.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{NfcError, NfcTag};

pub struct FileTag {
    path: PathBuf,
    in_session: bool,
}

impl FileTag {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            in_session: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_session(&self) -> Result<(), NfcError> {
        if self.in_session {
            Ok(())
        } else {
            Err(NfcError::NoSession)
        }
    }
}

impl NfcTag for FileTag {
    fn request_session(&mut self) -> Result<(), NfcError> {
        self.in_session = true;
        Ok(())
    }

    fn read_ndef(&mut self) -> Result<Option<Vec<u8>>, NfcError> {
        self.ensure_session()?;
        match fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(None),
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_ndef(&mut self, message: &[u8]) -> Result<(), NfcError> {
        self.ensure_session()?;
        fs::write(&self.path, message)?;
        Ok(())
    }

    fn cancel_session(&mut self) {
        self.in_session = false;
    }
}
