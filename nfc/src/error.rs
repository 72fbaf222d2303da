use thiserror::Error;

#[derive(Debug, Error)]
pub enum NfcError {
    #[error("no NFC session is active")]
    NoSession,

    #[error("tag holds no NDEF message")]
    NoNdefMessage,

    #[error("malformed NDEF message: {0}")]
    Malformed(String),

    #[error("first record is not a text record")]
    NotText,

    #[error("invalid text payload: {0}")]
    InvalidText(String),

    #[error("tag I/O error: {0}")]
    Io(#[from] std::io::Error),
}
