use ethkl_gateway::GatewayError;
use ethkl_types::TypeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Please connect your wallet first")]
    NotConnected,

    #[error("Please enter a valid value of eth ({0})")]
    InvalidAmount(String),

    #[error("invalid lock hash: {0}")]
    InvalidHash(String),

    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("config error: {0}")]
    Config(String),
}

impl From<TypeError> for WalletError {
    fn from(e: TypeError) -> Self {
        match e {
            TypeError::InvalidAmount(msg) => WalletError::InvalidAmount(msg),
            TypeError::InvalidHash(msg) => WalletError::InvalidHash(msg),
            other => WalletError::Config(other.to_string()),
        }
    }
}
