use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("no wallet connected")]
    NotConnected,

    #[error("gateway config error: {0}")]
    Config(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("contract call failed: {0}")]
    Contract(String),

    #[error("transaction reverted: {0}")]
    Reverted(String),

    #[error("receipt has no {0} event")]
    MissingEvent(&'static str),

    #[error("undecodable contract data: {0}")]
    Decode(String),

    #[error("chain id mismatch: expected {expected}, got {actual}")]
    ChainIdMismatch { expected: u64, actual: u64 },

    #[error("transaction dropped from mempool")]
    Dropped,
}
