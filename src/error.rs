use alloy::primitives::B256;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RunnerError>;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("transaction error: {0}")]
    Tx(#[from] TxError),
    #[error("read error: {0}")]
    Read(#[from] ReadError),
    #[error("quest batch error: {0}")]
    Batch(String),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl RunnerError {
    /// Transaction failures end the process; everything else is retried on the next tick.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Tx(_))
    }
}

#[derive(Debug, Error)]
pub enum TxError {
    #[error("`{action}` not confirmed within {waited_ms}ms")]
    Timeout { action: String, waited_ms: u64 },
    #[error("`{action}` failed to broadcast or confirm: {reason}")]
    Submission { action: String, reason: String },
    #[error("`{action}` mined with failed receipt status (tx {tx_hash:#x})")]
    Reverted { action: String, tx_hash: B256 },
}

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("`{call}` call failed: {reason}")]
    Rpc { call: &'static str, reason: String },
    #[error("`{call}` returned undecodable data: {reason}")]
    Decode { call: &'static str, reason: String },
    #[error("metadata lookup for hero {hero} failed: {reason}")]
    Metadata { hero: u64, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required configuration: {0}")]
    Missing(String),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
