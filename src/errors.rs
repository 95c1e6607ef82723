use thiserror::Error;

/// Error type for the fallible edges of the crate: files, whole-document
/// decoding, contribution posting and loan validation.
#[derive(Debug, Error)]
pub enum NatilleraError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Loan already settled")]
    LoanSettled,
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type NatilleraResult<T> = Result<T, NatilleraError>;
