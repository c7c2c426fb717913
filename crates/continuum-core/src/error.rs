use thiserror::Error;

#[derive(Debug, Error)]
pub enum RingError {
    #[error("Hash algorithm unavailable: {0}")]
    UnavailableHashAlgorithm(String),

    #[error("Invalid node address: {0}")]
    InvalidNode(String),

    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),
}
