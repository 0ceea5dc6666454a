use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("topology rejected: {0}")]
    Rejected(String),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("platform failure: {0}")]
    Internal(String),
}
