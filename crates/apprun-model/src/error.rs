use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("required setting is missing: {0}")]
    MissingSetting(&'static str),

    #[error("invalid setting {key}: {reason}")]
    InvalidSetting { key: &'static str, reason: String },

    #[error("unknown subnet visibility: {0}")]
    UnknownSubnetVisibility(String),

    #[error("unknown flag precedence: {0}")]
    UnknownPrecedence(String),

    #[error("invalid environment bundle: {0}")]
    InvalidEnvironment(String),

    #[error("invalid policy statement: {0}")]
    InvalidStatement(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
