use thiserror::Error;

#[derive(Error, Debug)]
pub enum TwError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Compute failed: {0}")]
    Compute(anyhow::Error),
}

pub type Result<T> = std::result::Result<T, TwError>;
