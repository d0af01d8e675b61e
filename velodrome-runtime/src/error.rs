use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntegrationError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Quote request failed: {0}")]
    QuoteFailed(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Chain error: {0}")]
    ChainError(String),

    #[error("Adapter call reverted: {0}")]
    Reverted(String),

    #[error("Token error: {0}")]
    TokenError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<reqwest::Error> for IntegrationError {
    fn from(e: reqwest::Error) -> Self {
        IntegrationError::HttpError(e.to_string())
    }
}

impl From<serde_json::Error> for IntegrationError {
    fn from(e: serde_json::Error) -> Self {
        IntegrationError::SerializationError(e.to_string())
    }
}
