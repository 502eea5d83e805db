use saldo_banking::BankingError;
use saldo_config::ConfigError;
use thiserror::Error;
use uuid::Uuid;

/// Unified error type for the bank-sync service layer.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),
    #[error(transparent)]
    Banking(#[from] BankingError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
}

impl From<ConfigError> for CoreError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(io) => CoreError::Config(io.to_string()),
            ConfigError::Serde(message) => CoreError::Config(message),
        }
    }
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serde(err.to_string())
    }
}
