use reqwest::StatusCode;
use thiserror::Error;

/// Error type for aggregator API calls.
#[derive(Debug, Error)]
pub enum BankingError {
    #[error("aggregator API keys are not configured")]
    CredentialsMissing,

    #[error("authentication failed ({status}): {body}")]
    Auth { status: StatusCode, body: String },

    #[error("provider request failed ({status}): {body}")]
    Provider { status: StatusCode, body: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected provider payload: {0}")]
    Payload(String),
}

impl From<serde_json::Error> for BankingError {
    fn from(err: serde_json::Error) -> Self {
        BankingError::Payload(err.to_string())
    }
}
