use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    credentials::CredentialStore,
    error::BankingError,
    types::{TokenRequest, TokenResponse},
};

/// Margin subtracted from the reported token lifetime to tolerate clock
/// drift and in-flight requests.
const EXPIRY_MARGIN_SECS: i64 = 3_600;

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_valid(&self) -> bool {
        Utc::now() < self.expires_at
    }
}

/// Caches the aggregator bearer token and refreshes it ahead of expiry.
///
/// The cache lock is held across the refresh request, so concurrent
/// callers with an expired token trigger exactly one `/token/new/` call.
#[derive(Clone, Default)]
pub struct SessionTokenManager {
    cache: Arc<Mutex<Option<CachedToken>>>,
}

impl SessionTokenManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the cached token so the next call authenticates again.
    pub async fn invalidate(&self) {
        let mut cache = self.cache.lock().await;
        *cache = None;
    }

    /// Returns a valid bearer token, fetching a fresh one when the cache
    /// is empty or within the safety margin of expiry.
    pub async fn bearer(
        &self,
        http: &Client,
        base_url: &str,
        credentials: &CredentialStore,
    ) -> Result<String, BankingError> {
        let mut cache = self.cache.lock().await;
        if let Some(token) = cache.as_ref() {
            if token.is_valid() {
                return Ok(token.value.clone());
            }
        }

        let credentials = credentials
            .current()
            .ok_or(BankingError::CredentialsMissing)?;

        let response = http
            .post(format!("{base_url}/token/new/"))
            .json(&TokenRequest {
                secret_id: credentials.secret_id().to_string(),
                secret_key: credentials.secret_key().to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::warn!(status = %status, "aggregator rejected the API key pair");
            return Err(BankingError::Auth { status, body });
        }

        let token: TokenResponse = serde_json::from_str(&body)?;
        let lifetime = token.access_expires.saturating_sub(EXPIRY_MARGIN_SECS).max(0);
        let cached = CachedToken {
            value: token.access,
            expires_at: Utc::now() + Duration::seconds(lifetime),
        };
        tracing::debug!(expires_at = %cached.expires_at, "obtained new aggregator session token");
        let value = cached.value.clone();
        *cache = Some(cached);
        Ok(value)
    }
}
