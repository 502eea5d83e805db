//! GoCardless Bank Account Data client.
//!
//! Implements the token session, institution catalog, requisition
//! lifecycle, and per-account detail/transaction/balance endpoints.

use chrono::NaiveDate;
use reqwest::{Client, StatusCode};

use crate::{
    credentials::{ApiCredentials, CredentialStore},
    error::BankingError,
    session::SessionTokenManager,
    types::{
        AccountDetail, AccountDetailEnvelope, BalancesEnvelope, CreateRequisitionRequest,
        Institution, RawTransaction, RequisitionDetail, TransactionsEnvelope,
    },
};

pub const DEFAULT_BASE_URL: &str = "https://bankaccountdata.gocardless.com/api/v2";

/// Where the institution's consent flow redirects after authorization.
/// There is no callback handler behind it; completion is only observed by
/// polling the requisition status.
const REDIRECT_URL: &str = "https://saldo.app/bank-callback";
const USER_LANGUAGE: &str = "IT";

/// Balance types preferred when the provider reports several.
const PREFERRED_BALANCE_TYPES: [&str; 2] = ["interimAvailable", "expected"];

#[derive(Clone)]
pub struct GoCardlessClient {
    http: Client,
    base_url: String,
    credentials: CredentialStore,
    session: SessionTokenManager,
}

impl Default for GoCardlessClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GoCardlessClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Builds a client against a custom base URL (sandbox, tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            credentials: CredentialStore::new(),
            session: SessionTokenManager::new(),
        }
    }

    /// Check if the API key pair is set.
    pub fn is_configured(&self) -> bool {
        self.credentials.is_configured()
    }

    /// Installs a new key pair and invalidates the cached session token so
    /// a stale session is never reused.
    pub async fn set_credentials(
        &self,
        secret_id: impl Into<String>,
        secret_key: impl Into<String>,
    ) {
        self.credentials
            .set(ApiCredentials::new(secret_id, secret_key));
        self.session.invalidate().await;
    }

    pub async fn clear_credentials(&self) {
        self.credentials.clear();
        self.session.invalidate().await;
    }

    async fn bearer(&self) -> Result<String, BankingError> {
        self.session
            .bearer(&self.http, &self.base_url, &self.credentials)
            .await
    }

    /// Lists the supported institutions for an ISO country code.
    pub async fn list_institutions(&self, country: &str) -> Result<Vec<Institution>, BankingError> {
        let token = self.bearer().await?;
        let response = self
            .http
            .get(format!("{}/institutions/", self.base_url))
            .query(&[("country", country)])
            .bearer_auth(&token)
            .send()
            .await?;
        let institutions: Vec<Institution> = decode(response).await?;
        tracing::debug!(country = %country, count = institutions.len(), "fetched institution list");
        Ok(institutions)
    }

    /// Creates a requisition and returns the external authorization link.
    pub async fn create_requisition(
        &self,
        institution_id: &str,
    ) -> Result<RequisitionDetail, BankingError> {
        let token = self.bearer().await?;
        let response = self
            .http
            .post(format!("{}/requisitions/", self.base_url))
            .bearer_auth(&token)
            .json(&CreateRequisitionRequest {
                redirect: REDIRECT_URL.to_string(),
                institution_id: institution_id.to_string(),
                user_language: USER_LANGUAGE.to_string(),
            })
            .send()
            .await?;
        let requisition: RequisitionDetail = decode(response).await?;
        tracing::info!(
            requisition_id = %requisition.id,
            institution_id = %institution_id,
            status = %requisition.status,
            "created requisition"
        );
        Ok(requisition)
    }

    /// Fetches the current status of a requisition, including the account
    /// ids once the user completed authorization.
    pub async fn requisition(&self, requisition_id: &str) -> Result<RequisitionDetail, BankingError> {
        let token = self.bearer().await?;
        let response = self
            .http
            .get(format!("{}/requisitions/{}/", self.base_url, requisition_id))
            .bearer_auth(&token)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn account_details(&self, account_id: &str) -> Result<AccountDetail, BankingError> {
        let token = self.bearer().await?;
        let response = self
            .http
            .get(format!("{}/accounts/{}/details/", self.base_url, account_id))
            .bearer_auth(&token)
            .send()
            .await?;
        let envelope: AccountDetailEnvelope = decode(response).await?;
        Ok(envelope.account)
    }

    /// Fetches booked transactions for an account; pending entries are
    /// discarded.
    pub async fn booked_transactions(
        &self,
        account_id: &str,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<Vec<RawTransaction>, BankingError> {
        let token = self.bearer().await?;
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(from) = date_from {
            query.push(("date_from", from.to_string()));
        }
        if let Some(to) = date_to {
            query.push(("date_to", to.to_string()));
        }
        let response = self
            .http
            .get(format!(
                "{}/accounts/{}/transactions/",
                self.base_url, account_id
            ))
            .query(&query)
            .bearer_auth(&token)
            .send()
            .await?;
        let envelope: TransactionsEnvelope = decode(response).await?;
        tracing::debug!(
            account_id = %account_id,
            booked = envelope.transactions.booked.len(),
            pending = envelope.transactions.pending.len(),
            "fetched transactions"
        );
        Ok(envelope.transactions.booked)
    }

    /// Returns the account balance, preferring `interimAvailable` and
    /// `expected` entries, then the first one reported.
    pub async fn balance(&self, account_id: &str) -> Result<f64, BankingError> {
        let token = self.bearer().await?;
        let response = self
            .http
            .get(format!("{}/accounts/{}/balances/", self.base_url, account_id))
            .bearer_auth(&token)
            .send()
            .await?;
        let envelope: BalancesEnvelope = decode(response).await?;
        let main = envelope
            .balances
            .iter()
            .find(|entry| {
                entry
                    .balance_type
                    .as_deref()
                    .map(|kind| PREFERRED_BALANCE_TYPES.contains(&kind))
                    .unwrap_or(false)
            })
            .or_else(|| envelope.balances.first());
        match main {
            Some(entry) => entry
                .balance_amount
                .amount
                .parse::<f64>()
                .map_err(|err| BankingError::Payload(format!("balance amount: {err}"))),
            None => Ok(0.0),
        }
    }
}

/// Reads a response body, mapping non-success statuses onto the error
/// taxonomy before deserializing.
async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, BankingError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(classify(status, body));
    }
    Ok(serde_json::from_str(&body)?)
}

fn classify(status: StatusCode, body: String) -> BankingError {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        BankingError::Auth { status, body }
    } else {
        BankingError::Provider { status, body }
    }
}
