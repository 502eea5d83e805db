//! Drives the bank-connection state machine.
//!
//! A connection starts as a requisition pointing the user at the
//! institution's own authorization page. Completion is never pushed back
//! to us; `finalize` polls the requisition and may be called repeatedly
//! until the provider reports it linked.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use saldo_banking::{GoCardlessClient, Institution};
use saldo_config::{BankingConfig, ConfigManager};
use saldo_domain::{LinkedAccount, Requisition, RequisitionStatus};

use crate::CoreError;

/// Result of creating a requisition: the link the user must open
/// externally to authorize the connection.
#[derive(Debug, Clone)]
pub struct ConnectionLink {
    pub requisition_id: String,
    pub link: String,
    pub status: RequisitionStatus,
}

/// Result of a finalize attempt. `Pending` and `NoAccounts` are expected
/// outcomes, not errors; the caller retries or gives up.
#[derive(Debug, Clone)]
pub enum FinalizeOutcome {
    Pending { status: RequisitionStatus },
    NoAccounts,
    Linked { accounts: Vec<LinkedAccount> },
}

pub struct ConnectionService {
    client: GoCardlessClient,
    manager: ConfigManager,
    config: Mutex<BankingConfig>,
}

impl ConnectionService {
    /// Loads the stored state and pushes any persisted credentials into
    /// the client.
    pub async fn new(client: GoCardlessClient, manager: ConfigManager) -> Result<Self, CoreError> {
        let config = manager.load()?;
        if config.has_credentials() {
            client
                .set_credentials(config.secret_id.clone(), config.secret_key.clone())
                .await;
        }
        Ok(Self {
            client,
            manager,
            config: Mutex::new(config),
        })
    }

    /// Shared handle to the aggregator client, for the sync pipeline.
    pub fn client(&self) -> GoCardlessClient {
        self.client.clone()
    }

    pub fn has_credentials(&self) -> bool {
        self.config().has_credentials()
    }

    pub fn credentials(&self) -> (String, String) {
        let config = self.config();
        (config.secret_id.clone(), config.secret_key.clone())
    }

    /// Stores a new key pair; the cached session token is invalidated so
    /// the next call re-authenticates.
    pub async fn set_credentials(&self, secret_id: &str, secret_key: &str) -> Result<(), CoreError> {
        self.client.set_credentials(secret_id, secret_key).await;
        let mut config = self.config();
        config.set_credentials(secret_id, secret_key);
        self.manager.save(&config)?;
        Ok(())
    }

    /// Removes the key pair and everything that depends on it: linked
    /// accounts, stored requisitions, and the cached session token.
    pub async fn remove_credentials(&self) -> Result<(), CoreError> {
        self.client.clear_credentials().await;
        let mut config = self.config();
        config.remove_credentials();
        self.manager.save(&config)?;
        Ok(())
    }

    pub async fn list_institutions(&self, country: &str) -> Result<Vec<Institution>, CoreError> {
        Ok(self.client.list_institutions(country).await?)
    }

    /// Creates a requisition for the institution and stores it for later
    /// finalize attempts. The returned link must be opened externally.
    pub async fn create_connection(&self, institution_id: &str) -> Result<ConnectionLink, CoreError> {
        let detail = self.client.create_requisition(institution_id).await?;
        {
            let mut config = self.config();
            config.push_requisition(Requisition {
                id: detail.id.clone(),
                institution_id: institution_id.to_string(),
                link: detail.link.clone(),
                status: detail.status.clone(),
                created_at: Utc::now(),
            });
            self.manager.save(&config)?;
        }
        Ok(ConnectionLink {
            requisition_id: detail.id,
            link: detail.link,
            status: detail.status,
        })
    }

    /// Re-queries the requisition and, once linked, turns each reported
    /// account id into a [`LinkedAccount`].
    ///
    /// A failing detail fetch skips that account and keeps going; one bad
    /// account never aborts the batch. Re-finalizing an already linked
    /// account refreshes its metadata instead of duplicating it.
    pub async fn finalize(
        &self,
        requisition_id: &str,
        institution_name: &str,
        institution_logo: &str,
    ) -> Result<FinalizeOutcome, CoreError> {
        let detail = self.client.requisition(requisition_id).await?;
        if !detail.status.is_linked() {
            self.store_requisition_status(requisition_id, detail.status.clone())?;
            tracing::info!(
                requisition_id = %requisition_id,
                status = %detail.status,
                "authorization not completed yet"
            );
            return Ok(FinalizeOutcome::Pending {
                status: detail.status,
            });
        }

        if detail.accounts.is_empty() {
            self.store_requisition_status(requisition_id, detail.status)?;
            return Ok(FinalizeOutcome::NoAccounts);
        }

        let mut linked = Vec::new();
        for provider_account_id in &detail.accounts {
            match self.client.account_details(provider_account_id).await {
                Ok(account) => linked.push(LinkedAccount {
                    provider_account_id: provider_account_id.clone(),
                    requisition_id: requisition_id.to_string(),
                    institution_name: institution_name.to_string(),
                    institution_logo: institution_logo.to_string(),
                    iban: account.iban.unwrap_or_default(),
                    owner_name: account.owner_name.unwrap_or_default(),
                    currency: account.currency.unwrap_or_else(|| "EUR".to_string()),
                    product: account
                        .product
                        .unwrap_or_else(|| institution_name.to_string()),
                    linked_at: Utc::now(),
                }),
                Err(err) => {
                    tracing::warn!(
                        account_id = %provider_account_id,
                        error = %err,
                        "skipping account: detail fetch failed"
                    );
                }
            }
        }

        {
            let mut config = self.config();
            for account in &linked {
                config.upsert_linked_account(account.clone());
            }
            if let Some(stored) = config.requisition_mut(requisition_id) {
                stored.status = detail.status;
            }
            self.manager.save(&config)?;
        }

        tracing::info!(
            requisition_id = %requisition_id,
            linked = linked.len(),
            "connection finalized"
        );
        Ok(FinalizeOutcome::Linked { accounts: linked })
    }

    pub fn linked_accounts(&self) -> Vec<LinkedAccount> {
        self.config().linked_accounts.clone()
    }

    pub fn requisitions(&self) -> Vec<Requisition> {
        self.config().requisitions.clone()
    }

    /// Removes a linked account; returns whether anything was removed.
    pub fn unlink(&self, provider_account_id: &str) -> Result<bool, CoreError> {
        let mut config = self.config();
        let removed = config.remove_linked_account(provider_account_id);
        if removed {
            self.manager.save(&config)?;
        }
        Ok(removed)
    }

    /// Requisitions are kept for audit; record the freshest status the
    /// provider reported.
    fn store_requisition_status(
        &self,
        requisition_id: &str,
        status: RequisitionStatus,
    ) -> Result<(), CoreError> {
        let mut config = self.config();
        if let Some(stored) = config.requisition_mut(requisition_id) {
            if stored.status != status {
                stored.status = status;
                self.manager.save(&config)?;
            }
        }
        Ok(())
    }

    fn config(&self) -> MutexGuard<'_, BankingConfig> {
        self.config
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
