//! The reconciliation pipeline: fetch, normalize, categorize, dedupe,
//! apply.
//!
//! Ledger mutation is serialized behind a single write gate; dedup runs
//! against the freshly loaded ledger inside that gate, which is what
//! makes replaying a batch safe.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use saldo_banking::GoCardlessClient;
use serde::Serialize;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{categorizer::Categorizer, dedup, normalizer, storage::LedgerStore, CoreError};

/// How far back a sync reaches when the caller gives no start date.
const DEFAULT_SYNC_WINDOW_DAYS: i64 = 90;

/// One account to pull: the provider-side id plus where the result lands
/// in the ledger.
#[derive(Debug, Clone)]
pub struct SyncRequest {
    pub provider_account_id: String,
    /// Display label used in logs (usually the institution name).
    pub account_label: String,
    pub ledger_account_id: Option<Uuid>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub imported: usize,
    pub total: usize,
    pub skipped: usize,
}

/// Per-account result of a `sync_all` run.
#[derive(Debug)]
pub struct AccountSyncResult {
    pub provider_account_id: String,
    pub outcome: Result<SyncReport, CoreError>,
}

pub struct SyncService {
    client: GoCardlessClient,
    store: Arc<dyn LedgerStore>,
    categorizer: Categorizer,
    write_gate: Mutex<()>,
}

impl SyncService {
    pub fn new(client: GoCardlessClient, store: Arc<dyn LedgerStore>) -> Self {
        Self::with_categorizer(client, store, Categorizer::default())
    }

    pub fn with_categorizer(
        client: GoCardlessClient,
        store: Arc<dyn LedgerStore>,
        categorizer: Categorizer,
    ) -> Self {
        Self {
            client,
            store,
            categorizer,
            write_gate: Mutex::new(()),
        }
    }

    /// Pulls booked transactions for one account and merges them into the
    /// ledger. Stages run strictly in sequence; only dedupe+apply hold the
    /// write gate, so slow network calls never block other readers.
    pub async fn sync_account(&self, request: &SyncRequest) -> Result<SyncReport, CoreError> {
        let date_from = request
            .date_from
            .unwrap_or_else(|| Utc::now().date_naive() - Duration::days(DEFAULT_SYNC_WINDOW_DAYS));
        let raw = self
            .client
            .booked_transactions(
                &request.provider_account_id,
                Some(date_from),
                request.date_to,
            )
            .await?;

        let normalized = normalizer::normalize_batch(
            &raw,
            &request.account_label,
            request.ledger_account_id,
            &self.categorizer,
        );
        let total = normalized.len();

        let _gate = self.write_gate.lock().await;
        let mut ledger = self.store.load()?;
        if let Some(account_id) = request.ledger_account_id {
            if ledger.account(account_id).is_none() {
                return Err(CoreError::AccountNotFound(account_id));
            }
        }

        let accepted = dedup::dedupe(normalized, &ledger.transactions);
        let imported = accepted.len();
        for transaction in accepted {
            ledger.post_transaction(transaction);
        }
        if imported > 0 {
            self.store.save(&ledger)?;
        }

        let report = SyncReport {
            imported,
            total,
            skipped: total - imported,
        };
        tracing::info!(
            account = %request.account_label,
            imported = report.imported,
            skipped = report.skipped,
            "bank sync finished"
        );
        Ok(report)
    }

    /// Syncs every requested account sequentially, respecting aggregator
    /// rate limits. A failing account is reported and the loop moves on.
    pub async fn sync_all(&self, requests: &[SyncRequest]) -> Vec<AccountSyncResult> {
        let mut results = Vec::with_capacity(requests.len());
        for request in requests {
            let outcome = self.sync_account(request).await;
            if let Err(err) = &outcome {
                tracing::warn!(
                    account_id = %request.provider_account_id,
                    error = %err,
                    "account sync failed; continuing with remaining accounts"
                );
            }
            results.push(AccountSyncResult {
                provider_account_id: request.provider_account_id.clone(),
                outcome,
            });
        }
        results
    }

    /// Current balance as the provider reports it, independent of the
    /// local ledger.
    pub async fn remote_balance(&self, provider_account_id: &str) -> Result<f64, CoreError> {
        Ok(self.client.balance(provider_account_id).await?)
    }
}
