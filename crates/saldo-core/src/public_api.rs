//! Stable, public-facing helpers that wrap the internal service layer.
//!
//! Frontends rely on these instead of the full service surface: every
//! operation catches internal failures and returns a serializable
//! outcome, so no error type crosses the boundary to the caller. Pending
//! authorization is an expected state, reported as a message rather than
//! an error.

use saldo_banking::Institution;
use saldo_domain::LinkedAccount;
use serde::Serialize;

use crate::{
    connection_service::{ConnectionService, FinalizeOutcome},
    sync_service::{SyncRequest, SyncService},
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionsOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub institutions: Vec<Institution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requisition_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeApiOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub accounts: Vec<LinkedAccount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imported: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSyncOutcome {
    pub provider_account_id: String,
    #[serde(flatten)]
    pub result: SyncOutcome,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlinkOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Lists the supported institutions for the given ISO country code.
pub async fn api_list_institutions(
    service: &ConnectionService,
    country: &str,
) -> InstitutionsOutcome {
    match service.list_institutions(country).await {
        Ok(institutions) => InstitutionsOutcome {
            success: true,
            institutions,
            error: None,
        },
        Err(err) => InstitutionsOutcome {
            success: false,
            institutions: Vec::new(),
            error: Some(err.to_string()),
        },
    }
}

/// Creates a requisition and returns the authorization link the user must
/// open on the institution's site.
pub async fn api_create_connection(
    service: &ConnectionService,
    institution_id: &str,
) -> ConnectionOutcome {
    match service.create_connection(institution_id).await {
        Ok(link) => ConnectionOutcome {
            success: true,
            requisition_id: Some(link.requisition_id),
            link: Some(link.link),
            error: None,
        },
        Err(err) => ConnectionOutcome {
            success: false,
            requisition_id: None,
            link: None,
            error: Some(err.to_string()),
        },
    }
}

/// Finalizes a connection once the user completed authorization. Safe to
/// call repeatedly; reports a retryable message while the requisition is
/// still pending.
pub async fn api_finalize(
    service: &ConnectionService,
    requisition_id: &str,
    institution_name: &str,
    institution_logo: &str,
) -> FinalizeApiOutcome {
    match service
        .finalize(requisition_id, institution_name, institution_logo)
        .await
    {
        Ok(FinalizeOutcome::Linked { accounts }) => FinalizeApiOutcome {
            success: true,
            accounts,
            status: None,
            message: None,
            error: None,
        },
        Ok(FinalizeOutcome::Pending { status }) => FinalizeApiOutcome {
            success: false,
            accounts: Vec::new(),
            status: Some(status.code().to_string()),
            message: Some("Authorization not completed yet. Try again.".to_string()),
            error: None,
        },
        Ok(FinalizeOutcome::NoAccounts) => FinalizeApiOutcome {
            success: false,
            accounts: Vec::new(),
            status: None,
            message: Some("No accounts were returned for this connection.".to_string()),
            error: None,
        },
        Err(err) => FinalizeApiOutcome {
            success: false,
            accounts: Vec::new(),
            status: None,
            message: None,
            error: Some(err.to_string()),
        },
    }
}

/// Syncs a single linked account into the ledger.
pub async fn api_sync_account(service: &SyncService, request: &SyncRequest) -> SyncOutcome {
    match service.sync_account(request).await {
        Ok(report) => SyncOutcome {
            success: true,
            imported: Some(report.imported),
            total: Some(report.total),
            skipped: Some(report.skipped),
            error: None,
        },
        Err(err) => SyncOutcome {
            success: false,
            imported: None,
            total: None,
            skipped: None,
            error: Some(err.to_string()),
        },
    }
}

/// Syncs every requested account sequentially; a failing account is
/// reported in place and does not stop the rest.
pub async fn api_sync_all(
    service: &SyncService,
    requests: &[SyncRequest],
) -> Vec<AccountSyncOutcome> {
    service
        .sync_all(requests)
        .await
        .into_iter()
        .map(|result| AccountSyncOutcome {
            provider_account_id: result.provider_account_id,
            result: match result.outcome {
                Ok(report) => SyncOutcome {
                    success: true,
                    imported: Some(report.imported),
                    total: Some(report.total),
                    skipped: Some(report.skipped),
                    error: None,
                },
                Err(err) => SyncOutcome {
                    success: false,
                    imported: None,
                    total: None,
                    skipped: None,
                    error: Some(err.to_string()),
                },
            },
        })
        .collect()
}

/// Unlinks a bank account from the sync configuration.
pub fn api_unlink(service: &ConnectionService, provider_account_id: &str) -> UnlinkOutcome {
    match service.unlink(provider_account_id) {
        Ok(true) => UnlinkOutcome {
            success: true,
            error: None,
        },
        Ok(false) => UnlinkOutcome {
            success: false,
            error: Some("Account was not linked.".to_string()),
        },
        Err(err) => UnlinkOutcome {
            success: false,
            error: Some(err.to_string()),
        },
    }
}

/// Reads the provider-side balance for a linked account.
pub async fn api_remote_balance(
    service: &SyncService,
    provider_account_id: &str,
) -> BalanceOutcome {
    match service.remote_balance(provider_account_id).await {
        Ok(balance) => BalanceOutcome {
            success: true,
            balance: Some(balance),
            error: None,
        },
        Err(err) => BalanceOutcome {
            success: false,
            balance: None,
            error: Some(err.to_string()),
        },
    }
}
