//! Wire types for the aggregator REST API.
//!
//! Field names follow the provider's JSON verbatim; everything the
//! provider may omit is optional with a serde default.

use chrono::NaiveDate;
use saldo_domain::RequisitionStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct TokenRequest {
    pub secret_id: String,
    pub secret_key: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access: String,
    /// Reported token lifetime in seconds (about 24h).
    pub access_expires: i64,
}

/// One supported bank for a given country.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Institution {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(
        rename = "transaction_total_days",
        default = "Institution::default_history_days",
        deserialize_with = "history_days"
    )]
    pub max_history_days: u32,
}

impl Institution {
    pub fn default_history_days() -> u32 {
        90
    }
}

/// The provider reports the history window as a bare number or a quoted
/// string depending on the institution.
fn history_days<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u32),
        Text(String),
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Num(days) => days,
        Raw::Text(days) => days
            .parse()
            .unwrap_or_else(|_| Institution::default_history_days()),
    })
}

#[derive(Debug, Serialize)]
pub struct CreateRequisitionRequest {
    pub redirect: String,
    pub institution_id: String,
    pub user_language: String,
}

/// Requisition payload returned on creation and on status checks.
#[derive(Debug, Clone, Deserialize)]
pub struct RequisitionDetail {
    pub id: String,
    #[serde(default)]
    pub link: String,
    pub status: RequisitionStatus,
    #[serde(default)]
    pub accounts: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AccountDetailEnvelope {
    pub account: AccountDetail,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDetail {
    pub iban: Option<String>,
    pub owner_name: Option<String>,
    pub currency: Option<String>,
    pub product: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TransactionsEnvelope {
    pub transactions: TransactionPages,
}

#[derive(Debug, Default, Deserialize)]
pub struct TransactionPages {
    #[serde(default)]
    pub booked: Vec<RawTransaction>,
    #[serde(default)]
    pub pending: Vec<RawTransaction>,
}

/// Unmodified transaction record as the provider reports it; field
/// population varies per bank.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    pub transaction_id: Option<String>,
    pub internal_transaction_id: Option<String>,
    pub booking_date: Option<NaiveDate>,
    pub value_date: Option<NaiveDate>,
    pub transaction_amount: Option<AmountValue>,
    pub remittance_information_unstructured: Option<String>,
    pub remittance_information_unstructured_array: Option<Vec<String>>,
    pub creditor_name: Option<String>,
    pub debtor_name: Option<String>,
    pub additional_information: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AmountValue {
    pub amount: String,
    #[serde(default)]
    pub currency: String,
}

#[derive(Debug, Deserialize)]
pub struct BalancesEnvelope {
    #[serde(default)]
    pub balances: Vec<BalanceEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceEntry {
    pub balance_amount: AmountValue,
    pub balance_type: Option<String>,
}
