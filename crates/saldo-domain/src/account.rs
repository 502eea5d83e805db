use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A ledger account holding a running balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub kind: AccountKind,
    #[serde(default)]
    pub balance: f64,
    #[serde(default = "Account::default_currency")]
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new account with a zero balance.
    pub fn new(name: impl Into<String>, kind: AccountKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            balance: 0.0,
            currency: Self::default_currency(),
            created_at: Utc::now(),
        }
    }

    pub fn default_currency() -> String {
        "EUR".into()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    #[default]
    Bank,
    Wallet,
    Other,
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AccountKind::Bank => "Bank",
            AccountKind::Wallet => "Wallet",
            AccountKind::Other => "Other",
        };
        f.write_str(label)
    }
}
