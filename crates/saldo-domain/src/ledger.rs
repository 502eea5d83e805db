use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{account::Account, transaction::Transaction};

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// In-memory snapshot of the full ledger: accounts plus their transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u8,
}

impl Ledger {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            accounts: Vec::new(),
            transactions: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_account(&mut self, account: Account) -> Uuid {
        let id = account.id;
        self.accounts.push(account);
        self.touch();
        id
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn account_mut(&mut self, id: Uuid) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|account| account.id == id)
    }

    /// Appends a transaction and applies its signed amount to the owning
    /// account's balance in the same step.
    pub fn post_transaction(&mut self, transaction: Transaction) -> Uuid {
        if let Some(account_id) = transaction.account_id {
            if let Some(account) = self.account_mut(account_id) {
                account.balance += transaction.amount;
            }
        }
        let id = transaction.id;
        self.transactions.push(transaction);
        self.touch();
        id
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
