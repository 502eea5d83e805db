//! Domain models for ledger transactions.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    /// Signed amount: negative for expenses, non-negative for income.
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,
    #[serde(default)]
    pub source: TransactionSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Creates a manual transaction; the kind is derived from the amount sign.
    pub fn new(
        title: impl Into<String>,
        date: NaiveDate,
        amount: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            date,
            amount,
            kind: TransactionKind::from_amount(amount),
            category: category.into(),
            account_id: None,
            source: TransactionSource::Manual,
            bank_ref: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_account(mut self, account_id: Uuid) -> Self {
        self.account_id = Some(account_id);
        self
    }

    /// Marks this transaction as an automated bank import carrying the
    /// provider reference used for deduplication.
    pub fn with_bank_ref(mut self, bank_ref: impl Into<String>) -> Self {
        self.bank_ref = Some(bank_ref.into());
        self.source = TransactionSource::BankSync;
        self
    }

    pub fn is_expense(&self) -> bool {
        matches!(self.kind, TransactionKind::Expense)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Non-negative amounts are income, negative ones expenses.
    pub fn from_amount(amount: f64) -> Self {
        if amount < 0.0 {
            TransactionKind::Expense
        } else {
            TransactionKind::Income
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

/// Distinguishes automated bank imports from manually entered records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TransactionSource {
    #[default]
    #[serde(rename = "manual")]
    Manual,
    #[serde(rename = "bank-sync")]
    BankSync,
}

impl fmt::Display for TransactionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionSource::Manual => "manual",
            TransactionSource::BankSync => "bank-sync",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn kind_follows_amount_sign() {
        let expense = Transaction::new("Groceries", date(2026, 3, 1), -45.90, "Spesa");
        assert_eq!(expense.kind, TransactionKind::Expense);

        let income = Transaction::new("Salary", date(2026, 3, 1), 1800.0, "Lavoro");
        assert_eq!(income.kind, TransactionKind::Income);

        let zero = Transaction::new("Correction", date(2026, 3, 1), 0.0, "Other");
        assert_eq!(zero.kind, TransactionKind::Income);
    }

    #[test]
    fn bank_ref_marks_source_as_bank_sync() {
        let tx = Transaction::new("Esselunga", date(2026, 3, 1), -12.0, "Spesa")
            .with_bank_ref("TX123");
        assert_eq!(tx.source, TransactionSource::BankSync);
        assert_eq!(tx.bank_ref.as_deref(), Some("TX123"));
    }

    #[test]
    fn source_serializes_with_kebab_marker() {
        let tx = Transaction::new("Esselunga", date(2026, 3, 1), -12.0, "Spesa")
            .with_bank_ref("TX123");
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["source"], "bank-sync");
        assert_eq!(json["kind"], "expense");
    }
}
