use saldo_domain::Ledger;

use crate::CoreError;

/// Abstraction over persistence backends capable of storing the ledger.
pub trait LedgerStore: Send + Sync {
    fn load(&self) -> Result<Ledger, CoreError>;
    fn save(&self, ledger: &Ledger) -> Result<(), CoreError>;
}
