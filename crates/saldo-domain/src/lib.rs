//! saldo-domain
//!
//! Pure domain models (Ledger, Account, Transaction, bank connections).
//! No I/O, no HTTP, no storage. Only data types and core enums.

pub mod account;
pub mod connection;
pub mod ledger;
pub mod transaction;

pub use account::*;
pub use connection::*;
pub use ledger::*;
pub use transaction::*;
