//! saldo-config
//!
//! Persistence for the bank-sync state file: aggregator credentials plus
//! the linked accounts and requisitions that survive restarts.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::BankingConfig;
