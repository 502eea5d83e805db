//! saldo-banking
//!
//! Client for the GoCardless Bank Account Data API (PSD2 aggregator).
//! Covers the token session, institution catalog, requisition lifecycle,
//! and per-account detail/transaction/balance endpoints. No ledger logic.

pub mod client;
pub mod credentials;
pub mod error;
pub mod session;
pub mod types;

pub use client::{GoCardlessClient, DEFAULT_BASE_URL};
pub use credentials::{ApiCredentials, CredentialStore};
pub use error::BankingError;
pub use session::SessionTokenManager;
pub use types::*;
