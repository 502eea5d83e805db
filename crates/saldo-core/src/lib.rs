//! saldo-core
//!
//! Bank-sync services for the Saldo ledger: connection orchestration,
//! transaction normalization and categorization, deduplication, and the
//! ledger sync pipeline. Depends on saldo-domain, saldo-banking, and
//! saldo-config. No terminal I/O, no direct storage backend.

pub mod categorizer;
pub mod connection_service;
pub mod dedup;
pub mod error;
pub mod normalizer;
pub mod public_api;
pub mod storage;
pub mod sync_service;

pub use categorizer::{default_rules, Categorizer, CategoryRule};
pub use connection_service::{ConnectionLink, ConnectionService, FinalizeOutcome};
pub use error::CoreError;
pub use storage::LedgerStore;
pub use sync_service::{AccountSyncResult, SyncReport, SyncRequest, SyncService};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("saldo_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
        tracing::info!("Saldo core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
