use std::sync::Mutex;

use saldo_core::{CoreError, LedgerStore};
use saldo_domain::Ledger;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// In-memory ledger store so pipeline tests can inspect the result
/// without touching the filesystem.
pub struct MemoryLedgerStore {
    ledger: Mutex<Ledger>,
}

impl MemoryLedgerStore {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger: Mutex::new(ledger),
        }
    }

    pub fn snapshot(&self) -> Ledger {
        self.ledger.lock().unwrap().clone()
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn load(&self) -> Result<Ledger, CoreError> {
        Ok(self.ledger.lock().unwrap().clone())
    }

    fn save(&self, ledger: &Ledger) -> Result<(), CoreError> {
        *self.ledger.lock().unwrap() = ledger.clone();
        Ok(())
    }
}

/// Mounts a permissive token endpoint; individual tests add their own
/// expectations when call counts matter.
pub async fn mount_token_endpoint(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/token/new/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "tok-1",
            "access_expires": 86400,
        })))
        .mount(server)
        .await;
}
