use std::sync::{Arc, RwLock};

use secrecy::{ExposeSecret, Secret};

/// Aggregator API key pair held in memory.
///
/// The secret key is wrapped so it never shows up in debug output; the
/// plaintext lives only in the local configuration file.
#[derive(Clone)]
pub struct ApiCredentials {
    secret_id: String,
    secret_key: Secret<String>,
}

impl ApiCredentials {
    pub fn new(secret_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            secret_id: secret_id.into(),
            secret_key: Secret::new(secret_key.into()),
        }
    }

    pub fn secret_id(&self) -> &str {
        &self.secret_id
    }

    pub fn secret_key(&self) -> &str {
        self.secret_key.expose_secret()
    }
}

/// Shared, process-wide store for the aggregator key pair.
#[derive(Clone, Default)]
pub struct CredentialStore {
    inner: Arc<RwLock<Option<ApiCredentials>>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, credentials: ApiCredentials) {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(credentials);
    }

    pub fn clear(&self) {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = None;
    }

    pub fn is_configured(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }

    pub fn current(&self) -> Option<ApiCredentials> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_starts_empty() {
        let store = CredentialStore::new();
        assert!(!store.is_configured());
        assert!(store.current().is_none());
    }

    #[test]
    fn set_and_clear() {
        let store = CredentialStore::new();
        store.set(ApiCredentials::new("id", "key"));
        assert!(store.is_configured());
        let current = store.current().expect("credentials set");
        assert_eq!(current.secret_id(), "id");
        assert_eq!(current.secret_key(), "key");

        store.clear();
        assert!(!store.is_configured());
    }
}
