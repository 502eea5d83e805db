use saldo_domain::{LinkedAccount, Requisition};
use serde::{Deserialize, Serialize};

/// Contents of `banking-config.json`.
///
/// The file keeps camelCase keys so it stays readable next to the raw
/// aggregator payloads it mirrors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankingConfig {
    #[serde(default)]
    pub secret_id: String,
    #[serde(default)]
    pub secret_key: String,
    #[serde(default)]
    pub linked_accounts: Vec<LinkedAccount>,
    #[serde(default)]
    pub requisitions: Vec<Requisition>,
}

impl BankingConfig {
    pub fn has_credentials(&self) -> bool {
        !self.secret_id.is_empty() && !self.secret_key.is_empty()
    }

    pub fn set_credentials(&mut self, secret_id: impl Into<String>, secret_key: impl Into<String>) {
        self.secret_id = secret_id.into();
        self.secret_key = secret_key.into();
    }

    /// Clears the key pair together with every record that depends on it.
    pub fn remove_credentials(&mut self) {
        self.secret_id.clear();
        self.secret_key.clear();
        self.linked_accounts.clear();
        self.requisitions.clear();
    }

    /// Inserts a linked account, replacing any existing entry with the same
    /// provider account id.
    pub fn upsert_linked_account(&mut self, account: LinkedAccount) {
        match self
            .linked_accounts
            .iter_mut()
            .find(|existing| existing.provider_account_id == account.provider_account_id)
        {
            Some(existing) => *existing = account,
            None => self.linked_accounts.push(account),
        }
    }

    pub fn remove_linked_account(&mut self, provider_account_id: &str) -> bool {
        let before = self.linked_accounts.len();
        self.linked_accounts
            .retain(|account| account.provider_account_id != provider_account_id);
        self.linked_accounts.len() != before
    }

    pub fn push_requisition(&mut self, requisition: Requisition) {
        self.requisitions.push(requisition);
    }

    pub fn requisition_mut(&mut self, id: &str) -> Option<&mut Requisition> {
        self.requisitions
            .iter_mut()
            .find(|requisition| requisition.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use saldo_domain::RequisitionStatus;

    fn linked(provider_account_id: &str, institution_name: &str) -> LinkedAccount {
        LinkedAccount {
            provider_account_id: provider_account_id.into(),
            requisition_id: "req-1".into(),
            institution_name: institution_name.into(),
            institution_logo: String::new(),
            iban: String::new(),
            owner_name: String::new(),
            currency: "EUR".into(),
            product: String::new(),
            linked_at: Utc::now(),
        }
    }

    #[test]
    fn upsert_replaces_existing_entry() {
        let mut config = BankingConfig::default();
        config.upsert_linked_account(linked("acc-1", "Intesa"));
        config.upsert_linked_account(linked("acc-1", "Intesa Sanpaolo"));

        assert_eq!(config.linked_accounts.len(), 1);
        assert_eq!(config.linked_accounts[0].institution_name, "Intesa Sanpaolo");
    }

    #[test]
    fn remove_credentials_cascades() {
        let mut config = BankingConfig::default();
        config.set_credentials("id", "key");
        config.upsert_linked_account(linked("acc-1", "Intesa"));
        config.push_requisition(Requisition {
            id: "req-1".into(),
            institution_id: "INTESA_IT".into(),
            link: "https://example.com/auth".into(),
            status: RequisitionStatus::Created,
            created_at: Utc::now(),
        });

        config.remove_credentials();

        assert!(!config.has_credentials());
        assert!(config.linked_accounts.is_empty());
        assert!(config.requisitions.is_empty());
    }
}
