//! Bank-connection records persisted between sync sessions.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{de::Deserializer, ser::Serializer, Deserialize, Serialize};

/// One authorization attempt against a single institution.
///
/// Created when the user picks a bank; kept for audit and retry after the
/// external authorization flow finishes or is abandoned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Requisition {
    pub id: String,
    pub institution_id: String,
    pub link: String,
    pub status: RequisitionStatus,
    pub created_at: DateTime<Utc>,
}

/// A bank account that completed the authorization flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LinkedAccount {
    pub provider_account_id: String,
    pub requisition_id: String,
    pub institution_name: String,
    #[serde(default)]
    pub institution_logo: String,
    #[serde(default)]
    pub iban: String,
    #[serde(default)]
    pub owner_name: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub product: String,
    pub linked_at: DateTime<Utc>,
}

/// Provider-side lifecycle of a requisition, serialized as the two-letter
/// wire code the aggregator reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequisitionStatus {
    Created,
    GivingConsent,
    UndergoingAuthentication,
    SelectingAccounts,
    GrantingAccess,
    Linked,
    Rejected,
    Suspended,
    Expired,
    Other(String),
}

impl RequisitionStatus {
    pub fn from_code(code: &str) -> Self {
        match code {
            "CR" => RequisitionStatus::Created,
            "GC" => RequisitionStatus::GivingConsent,
            "UA" => RequisitionStatus::UndergoingAuthentication,
            "SA" => RequisitionStatus::SelectingAccounts,
            "GA" => RequisitionStatus::GrantingAccess,
            "LN" => RequisitionStatus::Linked,
            "RJ" => RequisitionStatus::Rejected,
            "SU" => RequisitionStatus::Suspended,
            "EX" => RequisitionStatus::Expired,
            other => RequisitionStatus::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            RequisitionStatus::Created => "CR",
            RequisitionStatus::GivingConsent => "GC",
            RequisitionStatus::UndergoingAuthentication => "UA",
            RequisitionStatus::SelectingAccounts => "SA",
            RequisitionStatus::GrantingAccess => "GA",
            RequisitionStatus::Linked => "LN",
            RequisitionStatus::Rejected => "RJ",
            RequisitionStatus::Suspended => "SU",
            RequisitionStatus::Expired => "EX",
            RequisitionStatus::Other(code) => code,
        }
    }

    pub fn is_linked(&self) -> bool {
        matches!(self, RequisitionStatus::Linked)
    }

    /// Whether the provider will no longer advance this requisition.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequisitionStatus::Linked
                | RequisitionStatus::Rejected
                | RequisitionStatus::Suspended
                | RequisitionStatus::Expired
        )
    }
}

impl fmt::Display for RequisitionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for RequisitionStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for RequisitionStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = String::deserialize(deserializer)?;
        Ok(RequisitionStatus::from_code(&code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_wire_codes() {
        for code in ["CR", "GC", "UA", "SA", "GA", "LN", "RJ", "SU", "EX"] {
            let status = RequisitionStatus::from_code(code);
            assert_eq!(status.code(), code);
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{code}\""));
            let back: RequisitionStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn unknown_codes_are_preserved() {
        let status = RequisitionStatus::from_code("ZZ");
        assert_eq!(status, RequisitionStatus::Other("ZZ".into()));
        assert!(!status.is_linked());
        assert!(!status.is_terminal());
    }

    #[test]
    fn linked_account_uses_camel_case_keys() {
        let account = LinkedAccount {
            provider_account_id: "acc-1".into(),
            requisition_id: "req-1".into(),
            institution_name: "Intesa Sanpaolo".into(),
            institution_logo: String::new(),
            iban: "IT60X0542811101000000123456".into(),
            owner_name: "Mario Rossi".into(),
            currency: "EUR".into(),
            product: "Conto corrente".into(),
            linked_at: Utc::now(),
        };
        let json = serde_json::to_value(&account).unwrap();
        assert!(json.get("providerAccountId").is_some());
        assert!(json.get("ownerName").is_some());
        assert!(json.get("provider_account_id").is_none());
    }
}
