//! Merchant model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{MerchantId, MerchantStatus, SortField};

/// A store operator account managed by the admin interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Merchant {
    /// Unique identifier, assigned on create.
    pub id: MerchantId,
    /// Merchant display name.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Name of the merchant's store.
    pub store: String,
    /// Account status.
    pub status: MerchantStatus,
    /// Date the merchant was created. Never changes afterwards.
    pub join_date: NaiveDate,
}

impl Merchant {
    /// Builds a merchant from a draft, an assigned ID, and a join date.
    #[inline]
    #[must_use]
    pub fn from_draft(id: MerchantId, draft: MerchantDraft, join_date: NaiveDate) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            store: draft.store,
            status: draft.status,
            join_date,
        }
    }

    /// Replaces the user-editable fields, keeping `id` and `join_date`.
    #[inline]
    pub fn apply(&mut self, draft: MerchantDraft) {
        self.name = draft.name;
        self.email = draft.email;
        self.store = draft.store;
        self.status = draft.status;
    }

    /// Returns the editable fields of this merchant as a draft.
    #[inline]
    #[must_use]
    pub fn to_draft(&self) -> MerchantDraft {
        MerchantDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            store: self.store.clone(),
            status: self.status,
        }
    }

    /// Returns the value of `field` normalized for ordering: lowercase
    /// text, `active`/`inactive`, or an ISO `YYYY-MM-DD` date.
    #[must_use]
    pub fn sort_key(&self, field: SortField) -> String {
        match field {
            SortField::Name => self.name.to_lowercase(),
            SortField::Store => self.store.to_lowercase(),
            SortField::Status => self.status.as_str().to_owned(),
            SortField::JoinDate => self.join_date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// The user-editable part of a merchant: everything except `id` and
/// `join_date`.
///
/// Drafts are the input of create and update. A validated
/// [`crate::form::MerchantForm`] converts into one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantDraft {
    /// Merchant display name.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Name of the merchant's store.
    pub store: String,
    /// Account status.
    pub status: MerchantStatus,
}

impl MerchantDraft {
    /// Creates a draft from its parts.
    #[inline]
    #[must_use]
    pub fn new<N, E, S>(name: N, email: E, store: S, status: MerchantStatus) -> Self
    where
        N: Into<String>,
        E: Into<String>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            email: email.into(),
            store: store.into(),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Merchant {
        Merchant {
            id: MerchantId::new(1),
            name: "John Smith".to_owned(),
            email: "john@example.com".to_owned(),
            store: "Smith Electronics".to_owned(),
            status: MerchantStatus::Active,
            join_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        }
    }

    #[test]
    fn deserialize_merchant() {
        let json = r#"{
            "id": 3,
            "name": "Mike Brown",
            "email": "mike@example.com",
            "store": "Sports World",
            "status": "inactive",
            "joinDate": "2024-02-15"
        }"#;
        let merchant: Merchant = serde_json::from_str(json).unwrap();
        assert_eq!(merchant.id, MerchantId::new(3));
        assert_eq!(merchant.status, MerchantStatus::Inactive);
        assert_eq!(merchant.join_date, NaiveDate::from_ymd_opt(2024, 2, 15).unwrap());
    }

    #[test]
    fn serialize_uses_camel_case_join_date() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["joinDate"], "2024-01-15");
        assert_eq!(value["status"], "active");
        assert!(value.get("join_date").is_none());
    }

    #[test]
    fn apply_keeps_identity() {
        let mut merchant = sample();
        let draft = MerchantDraft::new("Jane Smith", "jane@example.com", "Jane's", MerchantStatus::Inactive);
        merchant.apply(draft.clone());
        assert_eq!(merchant.id, MerchantId::new(1));
        assert_eq!(merchant.join_date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(merchant.to_draft(), draft);
    }

    #[test]
    fn sort_keys_are_normalized() {
        let merchant = sample();
        assert_eq!(merchant.sort_key(SortField::Name), "john smith");
        assert_eq!(merchant.sort_key(SortField::Store), "smith electronics");
        assert_eq!(merchant.sort_key(SortField::Status), "active");
        assert_eq!(merchant.sort_key(SortField::JoinDate), "2024-01-15");
    }
}
