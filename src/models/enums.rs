//! Enumeration types for constrained merchant and view values.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Returned when a string does not name any variant of an enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} {value:?} (expected one of: {expected})")]
pub struct ParseVariantError {
    /// Human-readable name of the enumeration.
    kind: &'static str,
    /// The rejected input.
    value: String,
    /// Comma-separated list of accepted spellings.
    expected: &'static str,
}

impl ParseVariantError {
    /// Builds an error for the given enumeration and input.
    fn new(kind: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
            expected,
        }
    }
}

/// Account status of a merchant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MerchantStatus {
    /// The merchant can process transactions.
    #[default]
    Active,
    /// The merchant account is suspended.
    Inactive,
}

impl MerchantStatus {
    /// Returns the lowercase wire name.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for MerchantStatus {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MerchantStatus {
    type Err = ParseVariantError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(ParseVariantError::new("status", other, "active, inactive")),
        }
    }
}

/// Merchant attribute the list view can be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    /// Merchant display name.
    #[default]
    Name,
    /// Store name.
    Store,
    /// Account status.
    Status,
    /// Date the merchant joined.
    JoinDate,
}

impl SortField {
    /// All sortable fields, in column order.
    pub const ALL: [Self; 4] = [Self::Name, Self::Store, Self::Status, Self::JoinDate];

    /// Returns the camelCase wire name.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Store => "store",
            Self::Status => "status",
            Self::JoinDate => "joinDate",
        }
    }

    /// Returns the column heading shown for this field.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Store => "Store",
            Self::Status => "Status",
            Self::JoinDate => "Join Date",
        }
    }
}

impl fmt::Display for SortField {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = ParseVariantError;

    /// Accepts the wire name case-insensitively, plus `join-date`,
    /// `join_date` and `date` for the join date column.
    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "store" => Ok(Self::Store),
            "status" => Ok(Self::Status),
            "joindate" | "join-date" | "join_date" | "date" => Ok(Self::JoinDate),
            _ => Err(ParseVariantError::new(
                "sort field",
                s,
                "name, store, status, joinDate",
            )),
        }
    }
}

/// Direction of the list ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl SortOrder {
    /// Returns the opposite direction.
    #[inline]
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Returns a descriptive name for the direction.
    #[inline]
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Asc => "ascending",
            Self::Desc => "descending",
        }
    }
}

impl fmt::Display for SortOrder {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serde_lowercase() {
        let variants = [
            (MerchantStatus::Active, r#""active""#),
            (MerchantStatus::Inactive, r#""inactive""#),
        ];
        for (variant, expected_json) in variants {
            let json = serde_json::to_string(&variant).unwrap();
            assert_eq!(json, expected_json);
            let deserialized: MerchantStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(deserialized, variant);
        }
    }

    #[test]
    fn status_defaults_to_active() {
        assert_eq!(MerchantStatus::default(), MerchantStatus::Active);
    }

    #[test]
    fn status_parse_is_exact() {
        assert_eq!("inactive".parse::<MerchantStatus>().unwrap(), MerchantStatus::Inactive);
        let err = "Suspended".parse::<MerchantStatus>().unwrap_err();
        assert!(err.to_string().contains("Suspended"));
        assert!(err.to_string().contains("active, inactive"));
    }

    #[test]
    fn sort_field_join_date_is_camel_case() {
        let json = serde_json::to_string(&SortField::JoinDate).unwrap();
        assert_eq!(json, r#""joinDate""#);
        assert_eq!(SortField::JoinDate.to_string(), "joinDate");
    }

    #[test]
    fn sort_field_parse_aliases() {
        for input in ["joinDate", "JOINDATE", "join-date", "join_date", "date"] {
            assert_eq!(input.parse::<SortField>().unwrap(), SortField::JoinDate);
        }
        assert_eq!("Store".parse::<SortField>().unwrap(), SortField::Store);
        assert!("email".parse::<SortField>().is_err());
    }

    #[test]
    fn sort_order_flip() {
        assert_eq!(SortOrder::Asc.flipped(), SortOrder::Desc);
        assert_eq!(SortOrder::Desc.flipped(), SortOrder::Asc);
        assert_eq!(SortOrder::Desc.to_string(), "desc");
        assert_eq!(SortOrder::Asc.describe(), "ascending");
    }

    #[test]
    fn invalid_status_fails_deserialization() {
        let result = serde_json::from_str::<MerchantStatus>(r#""pending""#);
        assert!(result.is_err());
    }
}
