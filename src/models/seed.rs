//! The fixed set of merchants every session starts from.

use chrono::NaiveDate;

use super::{Merchant, MerchantId, MerchantStatus};
use crate::error::{MerchantAdminError, Result};

/// Seed rows: id, name, email, store, status, join date.
const SEED: [(u64, &str, &str, &str, MerchantStatus, &str); 8] = [
    (1, "John Smith", "john@example.com", "Smith Electronics", MerchantStatus::Active, "2024-01-15"),
    (2, "Sarah Johnson", "sarah@example.com", "Fashion Hub", MerchantStatus::Active, "2024-02-01"),
    (3, "Mike Brown", "mike@example.com", "Sports World", MerchantStatus::Inactive, "2024-02-15"),
    (4, "Emma Davis", "emma@example.com", "Home Decor", MerchantStatus::Active, "2024-03-01"),
    (5, "Alex Wilson", "alex@example.com", "Tech Store", MerchantStatus::Active, "2024-03-10"),
    (6, "Lisa Chen", "lisa@example.com", "Beauty Shop", MerchantStatus::Active, "2024-03-15"),
    (7, "Tom Wilson", "tom@example.com", "Pet Supplies", MerchantStatus::Inactive, "2024-03-20"),
    (8, "Anna Lee", "anna@example.com", "Book Haven", MerchantStatus::Active, "2024-03-25"),
];

/// Parses an ISO `YYYY-MM-DD` join date.
///
/// # Errors
///
/// Returns [`MerchantAdminError::InvalidDate`] if `value` is not a valid
/// calendar date in that format.
#[inline]
pub fn parse_join_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|source| {
        MerchantAdminError::InvalidDate {
            value: value.to_owned(),
            source,
        }
    })
}

/// Returns the eight merchants the admin interface is seeded with.
///
/// # Errors
///
/// Returns [`MerchantAdminError::InvalidDate`] if a seed join date is
/// malformed.
#[inline]
pub fn seed_merchants() -> Result<Vec<Merchant>> {
    SEED.iter()
        .map(|&(id, name, email, store, status, join_date)| {
            Ok(Merchant {
                id: MerchantId::new(id),
                name: name.to_owned(),
                email: email.to_owned(),
                store: store.to_owned(),
                status,
                join_date: parse_join_date(join_date)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn seed_has_eight_unique_ids() {
        let merchants = seed_merchants().unwrap();
        assert_eq!(merchants.len(), 8);
        let ids: HashSet<MerchantId> = merchants.iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), 8);
        assert!((1..=8).all(|n| ids.contains(&MerchantId::new(n))));
    }

    #[test]
    fn seed_contains_mike_brown_as_id_three() {
        let merchants = seed_merchants().unwrap();
        let mike = merchants.iter().find(|m| m.id == MerchantId::new(3)).unwrap();
        assert_eq!(mike.name, "Mike Brown");
        assert_eq!(mike.status, MerchantStatus::Inactive);
    }

    #[test]
    fn parse_join_date_rejects_garbage() {
        assert!(parse_join_date("2024-02-30").is_err());
        assert!(parse_join_date("15/01/2024").is_err());
        assert_eq!(
            parse_join_date("2024-03-25").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 25).unwrap()
        );
    }
}
