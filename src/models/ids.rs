//! Merchant identifier newtype.

use core::num::ParseIntError;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unique identifier for a merchant record.
///
/// Identifiers are assigned by the storage backend on create and are never
/// reused, even after the merchant that held one is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerchantId(u64);

impl MerchantId {
    /// Creates a new identifier from the given value.
    #[inline]
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw numeric value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the identifier that follows this one.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl core::fmt::Display for MerchantId {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for MerchantId {
    #[inline]
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for MerchantId {
    type Err = ParseIntError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merchant_id_serializes_as_number() {
        let id = MerchantId::new(7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "7");
        let deserialized: MerchantId = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, id);
    }

    #[test]
    fn next_increments() {
        assert_eq!(MerchantId::new(8).next(), MerchantId::new(9));
        assert_eq!(MerchantId::new(u64::MAX).next(), MerchantId::new(u64::MAX));
    }

    #[test]
    fn parse_from_str() {
        assert_eq!(" 3 ".parse::<MerchantId>().unwrap(), MerchantId::new(3));
        assert!("three".parse::<MerchantId>().is_err());
        assert!("-1".parse::<MerchantId>().is_err());
    }

    #[test]
    fn display_and_ordering() {
        assert_eq!(MerchantId::new(12).to_string(), "12");
        assert!(MerchantId::new(2) < MerchantId::new(10));
        let id: MerchantId = 5_u64.into();
        assert_eq!(id.get(), 5);
    }
}
