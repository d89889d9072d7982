//! Data models for merchant records and list ordering.
//!
//! This module contains the [`Merchant`] entity, the editable
//! [`MerchantDraft`], the [`MerchantId`] newtype, the enumerations used for
//! status and ordering, and the seed data set.

mod enums;
mod ids;
mod merchant;
mod seed;

pub use chrono::NaiveDate;
pub use enums::{MerchantStatus, ParseVariantError, SortField, SortOrder};
pub use ids::MerchantId;
pub use merchant::{Merchant, MerchantDraft};
pub use seed::{parse_join_date, seed_merchants};
