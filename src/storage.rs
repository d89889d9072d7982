//! Storage backends holding the canonical merchant collection.
//!
//! The [`MerchantStore`] trait is the seam between the list controller and
//! wherever merchants live. The only backend shipped is
//! [`InMemoryStorage`], which keeps records for the lifetime of the process.

mod memory;

pub use memory::InMemoryStorage;

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{Merchant, MerchantDraft, MerchantId};

/// Backend owning the merchant collection and ID allocation.
///
/// Mutating methods take `&mut self`; a store is owned by exactly one
/// controller.
pub trait MerchantStore: core::fmt::Debug {
    /// Returns all merchants in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to read.
    fn merchants(&self) -> Result<Vec<Merchant>>;

    /// Looks up a merchant by ID.
    ///
    /// Returns `Ok(None)` if no merchant has that ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to read.
    fn get(&self, id: MerchantId) -> Result<Option<Merchant>>;

    /// Appends a new merchant built from `draft`, assigning a fresh ID that
    /// has never been used by this store.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to write.
    fn insert(&mut self, draft: MerchantDraft, join_date: NaiveDate) -> Result<Merchant>;

    /// Replaces the editable fields of the merchant with the given ID,
    /// keeping its ID and join date. Returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::MerchantAdminError::NotFound`] if no merchant
    /// has that ID.
    fn update(&mut self, id: MerchantId, draft: MerchantDraft) -> Result<Merchant>;

    /// Removes the merchant with the given ID and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::MerchantAdminError::NotFound`] if no merchant
    /// has that ID.
    fn remove(&mut self, id: MerchantId) -> Result<Merchant>;
}
