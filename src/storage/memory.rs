//! In-memory storage backend.
//!
//! Provides [`InMemoryStorage`], the process-lifetime merchant collection.
//! Contents are lost when the store is dropped.

use chrono::NaiveDate;

use crate::error::{MerchantAdminError, Result};
use crate::models::{Merchant, MerchantDraft, MerchantId, seed_merchants};

/// Vector-backed merchant store.
///
/// # ID allocation
///
/// The next ID comes from a counter that starts one past the largest ID the
/// store was created with and only ever grows, so deleting a merchant never
/// frees its ID for reuse.
///
/// # Example
///
/// ```rust
/// use merchant_admin::storage::InMemoryStorage;
///
/// let storage = InMemoryStorage::seeded().unwrap();
/// assert_eq!(storage.len(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryStorage {
    /// Stored merchants, in insertion order.
    merchants: Vec<Merchant>,
    /// ID handed out by the next insert.
    next_id: MerchantId,
}

impl Default for InMemoryStorage {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    /// Creates an empty store whose first insert receives ID 1.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            merchants: Vec::new(),
            next_id: MerchantId::new(1),
        }
    }

    /// Creates a store holding the given merchants.
    ///
    /// Later duplicates of an ID already present are dropped so IDs stay
    /// unique.
    #[must_use]
    pub fn with_merchants(merchants: Vec<Merchant>) -> Self {
        let mut unique: Vec<Merchant> = Vec::with_capacity(merchants.len());
        for merchant in merchants {
            if unique.iter().any(|existing| existing.id == merchant.id) {
                tracing::warn!(id = %merchant.id, "dropping merchant with duplicate id");
                continue;
            }
            unique.push(merchant);
        }
        let next_id = unique
            .iter()
            .map(|m| m.id)
            .max()
            .map_or(MerchantId::new(1), MerchantId::next);
        Self {
            merchants: unique,
            next_id,
        }
    }

    /// Creates a store holding the fixed seed data set.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed data cannot be built.
    #[inline]
    pub fn seeded() -> Result<Self> {
        Ok(Self::with_merchants(seed_merchants()?))
    }

    /// Returns the number of stored merchants.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.merchants.len()
    }

    /// Returns `true` if the store holds no merchants.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.merchants.is_empty()
    }

    /// Returns the ID the next insert will receive.
    #[inline]
    #[must_use]
    pub const fn next_id(&self) -> MerchantId {
        self.next_id
    }

    /// Returns the position of the merchant with the given ID.
    fn position(&self, id: MerchantId) -> Result<usize> {
        self.merchants
            .iter()
            .position(|m| m.id == id)
            .ok_or(MerchantAdminError::NotFound(id))
    }
}

impl super::MerchantStore for InMemoryStorage {
    #[inline]
    fn merchants(&self) -> Result<Vec<Merchant>> {
        Ok(self.merchants.clone())
    }

    #[inline]
    fn get(&self, id: MerchantId) -> Result<Option<Merchant>> {
        Ok(self.merchants.iter().find(|m| m.id == id).cloned())
    }

    #[inline]
    fn insert(&mut self, draft: MerchantDraft, join_date: NaiveDate) -> Result<Merchant> {
        let id = self.next_id;
        self.next_id = id.next();
        let merchant = Merchant::from_draft(id, draft, join_date);
        self.merchants.push(merchant.clone());
        Ok(merchant)
    }

    #[inline]
    fn update(&mut self, id: MerchantId, draft: MerchantDraft) -> Result<Merchant> {
        let index = self.position(id)?;
        let merchant = self
            .merchants
            .get_mut(index)
            .ok_or(MerchantAdminError::NotFound(id))?;
        merchant.apply(draft);
        Ok(merchant.clone())
    }

    #[inline]
    fn remove(&mut self, id: MerchantId) -> Result<Merchant> {
        let index = self.position(id)?;
        Ok(self.merchants.remove(index))
    }
}
