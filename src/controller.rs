//! Merchant list controller.
//!
//! [`MerchantList`] owns the storage backend and all view state of the
//! merchant list page: search term, sort configuration, current page, the
//! open form (if any), and the pending deletion (if any). Every mutation
//! of the collection goes through one of its transition methods.
//!
//! ```rust
//! use merchant_admin::controller::MerchantList;
//! use merchant_admin::models::MerchantId;
//! use merchant_admin::storage::InMemoryStorage;
//!
//! let mut list = MerchantList::builder()
//!     .storage(InMemoryStorage::seeded().unwrap())
//!     .build()
//!     .unwrap();
//! let _target = list.request_delete(MerchantId::new(3)).unwrap();
//! let removed = list.confirm_delete().unwrap();
//! assert_eq!(removed.name, "Mike Brown");
//! assert_eq!(list.view().unwrap().total_items, 7);
//! ```

use chrono::{NaiveDate, Utc};

use crate::error::{MerchantAdminError, Result};
use crate::form::MerchantForm;
use crate::models::{Merchant, MerchantDraft, MerchantId, SortField};
use crate::query::{MerchantPage, MerchantQuery, SortConfig, total_pages};
use crate::storage::MerchantStore;

/// Source of the current date for new merchants' join dates.
pub type Clock = fn() -> NaiveDate;

/// Returns today's date in UTC.
fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Which form, if any, is currently shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    /// The list is shown; no form is open.
    #[default]
    Closed,
    /// The empty form for a new merchant is open.
    Creating,
    /// The form for an existing merchant is open.
    Editing(MerchantId),
}

/// State of the two-step delete confirmation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeleteState {
    /// No deletion requested.
    #[default]
    Idle,
    /// Waiting for the user to confirm deleting this merchant.
    ConfirmPending(MerchantId),
}

/// Builder for constructing a [`MerchantList`].
#[derive(Debug)]
pub struct MerchantListBuilder<S: MerchantStore> {
    /// Storage backend.
    storage: Option<S>,
    /// Date source for join dates.
    clock: Clock,
    /// Initial view parameters.
    query: MerchantQuery,
}

impl<S: MerchantStore> MerchantListBuilder<S> {
    /// Sets the storage backend.
    #[inline]
    #[must_use]
    pub fn storage(mut self, storage: S) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Overrides the date source (defaults to today in UTC).
    #[inline]
    #[must_use]
    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Sets the initial search term.
    #[inline]
    #[must_use]
    pub fn search<T: Into<String>>(mut self, term: T) -> Self {
        self.query.search = term.into();
        self
    }

    /// Sets the initial sort configuration.
    #[inline]
    #[must_use]
    pub fn sort(mut self, config: SortConfig) -> Self {
        self.query.sort = config;
        self
    }

    /// Builds the controller, starting on page 1.
    ///
    /// # Errors
    ///
    /// Returns [`MerchantAdminError::MissingStorage`] if no storage was
    /// provided.
    #[inline]
    pub fn build(self) -> Result<MerchantList<S>> {
        let store = self.storage.ok_or(MerchantAdminError::MissingStorage)?;
        Ok(MerchantList {
            store,
            clock: self.clock,
            query: MerchantQuery {
                page: 1,
                ..self.query
            },
            form: FormMode::Closed,
            deletion: DeleteState::Idle,
        })
    }
}

/// The merchant list page: canonical collection plus view state.
#[derive(Debug)]
pub struct MerchantList<S: MerchantStore> {
    /// Storage backend holding the collection.
    store: S,
    /// Date source for join dates.
    clock: Clock,
    /// Search term, sort configuration, and current page.
    query: MerchantQuery,
    /// Open form, if any.
    form: FormMode,
    /// Pending deletion, if any.
    deletion: DeleteState,
}

impl<S: MerchantStore> MerchantList<S> {
    /// Creates a new builder for configuring the controller.
    #[inline]
    #[must_use]
    pub fn builder() -> MerchantListBuilder<S> {
        MerchantListBuilder {
            storage: None,
            clock: utc_today,
            query: MerchantQuery::default(),
        }
    }

    /// Returns the storage backend.
    #[inline]
    pub const fn store(&self) -> &S {
        &self.store
    }

    // ── Derived view ────────────────────────────────────────────────

    /// Derives the current page of the filtered, sorted list.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to read.
    #[inline]
    pub fn view(&self) -> Result<MerchantPage> {
        let merchants = self.store.merchants()?;
        Ok(self.query.run(&merchants))
    }

    /// Returns every merchant matching the search, in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to read.
    #[inline]
    pub fn ordered(&self) -> Result<Vec<Merchant>> {
        let merchants = self.store.merchants()?;
        Ok(self.query.ordered(&merchants).into_iter().cloned().collect())
    }

    /// Looks up a merchant by ID.
    ///
    /// # Errors
    ///
    /// Returns [`MerchantAdminError::NotFound`] if no merchant has that ID.
    #[inline]
    pub fn merchant(&self, id: MerchantId) -> Result<Merchant> {
        self.store.get(id)?.ok_or(MerchantAdminError::NotFound(id))
    }

    /// Returns the current view parameters.
    #[inline]
    pub const fn query(&self) -> &MerchantQuery {
        &self.query
    }

    /// Returns the current search term.
    #[inline]
    pub fn search_term(&self) -> &str {
        &self.query.search
    }

    /// Returns the active sort configuration.
    #[inline]
    pub const fn sort_config(&self) -> SortConfig {
        self.query.sort
    }

    /// Returns the current 1-based page.
    #[inline]
    pub const fn current_page(&self) -> usize {
        self.query.page
    }

    /// Returns which form is open.
    #[inline]
    pub const fn form_mode(&self) -> FormMode {
        self.form
    }

    /// Returns the delete confirmation state.
    #[inline]
    pub const fn delete_state(&self) -> DeleteState {
        self.deletion
    }

    /// Returns the merchant awaiting delete confirmation, if any.
    #[inline]
    pub const fn pending_deletion(&self) -> Option<MerchantId> {
        match self.deletion {
            DeleteState::Idle => None,
            DeleteState::ConfirmPending(id) => Some(id),
        }
    }

    // ── List intents ────────────────────────────────────────────────

    /// Replaces the search term and returns to page 1.
    #[inline]
    pub fn set_search<T: Into<String>>(&mut self, term: T) {
        self.query.search = term.into();
        self.query.page = 1;
        tracing::debug!(search = %self.query.search, "search changed");
    }

    /// Sorts by `field`, flipping the direction if it is already active,
    /// and returns to page 1. Returns the new configuration.
    #[inline]
    pub fn sort_by(&mut self, field: SortField) -> SortConfig {
        self.query.sort = self.query.sort.toggled(field);
        self.query.page = 1;
        tracing::debug!(field = %self.query.sort.field, order = %self.query.sort.order, "sort changed");
        self.query.sort
    }

    /// Moves to `page`, clamped to the pages that exist. Returns the page
    /// actually selected.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to read.
    #[inline]
    pub fn go_to_page(&mut self, page: usize) -> Result<usize> {
        let last = self.last_page_number()?;
        self.query.page = page.clamp(1, last);
        Ok(self.query.page)
    }

    /// Moves to the first page.
    #[inline]
    pub const fn first_page(&mut self) -> usize {
        self.query.page = 1;
        self.query.page
    }

    /// Moves back one page, stopping at page 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to read.
    #[inline]
    pub fn previous_page(&mut self) -> Result<usize> {
        self.go_to_page(self.query.page.saturating_sub(1))
    }

    /// Moves forward one page, stopping at the last page.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to read.
    #[inline]
    pub fn next_page(&mut self) -> Result<usize> {
        self.go_to_page(self.query.page.saturating_add(1))
    }

    /// Moves to the last page.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to read.
    #[inline]
    pub fn last_page(&mut self) -> Result<usize> {
        let last = self.last_page_number()?;
        self.go_to_page(last)
    }

    /// Returns the highest selectable page (at least 1).
    fn last_page_number(&self) -> Result<usize> {
        let merchants = self.store.merchants()?;
        let matching = self.query.ordered(&merchants).len();
        Ok(total_pages(matching).max(1))
    }

    // ── Form intents ────────────────────────────────────────────────

    /// Opens the empty form for a new merchant, status preselected as
    /// active. Any pending deletion is dismissed.
    #[inline]
    pub fn open_create(&mut self) -> MerchantForm {
        self.form = FormMode::Creating;
        self.deletion = DeleteState::Idle;
        MerchantForm::default()
    }

    /// Opens the form for an existing merchant, prefilled with its current
    /// values. Any pending deletion is dismissed.
    ///
    /// # Errors
    ///
    /// Returns [`MerchantAdminError::NotFound`] if no merchant has that ID;
    /// the form mode is left unchanged.
    #[inline]
    pub fn open_edit(&mut self, id: MerchantId) -> Result<MerchantForm> {
        let merchant = self.merchant(id)?;
        self.form = FormMode::Editing(id);
        self.deletion = DeleteState::Idle;
        Ok(MerchantForm::from(&merchant))
    }

    /// Closes the open form without touching the collection.
    #[inline]
    pub const fn cancel_form(&mut self) {
        self.form = FormMode::Closed;
    }

    /// Validates `form` and applies it according to the open form: a new
    /// merchant in create mode, an update in edit mode. Closes the form on
    /// success.
    ///
    /// # Errors
    ///
    /// Returns [`MerchantAdminError::Validation`] with every failing field
    /// (the form stays open), [`MerchantAdminError::NoFormOpen`] if no form
    /// is open, or [`MerchantAdminError::NotFound`] if the merchant being
    /// edited no longer exists (the form is closed).
    #[tracing::instrument(skip_all)]
    pub fn submit_form(&mut self, form: &MerchantForm) -> Result<Merchant> {
        let mode = self.form;
        if mode == FormMode::Closed {
            return Err(MerchantAdminError::NoFormOpen);
        }
        let draft = form.validate_draft().inspect_err(|errors| {
            tracing::warn!(%errors, "form submission blocked");
        })?;
        let result = match mode {
            FormMode::Closed => Err(MerchantAdminError::NoFormOpen),
            FormMode::Creating => self.create(draft),
            FormMode::Editing(id) => self.update(id, draft),
        };
        self.form = FormMode::Closed;
        result
    }

    // ── Collection transitions ──────────────────────────────────────

    /// Appends a new merchant with a fresh ID and today's join date, and
    /// closes any open form.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to write.
    #[tracing::instrument(skip_all)]
    pub fn create(&mut self, draft: MerchantDraft) -> Result<Merchant> {
        let join_date = (self.clock)();
        let merchant = self.store.insert(draft, join_date)?;
        self.form = FormMode::Closed;
        tracing::debug!(id = %merchant.id, %join_date, "merchant created");
        Ok(merchant)
    }

    /// Replaces the editable fields of a merchant, keeping its ID and join
    /// date, and closes any open form.
    ///
    /// # Errors
    ///
    /// Returns [`MerchantAdminError::NotFound`] if no merchant has that ID.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub fn update(&mut self, id: MerchantId, draft: MerchantDraft) -> Result<Merchant> {
        let merchant = self.store.update(id, draft).inspect_err(|err| {
            tracing::warn!(%err, "update rejected");
        })?;
        self.form = FormMode::Closed;
        tracing::debug!("merchant updated");
        Ok(merchant)
    }

    /// Removes a merchant immediately, then re-clamps the current page.
    ///
    /// # Errors
    ///
    /// Returns [`MerchantAdminError::NotFound`] if no merchant has that ID.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub fn delete(&mut self, id: MerchantId) -> Result<Merchant> {
        let removed = self.store.remove(id).inspect_err(|err| {
            tracing::warn!(%err, "delete rejected");
        })?;
        if self.form == FormMode::Editing(id) {
            self.form = FormMode::Closed;
        }
        let current = self.query.page;
        let _page = self.go_to_page(current)?;
        tracing::debug!("merchant deleted");
        Ok(removed)
    }

    // ── Delete confirmation ─────────────────────────────────────────

    /// Asks for confirmation before deleting a merchant. Returns the
    /// merchant so the confirmation can name it.
    ///
    /// # Errors
    ///
    /// Returns [`MerchantAdminError::NotFound`] if no merchant has that ID;
    /// the state is left unchanged.
    #[inline]
    pub fn request_delete(&mut self, id: MerchantId) -> Result<Merchant> {
        let merchant = self.merchant(id)?;
        self.deletion = DeleteState::ConfirmPending(id);
        Ok(merchant)
    }

    /// Dismisses the pending deletion without changing the collection.
    #[inline]
    pub const fn cancel_delete(&mut self) {
        self.deletion = DeleteState::Idle;
    }

    /// Deletes the merchant awaiting confirmation and returns to idle.
    ///
    /// # Errors
    ///
    /// Returns [`MerchantAdminError::NoDeletionPending`] if nothing awaits
    /// confirmation, or [`MerchantAdminError::NotFound`] if the target
    /// vanished in the meantime (the state still returns to idle).
    #[inline]
    pub fn confirm_delete(&mut self) -> Result<Merchant> {
        let DeleteState::ConfirmPending(id) = self.deletion else {
            return Err(MerchantAdminError::NoDeletionPending);
        };
        self.deletion = DeleteState::Idle;
        self.delete(id)
    }
}
