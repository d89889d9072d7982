//! Merchant form data and field-level validation.
//!
//! [`MerchantForm`] holds raw user input for the create and edit forms.
//! [`MerchantForm::validate_draft`] checks every field and either yields a
//! typed [`MerchantDraft`] or the complete set of [`FormErrors`].

use alloc::borrow::Cow;
use core::fmt;

use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

use crate::models::{Merchant, MerchantDraft, MerchantStatus};

/// Minimum length of the name and store fields, in characters.
pub const MIN_TEXT_LEN: usize = 2;
/// Maximum length of the name and store fields, in characters.
pub const MAX_TEXT_LEN: usize = 100;

/// A field of the merchant form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    /// Merchant display name.
    Name,
    /// Contact email address.
    Email,
    /// Store name.
    Store,
    /// Account status.
    Status,
}

impl FormField {
    /// All form fields, in display order.
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Store, Self::Status];

    /// Returns the field's key, as used in validation reports.
    #[inline]
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Store => "store",
            Self::Status => "status",
        }
    }

    /// Returns the label shown next to the field.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Merchant Name",
            Self::Email => "Email Address",
            Self::Store => "Store Name",
            Self::Status => "Account Status",
        }
    }

    /// Returns the help text shown under the field.
    #[inline]
    #[must_use]
    pub const fn help(self) -> &'static str {
        match self {
            Self::Name => "Enter the full name of the merchant",
            Self::Email => "This email will be used for account notifications",
            Self::Store => "The name of the merchant's store",
            Self::Status => "Active accounts can process transactions",
        }
    }

    /// Maps a validation report key back to a field.
    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

impl fmt::Display for FormField {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Field-specific messages from a failed validation, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    /// Failing fields with their messages.
    entries: Vec<(FormField, String)>,
}

impl FormErrors {
    /// Records a message against a field.
    #[inline]
    pub fn push<M: Into<String>>(&mut self, field: FormField, message: M) {
        self.entries.push((field, message.into()));
    }

    /// Returns `true` if no field failed.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of recorded messages.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the first message recorded for `field`, if any.
    #[inline]
    #[must_use]
    pub fn message(&self, field: FormField) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.0 == field)
            .map(|entry| entry.1.as_str())
    }

    /// Returns the distinct failing fields in display order.
    #[inline]
    #[must_use]
    pub fn fields(&self) -> Vec<FormField> {
        let mut fields: Vec<FormField> = self.entries.iter().map(|entry| entry.0).collect();
        fields.dedup();
        fields
    }

    /// Iterates over `(field, message)` pairs.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.entries.iter().map(|entry| (entry.0, entry.1.as_str()))
    }
}

impl fmt::Display for FormErrors {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

impl From<&ValidationErrors> for FormErrors {
    fn from(report: &ValidationErrors) -> Self {
        let mut entries: Vec<(FormField, String)> = Vec::new();
        for (key, errors) in report.field_errors() {
            let Some(field) = FormField::from_key(key.as_ref()) else {
                continue;
            };
            for error in errors {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string);
                entries.push((field, message));
            }
        }
        // HashMap iteration order is arbitrary; present fields top to bottom.
        entries.sort_by_key(|entry| entry.0);
        Self { entries }
    }
}

/// Raw input of the create/edit merchant form.
///
/// `status` is kept as text so that values outside the enumeration can be
/// reported like any other field error.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct MerchantForm {
    /// Merchant display name.
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    /// Contact email address.
    #[validate(custom(function = "validate_email_address"))]
    pub email: String,
    /// Store name.
    #[validate(custom(function = "validate_store"))]
    pub store: String,
    /// Account status, `active` or `inactive`.
    #[validate(custom(function = "validate_status"))]
    pub status: String,
}

impl Default for MerchantForm {
    /// An empty form with the status preselected as active.
    #[inline]
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            store: String::new(),
            status: MerchantStatus::Active.as_str().to_owned(),
        }
    }
}

impl From<&Merchant> for MerchantForm {
    #[inline]
    fn from(merchant: &Merchant) -> Self {
        Self {
            name: merchant.name.clone(),
            email: merchant.email.clone(),
            store: merchant.store.clone(),
            status: merchant.status.as_str().to_owned(),
        }
    }
}

impl From<MerchantDraft> for MerchantForm {
    #[inline]
    fn from(draft: MerchantDraft) -> Self {
        Self {
            name: draft.name,
            email: draft.email,
            store: draft.store,
            status: draft.status.as_str().to_owned(),
        }
    }
}

impl MerchantForm {
    /// Returns the current value of a field.
    #[inline]
    #[must_use]
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Store => &self.store,
            FormField::Status => &self.status,
        }
    }

    /// Replaces the value of a field.
    #[inline]
    pub fn set<V: Into<String>>(&mut self, field: FormField, value: V) {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Store => &mut self.store,
            FormField::Status => &mut self.status,
        };
        *slot = value.into();
    }

    /// Validates every field and converts the form into a draft.
    ///
    /// # Errors
    ///
    /// Returns every failing field with its message when any field is
    /// invalid.
    #[inline]
    pub fn validate_draft(&self) -> Result<MerchantDraft, FormErrors> {
        self.validate().map_err(|report| FormErrors::from(&report))?;
        let status = self.status.parse::<MerchantStatus>().map_err(|err| {
            let mut errors = FormErrors::default();
            errors.push(FormField::Status, err.to_string());
            errors
        })?;
        Ok(MerchantDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            store: self.store.clone(),
            status,
        })
    }
}

/// Checks a free-text field against the shared length bounds.
fn bounded_text(value: &str, label: &'static str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < MIN_TEXT_LEN {
        return Err(ValidationError::new("too_short").with_message(Cow::Owned(format!(
            "{label} must be at least {MIN_TEXT_LEN} characters"
        ))));
    }
    if len > MAX_TEXT_LEN {
        return Err(ValidationError::new("too_long").with_message(Cow::Owned(format!(
            "{label} must be less than {MAX_TEXT_LEN} characters"
        ))));
    }
    Ok(())
}

/// Validates the merchant name.
fn validate_name(value: &str) -> Result<(), ValidationError> {
    bounded_text(value, "Name")
}

/// Validates the store name.
fn validate_store(value: &str) -> Result<(), ValidationError> {
    bounded_text(value, "Store name")
}

/// Validates the email address: a well-formed address whose domain has at
/// least one dot and ends in an alphabetic label of two or more letters.
fn validate_email_address(value: &str) -> Result<(), ValidationError> {
    if value.validate_email() && has_top_level_domain(value) {
        return Ok(());
    }
    Err(ValidationError::new("email").with_message(Cow::Borrowed("Invalid email address")))
}

/// Returns `true` if the domain part of `address` ends in a dotted,
/// alphabetic top-level label such as `.com`.
fn has_top_level_domain(address: &str) -> bool {
    let Some((_, domain)) = address.rsplit_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}

/// Validates that the status names a [`MerchantStatus`] variant.
fn validate_status(value: &str) -> Result<(), ValidationError> {
    if value.parse::<MerchantStatus>().is_ok() {
        return Ok(());
    }
    Err(ValidationError::new("invalid_status")
        .with_message(Cow::Borrowed("Status must be either active or inactive")))
}
