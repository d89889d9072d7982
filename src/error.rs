//! Error types for the merchant administration library.

use crate::form::FormErrors;
use crate::models::MerchantId;

/// All errors that can occur when operating on the merchant list.
#[derive(Debug, thiserror::Error)]
pub enum MerchantAdminError {
    /// No merchant with the given ID exists in the collection.
    #[error("merchant {0} not found")]
    NotFound(MerchantId),

    /// Submitted form data failed field-level validation.
    #[error("validation failed: {0}")]
    Validation(FormErrors),

    /// A form was submitted while neither create nor edit mode was active.
    #[error("no merchant form is open")]
    NoFormOpen,

    /// A deletion was confirmed without a pending delete request.
    #[error("no deletion is pending confirmation")]
    NoDeletionPending,

    /// The controller builder was finished without a storage backend.
    #[error("storage backend is required")]
    MissingStorage,

    /// A join date string could not be parsed as `YYYY-MM-DD`.
    #[error("invalid join date {value:?}: {source}")]
    InvalidDate {
        /// The offending input.
        value: String,
        /// Underlying parse failure.
        source: chrono::ParseError,
    },

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<FormErrors> for MerchantAdminError {
    #[inline]
    fn from(errors: FormErrors) -> Self {
        Self::Validation(errors)
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, MerchantAdminError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormField;

    #[test]
    fn error_from_serde_json() {
        let serde_err = serde_json::from_str::<String>("not json").unwrap_err();
        let err = MerchantAdminError::from(serde_err);
        assert!(matches!(err, MerchantAdminError::Serialization(_)));
        assert!(err.to_string().contains("serialization error"));
    }

    #[test]
    fn not_found_display_includes_id() {
        let err = MerchantAdminError::NotFound(MerchantId::new(42));
        assert_eq!(err.to_string(), "merchant 42 not found");
    }

    #[test]
    fn validation_display_lists_fields() {
        let mut errors = FormErrors::default();
        errors.push(FormField::Email, "Invalid email address");
        let err = MerchantAdminError::from(errors);
        let msg = err.to_string();
        assert!(msg.starts_with("validation failed"));
        assert!(msg.contains("email: Invalid email address"));
    }

    #[test]
    fn invalid_date_display() {
        let source = chrono::NaiveDate::parse_from_str("2024-13-01", "%Y-%m-%d").unwrap_err();
        let err = MerchantAdminError::InvalidDate {
            value: "2024-13-01".to_owned(),
            source,
        };
        assert!(err.to_string().contains("2024-13-01"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MerchantAdminError>();
    }
}
