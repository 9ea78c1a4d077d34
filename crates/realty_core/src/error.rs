//! Error types for Realty core.

use crate::types::EntityKind;
use realty_storage::StorageError;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors produced by the listing core.
///
/// The first four variants are business outcomes that a caller can act on;
/// the rest are infrastructure failures that surface as a generic 500.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A requested entity does not exist or is no longer active.
    #[error("{message}")]
    NotFound {
        /// Kind of entity that was looked up.
        entity: EntityKind,
        /// Caller-facing message, e.g. "Property not found".
        message: String,
    },

    /// A domain rule rejected the operation.
    #[error("{message}")]
    BusinessRule {
        /// Caller-facing message.
        message: String,
    },

    /// Request validation failed.
    #[error("{message}: {}", errors.join("; "))]
    Validation {
        /// Summary message.
        message: String,
        /// Every violated rule.
        errors: Vec<String>,
    },

    /// A uniqueness constraint was violated.
    #[error("{message}")]
    Conflict {
        /// Caller-facing message.
        message: String,
    },

    /// The storage backend failed; the operation may succeed if retried.
    #[error("storage error: {0}")]
    Transient(#[from] StorageError),

    /// Journal payload could not be encoded or decoded.
    #[error("codec error: {message}")]
    Codec {
        /// Description of the codec failure.
        message: String,
    },

    /// The journal is structurally invalid.
    #[error("journal corruption: {message}")]
    JournalCorruption {
        /// Description of the corruption.
        message: String,
    },

    /// A journal record failed its checksum.
    #[error("checksum mismatch: expected {expected:08x}, got {actual:08x}")]
    ChecksumMismatch {
        /// Stored checksum.
        expected: u32,
        /// Computed checksum.
        actual: u32,
    },

    /// Operation not permitted in the current state.
    #[error("invalid operation: {message}")]
    InvalidOperation {
        /// Why the operation is invalid.
        message: String,
    },

    /// Anything else.
    #[error("unexpected error: {message}")]
    Unexpected {
        /// Description of the failure.
        message: String,
    },
}

impl CoreError {
    /// Creates a not found error.
    pub fn not_found(entity: EntityKind, message: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            message: message.into(),
        }
    }

    /// Creates a business rule error.
    pub fn business_rule(message: impl Into<String>) -> Self {
        Self::BusinessRule {
            message: message.into(),
        }
    }

    /// Creates a validation error carrying every violated rule.
    pub fn validation(errors: Vec<String>) -> Self {
        Self::Validation {
            message: "Validation failed".to_string(),
            errors,
        }
    }

    /// Creates a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Creates a codec error.
    pub fn codec(message: impl Into<String>) -> Self {
        Self::Codec {
            message: message.into(),
        }
    }

    /// Creates a journal corruption error.
    pub fn journal_corruption(message: impl Into<String>) -> Self {
        Self::JournalCorruption {
            message: message.into(),
        }
    }

    /// Creates an invalid operation error.
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }

    /// Creates an unexpected error.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// HTTP-style status code for the response envelope.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::BusinessRule { .. } | Self::Validation { .. } => 400,
            Self::Conflict { .. } => 409,
            _ => 500,
        }
    }

    /// Returns true for failures worth retrying unchanged.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient(_))
    }

    /// Returns true for outcomes the caller caused (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

impl<T: std::fmt::Debug> From<ciborium::ser::Error<T>> for CoreError {
    fn from(err: ciborium::ser::Error<T>) -> Self {
        Self::codec(format!("encode: {err:?}"))
    }
}

impl<T: std::fmt::Debug> From<ciborium::de::Error<T>> for CoreError {
    fn from(err: ciborium::de::Error<T>) -> Self {
        Self::codec(format!("decode: {err:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            CoreError::not_found(EntityKind::Property, "Property not found").status_code(),
            404
        );
        assert_eq!(CoreError::business_rule("nope").status_code(), 400);
        assert_eq!(CoreError::validation(vec![]).status_code(), 400);
        assert_eq!(CoreError::conflict("dup").status_code(), 409);
        assert_eq!(CoreError::journal_corruption("bad").status_code(), 500);
    }

    #[test]
    fn storage_errors_are_transient() {
        let err: CoreError = StorageError::Unavailable("closed".into()).into();
        assert!(err.is_retryable());
        assert!(!err.is_client_error());
        assert!(!CoreError::conflict("dup").is_retryable());
    }

    #[test]
    fn business_messages_display_verbatim() {
        let err = CoreError::business_rule("Property code already exists");
        assert_eq!(err.to_string(), "Property code already exists");

        let err = CoreError::validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "Validation failed: a; b");
    }
}
