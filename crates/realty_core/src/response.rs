//! Uniform result envelope.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// Outcome of one listing operation, as handed to callers.
///
/// Internal failures answer 500 with a fixed, operation-specific message;
/// their detail goes to the log, not the envelope, unless the estate is
/// configured to expose it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Caller-facing message.
    pub message: String,
    /// Payload on success.
    pub data: Option<T>,
    /// Individual problems, for validation failures.
    pub errors: Option<Vec<String>>,
    /// HTTP-style status.
    pub status_code: u16,
}

impl<T> ApiResponse<T> {
    /// 200 with a message.
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: None,
            status_code: 200,
        }
    }

    /// 200 with the stock "Success" message.
    pub fn ok(data: T) -> Self {
        Self::success(data, "Success")
    }

    /// A failure envelope.
    pub fn error(message: impl Into<String>, status_code: u16, errors: Option<Vec<String>>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors,
            status_code,
        }
    }

    /// Maps a core error onto the envelope.
    ///
    /// `internal_message` is used for 500s in place of the error text.
    pub fn from_error(err: &CoreError, internal_message: &str, expose_details: bool) -> Self {
        match err {
            CoreError::Validation { message, errors } => {
                Self::error(message.clone(), 400, Some(errors.clone()))
            }
            err if err.is_client_error() => Self::error(err.to_string(), err.status_code(), None),
            err => Self::error(
                internal_message,
                err.status_code(),
                expose_details.then(|| vec![err.to_string()]),
            ),
        }
    }
}
