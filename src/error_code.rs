//! Error classification for synthesis failures.
//!
//! Maps an [`Error`] (or a raw HTTP status from the speech service) onto a small set of
//! classes that a front end can branch on when deciding what to show the user.
//!
//! | Class            | Origin                                             |
//! |------------------|----------------------------------------------------|
//! | `unavailable`    | connection to the service failed                   |
//! | `invalid_input`  | caller-side check failed before any request        |
//! | `not_found`      | HTTP 404 (unknown endpoint or resource)            |
//! | `validation`     | HTTP 400 / 422 (bad speaker id, malformed query)   |
//! | `server_error`   | HTTP 5xx                                           |
//! | `other`          | anything else                                      |
//!
//! ## Example
//!
//! ```rust
//! use voicevox_client::error_code::ErrorClass;
//!
//! let class = ErrorClass::from_http_status(422);
//! assert_eq!(class.name(), "validation");
//! assert!(!class.is_retryable());
//! ```

use crate::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The speech service could not be reached
    Unavailable,
    /// Rejected locally before any request was sent
    InvalidInput,
    /// HTTP 404
    NotFound,
    /// HTTP 400 / 422
    Validation,
    /// HTTP 5xx
    ServerError,
    Other,
}

impl ErrorClass {
    /// Returns the standard name (e.g., `"validation"`).
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unavailable => "unavailable",
            Self::InvalidInput => "invalid_input",
            Self::NotFound => "not_found",
            Self::Validation => "validation",
            Self::ServerError => "server_error",
            Self::Other => "other",
        }
    }

    /// Whether a later, identical attempt could succeed.
    ///
    /// The client never retries on its own; this is a hint for the caller.
    #[inline]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable | Self::ServerError)
    }

    /// Maps an HTTP status code returned by the service.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 | 422 => Self::Validation,
            404 => Self::NotFound,
            500..=599 => Self::ServerError,
            _ => Self::Other,
        }
    }

    pub fn from_error(error: &Error) -> Self {
        match error {
            Error::ServiceUnavailable { .. } => Self::Unavailable,
            Error::InvalidInput { .. } => Self::InvalidInput,
            Error::Service { status, .. } => Self::from_http_status(*status),
            _ => Self::Other,
        }
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
