//! Error types for keyspan
//!
//! Every engine outcome reaches callers through one of three shapes:
//! - success (`Ok`)
//! - a [`CallerError`] (`BadValue` or `InternalError`)
//! - the [`WriteConflict`] signal, which is not a `CallerError` and is only
//!   meant to be intercepted by a retry boundary

use thiserror::Error;

/// Result type alias using KeyspanError
pub type Result<T> = std::result::Result<T, KeyspanError>;

/// Unified error type for keyspan operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyspanError {
    // -------------------------------------------------------------------------
    // Control Flow
    // -------------------------------------------------------------------------
    /// The engine reported a read/write conflict; the operation must be retried.
    #[error(transparent)]
    WriteConflict(#[from] WriteConflict),

    // -------------------------------------------------------------------------
    // Caller-facing Status
    // -------------------------------------------------------------------------
    #[error(transparent)]
    Status(#[from] CallerError),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl KeyspanError {
    /// True for the conflict signal
    pub fn is_write_conflict(&self) -> bool {
        matches!(self, KeyspanError::WriteConflict(_))
    }

    /// The caller-facing error, if this is one
    pub fn caller_error(&self) -> Option<&CallerError> {
        match self {
            KeyspanError::Status(e) => Some(e),
            _ => None,
        }
    }
}

/// Conflict signal raised when the engine reports `Busy`.
///
/// Carries no payload. It unwinds through `?` until a retry boundary
/// (see [`crate::status::write_conflict_retry`]) catches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Error)]
#[error("WriteConflict: write conflict, operation should be retried")]
pub struct WriteConflict;

/// Caller-facing error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    BadValue,
    InternalError,
}

impl ErrorCode {
    /// Stable name of the code
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadValue => "BadValue",
            ErrorCode::InternalError => "InternalError",
        }
    }
}

/// Error surfaced to callers after translating an engine status
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum CallerError {
    /// The engine detected corrupt data
    #[error("BadValue: {0}")]
    BadValue(String),

    /// Any other engine failure
    #[error("InternalError: {0}")]
    InternalError(String),
}

impl CallerError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CallerError::BadValue(_) => ErrorCode::BadValue,
            CallerError::InternalError(_) => ErrorCode::InternalError,
        }
    }

    /// The engine diagnostic carried by this error
    pub fn reason(&self) -> &str {
        match self {
            CallerError::BadValue(msg) | CallerError::InternalError(msg) => msg,
        }
    }
}
