//! Engine status values
//!
//! Status codes follow the engine's numeric code table; codes this crate does
//! not know are kept as `Unknown` rather than rejected.

use std::fmt;

/// Category of an engine outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Ok,
    NotFound,
    Corruption,
    NotSupported,
    InvalidArgument,
    IoError,
    MergeInProgress,
    Incomplete,
    ShutdownInProgress,
    TimedOut,
    Aborted,
    Busy,
    Expired,
    TryAgain,
    /// A code introduced by a newer engine
    Unknown(u8),
}

impl StatusCode {
    /// Decode the engine's numeric status code
    pub fn from_u8(code: u8) -> Self {
        match code {
            0 => StatusCode::Ok,
            1 => StatusCode::NotFound,
            2 => StatusCode::Corruption,
            3 => StatusCode::NotSupported,
            4 => StatusCode::InvalidArgument,
            5 => StatusCode::IoError,
            6 => StatusCode::MergeInProgress,
            7 => StatusCode::Incomplete,
            8 => StatusCode::ShutdownInProgress,
            9 => StatusCode::TimedOut,
            10 => StatusCode::Aborted,
            11 => StatusCode::Busy,
            12 => StatusCode::Expired,
            13 => StatusCode::TryAgain,
            other => StatusCode::Unknown(other),
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            StatusCode::Ok => 0,
            StatusCode::NotFound => 1,
            StatusCode::Corruption => 2,
            StatusCode::NotSupported => 3,
            StatusCode::InvalidArgument => 4,
            StatusCode::IoError => 5,
            StatusCode::MergeInProgress => 6,
            StatusCode::Incomplete => 7,
            StatusCode::ShutdownInProgress => 8,
            StatusCode::TimedOut => 9,
            StatusCode::Aborted => 10,
            StatusCode::Busy => 11,
            StatusCode::Expired => 12,
            StatusCode::TryAgain => 13,
            StatusCode::Unknown(code) => code,
        }
    }

    /// Human-readable name, as the engine prints it
    pub fn as_str(self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotFound => "NotFound",
            StatusCode::Corruption => "Corruption",
            StatusCode::NotSupported => "Not implemented",
            StatusCode::InvalidArgument => "Invalid argument",
            StatusCode::IoError => "IO error",
            StatusCode::MergeInProgress => "Merge in progress",
            StatusCode::Incomplete => "Result incomplete",
            StatusCode::ShutdownInProgress => "Shutdown in progress",
            StatusCode::TimedOut => "Operation timed out",
            StatusCode::Aborted => "Operation aborted",
            StatusCode::Busy => "Resource busy",
            StatusCode::Expired => "Operation expired",
            StatusCode::TryAgain => "Operation failed. Try again.",
            StatusCode::Unknown(_) => "Unknown code",
        }
    }
}

/// Outcome of an operation against the engine
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EngineStatus {
    code: StatusCode,
    message: Option<String>,
}

impl EngineStatus {
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: Some(message.into()),
        }
    }

    pub fn ok() -> Self {
        Self {
            code: StatusCode::Ok,
            message: None,
        }
    }

    /// A status with no engine message
    pub fn bare(code: StatusCode) -> Self {
        Self {
            code,
            message: None,
        }
    }

    pub fn busy(message: impl Into<String>) -> Self {
        Self::new(StatusCode::Busy, message)
    }

    pub fn corruption(message: impl Into<String>) -> Self {
        Self::new(StatusCode::Corruption, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NotFound, message)
    }

    pub fn io_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::IoError, message)
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(StatusCode::InvalidArgument, message)
    }

    pub fn shutdown_in_progress(message: impl Into<String>) -> Self {
        Self::new(StatusCode::ShutdownInProgress, message)
    }

    pub fn code(&self) -> StatusCode {
        self.code
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The engine's diagnostic text: its message, or the code name when it
    /// gave none
    pub fn diagnostic(&self) -> &str {
        self.message.as_deref().unwrap_or(self.code.as_str())
    }

    pub fn is_ok(&self) -> bool {
        self.code == StatusCode::Ok
    }

    pub fn is_busy(&self) -> bool {
        self.code == StatusCode::Busy
    }

    pub fn is_corruption(&self) -> bool {
        self.code == StatusCode::Corruption
    }
}

impl Default for EngineStatus {
    fn default() -> Self {
        Self::ok()
    }
}

impl fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.code, &self.message) {
            (StatusCode::Ok, _) => write!(f, "OK"),
            (StatusCode::Unknown(code), Some(msg)) => write!(f, "Unknown code({}): {}", code, msg),
            (StatusCode::Unknown(code), None) => write!(f, "Unknown code({})", code),
            (code, Some(msg)) => write!(f, "{}: {}", code.as_str(), msg),
            (code, None) => write!(f, "{}", code.as_str()),
        }
    }
}

impl std::error::Error for EngineStatus {}
