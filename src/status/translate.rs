//! Status translation
//!
//! Maps engine statuses onto the caller's error model.

use crate::error::{CallerError, KeyspanError, Result, WriteConflict};

use super::{EngineStatus, StatusCode};

/// Translate an engine status
///
/// - `Ok` → `Ok(())`
/// - `Busy` → `Err(KeyspanError::WriteConflict)`, never a `CallerError`
/// - `Corruption` → `BadValue` with the engine diagnostic
/// - everything else, including codes from newer engines → `InternalError`
pub fn translate(status: &EngineStatus) -> Result<()> {
    match to_error(status) {
        None => Ok(()),
        Some(err) => Err(err),
    }
}

/// Translate the result of an engine call, passing the value through on success
pub fn check<T>(result: std::result::Result<T, EngineStatus>) -> Result<T> {
    result.map_err(|status| {
        // An engine handing back `Err(OK)` broke its own contract.
        to_error(&status).unwrap_or_else(|| {
            CallerError::InternalError("engine reported OK as a failure".to_string()).into()
        })
    })
}

fn to_error(status: &EngineStatus) -> Option<KeyspanError> {
    match status.code() {
        StatusCode::Ok => None,
        StatusCode::Busy => Some(WriteConflict.into()),
        StatusCode::Corruption => {
            Some(CallerError::BadValue(status.diagnostic().to_string()).into())
        }
        _ => Some(CallerError::InternalError(status.diagnostic().to_string()).into()),
    }
}
