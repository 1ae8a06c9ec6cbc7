//! Status Translation Tests
//!
//! Tests verify:
//! - OK translates to success
//! - Busy always raises the conflict signal, never a CallerError
//! - Corruption becomes BadValue with the engine text
//! - Every other code, including unknown ones, becomes InternalError

use keyspan::status::{check, translate, EngineStatus, StatusCode};
use keyspan::{CallerError, ErrorCode, KeyspanError, WriteConflict};

// =============================================================================
// Category Mapping Tests
// =============================================================================

#[test]
fn test_ok_is_success() {
    assert_eq!(translate(&EngineStatus::ok()), Ok(()));
}

#[test]
fn test_busy_raises_conflict() {
    let err = translate(&EngineStatus::busy("lock held by another writer")).unwrap_err();

    assert!(err.is_write_conflict());
    assert_eq!(err, KeyspanError::WriteConflict(WriteConflict));
    assert!(err.caller_error().is_none());
}

#[test]
fn test_busy_without_message_raises_conflict() {
    let err = translate(&EngineStatus::bare(StatusCode::Busy)).unwrap_err();
    assert!(err.is_write_conflict());
}

#[test]
fn test_corruption_is_bad_value() {
    let err = translate(&EngineStatus::corruption("checksum mismatch")).unwrap_err();

    assert_eq!(
        err,
        KeyspanError::Status(CallerError::BadValue("checksum mismatch".to_string()))
    );
    let caller = err.caller_error().unwrap();
    assert_eq!(caller.code(), ErrorCode::BadValue);
    assert_eq!(caller.reason(), "checksum mismatch");
}

#[test]
fn test_io_error_is_internal_error() {
    let err = translate(&EngineStatus::io_error("disk full")).unwrap_err();
    assert_eq!(
        err,
        KeyspanError::Status(CallerError::InternalError("disk full".to_string()))
    );
}

#[test]
fn test_remaining_known_codes_are_internal_errors() {
    let codes = [
        StatusCode::NotFound,
        StatusCode::NotSupported,
        StatusCode::InvalidArgument,
        StatusCode::IoError,
        StatusCode::MergeInProgress,
        StatusCode::Incomplete,
        StatusCode::ShutdownInProgress,
        StatusCode::TimedOut,
        StatusCode::Aborted,
        StatusCode::Expired,
        StatusCode::TryAgain,
    ];

    for code in codes {
        let err = translate(&EngineStatus::new(code, "engine says no")).unwrap_err();
        assert_eq!(
            err,
            KeyspanError::Status(CallerError::InternalError("engine says no".to_string())),
            "code {:?}",
            code
        );
    }
}

#[test]
fn test_unknown_codes_are_internal_errors() {
    for raw in [14u8, 42, 200, 255] {
        let code = StatusCode::from_u8(raw);
        assert_eq!(code, StatusCode::Unknown(raw));

        let err = translate(&EngineStatus::new(code, "from the future")).unwrap_err();
        assert_eq!(err.caller_error().map(|e| e.code()), Some(ErrorCode::InternalError));
        assert_eq!(err.caller_error().map(|e| e.reason()), Some("from the future"));
    }
}

#[test]
fn test_every_numeric_code_translates() {
    for raw in 0..=255u8 {
        let status = EngineStatus::new(StatusCode::from_u8(raw), "diag");
        match (raw, translate(&status)) {
            (0, Ok(())) => {}
            (11, Err(KeyspanError::WriteConflict(_))) => {}
            (2, Err(KeyspanError::Status(CallerError::BadValue(msg)))) => assert_eq!(msg, "diag"),
            (_, Err(KeyspanError::Status(CallerError::InternalError(msg)))) => {
                assert_ne!(raw, 0);
                assert_ne!(raw, 2);
                assert_ne!(raw, 11);
                assert_eq!(msg, "diag");
            }
            (raw, other) => panic!("code {} translated to {:?}", raw, other),
        }
    }
}

// =============================================================================
// Diagnostic Text Tests
// =============================================================================

#[test]
fn test_diagnostic_falls_back_to_code_name() {
    let err = translate(&EngineStatus::bare(StatusCode::Corruption)).unwrap_err();
    assert_eq!(err.caller_error().unwrap().reason(), "Corruption");
}

#[test]
fn test_status_display_matches_engine_format() {
    assert_eq!(EngineStatus::ok().to_string(), "OK");
    assert_eq!(
        EngineStatus::corruption("bad block").to_string(),
        "Corruption: bad block"
    );
    assert_eq!(EngineStatus::bare(StatusCode::Busy).to_string(), "Resource busy");
    assert_eq!(
        EngineStatus::new(StatusCode::Unknown(99), "x").to_string(),
        "Unknown code(99): x"
    );
}

#[test]
fn test_caller_error_display() {
    let err = KeyspanError::from(CallerError::BadValue("checksum mismatch".to_string()));
    assert_eq!(err.to_string(), "BadValue: checksum mismatch");
    assert_eq!(ErrorCode::InternalError.as_str(), "InternalError");
}

#[test]
fn test_status_code_numbers_round_trip() {
    for raw in 0..=255u8 {
        assert_eq!(StatusCode::from_u8(raw).as_u8(), raw);
    }
}

// =============================================================================
// Result Checking Tests
// =============================================================================

#[test]
fn test_check_passes_values_through() {
    let result: Result<u32, EngineStatus> = Ok(7);
    assert_eq!(check(result), Ok(7));
}

#[test]
fn test_check_translates_failures() {
    let busy: Result<(), EngineStatus> = Err(EngineStatus::busy("conflict"));
    assert!(check(busy).unwrap_err().is_write_conflict());

    let corrupt: Result<(), EngineStatus> = Err(EngineStatus::corruption("checksum mismatch"));
    assert_eq!(
        check(corrupt).unwrap_err().caller_error().map(|e| e.code()),
        Some(ErrorCode::BadValue)
    );
}

#[test]
fn test_check_treats_ok_as_failure_as_internal_error() {
    let odd: Result<(), EngineStatus> = Err(EngineStatus::ok());
    let err = check(odd).unwrap_err();
    assert_eq!(err.caller_error().map(|e| e.code()), Some(ErrorCode::InternalError));
}

#[test]
fn test_conflict_propagates_through_question_mark() {
    fn inner() -> keyspan::Result<u32> {
        translate(&EngineStatus::busy("conflict"))?;
        Ok(1)
    }
    fn outer() -> keyspan::Result<u32> {
        let value = inner()?;
        Ok(value + 1)
    }

    assert_eq!(outer(), Err(KeyspanError::WriteConflict(WriteConflict)));
}
