//! Status Module
//!
//! The single choke point through which engine outcomes reach callers.
//!
//! ## Mapping
//! ```text
//! ┌──────────────────────┬─────────────────────────────────────────┐
//! │ EngineStatus         │ Caller sees                             │
//! ├──────────────────────┼─────────────────────────────────────────┤
//! │ Ok                   │ Ok(())                                  │
//! │ Busy                 │ Err(WriteConflict)  (retry signal)      │
//! │ Corruption           │ Err(BadValue(diagnostic))               │
//! │ anything else        │ Err(InternalError(diagnostic))          │
//! └──────────────────────┴─────────────────────────────────────────┘
//! ```
//!
//! Translation never logs or retries. Retrying is the job of
//! [`write_conflict_retry`], which is the only place the conflict signal is
//! intercepted.

mod engine_status;
mod retry;
mod translate;

pub use engine_status::{EngineStatus, StatusCode};
pub use retry::write_conflict_retry;
pub use translate::{check, translate};
