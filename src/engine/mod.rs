//! Engine Module
//!
//! The seam between keyspan and the ordered key-value engine underneath it.
//!
//! ## Responsibilities
//! - `OrderedEngine`: the operations keyspan issues against the store
//! - `EngineLogger`: the hook the engine calls to emit diagnostic lines
//! - `WriteBatch`: ordered puts, deletes and range deletes applied atomically
//! - `MemoryEngine`: an in-memory reference engine used by tests and tools
//!
//! Every engine call returns `Result<_, EngineStatus>`; keyspan turns the
//! status into caller errors with [`crate::status::check`].

mod batch;
mod memory;
pub mod perf_context;

use std::fmt;

pub use batch::{BatchOp, WriteBatch};
pub use memory::MemoryEngine;

use crate::status::EngineStatus;

/// Result of an engine call
pub type EngineResult<T> = std::result::Result<T, EngineStatus>;

/// Sequence number assigned to every applied batch
pub type Sequence = u64;

/// Logging hook the engine calls with pre-formatted arguments
pub trait EngineLogger: Send + Sync {
    fn logv(&self, args: fmt::Arguments<'_>);
}

/// An ordered key-value store
///
/// Keys compare as unsigned bytes. Deleted keys may linger as tombstones
/// internally but are never returned.
pub trait OrderedEngine: Send + Sync {
    /// Point lookup
    fn get(&self, key: &[u8]) -> EngineResult<Option<Vec<u8>>>;

    /// Apply a batch unconditionally
    fn write(&self, batch: WriteBatch) -> EngineResult<Sequence>;

    /// Apply a batch only if none of its keys changed after `read_sequence`
    ///
    /// Fails with `Busy` on conflict.
    fn commit(&self, batch: WriteBatch, read_sequence: Sequence) -> EngineResult<Sequence>;

    /// First live key `>= target`
    fn seek(&self, target: &[u8]) -> EngineResult<Option<Vec<u8>>>;

    /// Last live key `< upper`, or the last key of the store when `upper` is `None`
    fn seek_for_prev(&self, upper: Option<&[u8]>) -> EngineResult<Option<Vec<u8>>>;

    /// Live entries in `[lower, upper)`, in key order
    fn scan(&self, lower: &[u8], upper: Option<&[u8]>) -> EngineResult<Vec<(Vec<u8>, Vec<u8>)>>;

    /// Sequence of the most recently applied batch
    fn latest_sequence(&self) -> Sequence;
}
