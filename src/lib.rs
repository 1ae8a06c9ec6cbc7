//! # keyspan
//!
//! Lets one ordered key-value engine host many independent collections and
//! indexes:
//! - A 4-byte big-endian namespace prefix on every stored key, so key order
//!   groups each namespace and sorts namespaces numerically
//! - A status boundary that turns engine outcomes into caller errors, with
//!   write conflicts surfacing as a retry signal instead of an error value
//! - An adapter forwarding the engine's diagnostic lines to `tracing`
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Keyspace / Partition                         │
//! │      (per-namespace get/put/delete/scan/purge, retry)        │
//! └──────────┬───────────────────────────────┬──────────────────┘
//!            │                               │
//!            ▼                               ▼
//!   ┌─────────────────┐             ┌─────────────────┐
//!   │     prefix      │             │     status      │
//!   │ (encode/extract)│             │   (translate)   │
//!   └─────────────────┘             └────────┬────────┘
//!                                            │ EngineStatus
//!                                            ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 OrderedEngine (external)                     │
//! │            logv ──► logger::EngineLogAdapter ──► tracing     │
//! │            perf counters ──► perf::PerfCounters              │
//! └─────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod prefix;
pub mod status;
pub mod logger;
pub mod perf;
pub mod engine;
pub mod keyspace;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CallerError, ErrorCode, KeyspanError, Result, WriteConflict};
pub use config::{Config, RetryPolicy};
pub use prefix::{encode_key, encode_prefix, extract_prefix, EncodedPrefix, NamespaceId, PrefixRange};
pub use status::{check, translate, write_conflict_retry, EngineStatus, StatusCode};
pub use logger::EngineLogAdapter;
pub use perf::EngineApi;
pub use keyspace::{Keyspace, Partition};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of keyspan
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
