//! Performance counter access
//!
//! The engine owns its performance counters; this module only reads them.
//! Older engines keep one process-wide context, newer ones keep one context
//! per thread. The access path is picked once with [`select`] and call sites
//! go through the returned [`PerfCounters`] without knowing which one it is.

use std::fmt;

use crate::engine::perf_context;

/// Engine API generation, which decides where perf counters live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EngineApi {
    /// One process-wide perf context
    Legacy,

    /// One perf context per thread
    #[default]
    ThreadLocal,
}

/// Read-only view of the engine's perf counters
pub trait PerfCounters: Send + Sync + fmt::Debug {
    /// Tombstones stepped over by iterators
    fn internal_delete_skipped_count(&self) -> u64;
}

#[derive(Debug)]
struct GlobalPerfCounters;

impl PerfCounters for GlobalPerfCounters {
    fn internal_delete_skipped_count(&self) -> u64 {
        perf_context::global_perf_context().internal_delete_skipped_count
    }
}

#[derive(Debug)]
struct ThreadLocalPerfCounters;

impl PerfCounters for ThreadLocalPerfCounters {
    fn internal_delete_skipped_count(&self) -> u64 {
        perf_context::get_perf_context().internal_delete_skipped_count
    }
}

static GLOBAL: GlobalPerfCounters = GlobalPerfCounters;
static THREAD_LOCAL: ThreadLocalPerfCounters = ThreadLocalPerfCounters;

/// Pick the counter accessor matching the engine's API generation
pub fn select(api: EngineApi) -> &'static dyn PerfCounters {
    match api {
        EngineApi::Legacy => &GLOBAL,
        EngineApi::ThreadLocal => &THREAD_LOCAL,
    }
}
