//! Engine perf context
//!
//! Counters the engine updates while it works. Which copy gets updated
//! depends on the engine's API generation: `Legacy` writes the process-wide
//! context, `ThreadLocal` writes the calling thread's context.

use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::perf::EngineApi;

/// Snapshot of the perf counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerfContext {
    /// Tombstones stepped over by iterators
    pub internal_delete_skipped_count: u64,
}

static GLOBAL_DELETE_SKIPPED: AtomicU64 = AtomicU64::new(0);

thread_local! {
    static THREAD_CONTEXT: Cell<PerfContext> = const {
        Cell::new(PerfContext { internal_delete_skipped_count: 0 })
    };
}

/// Calling thread's perf context
pub fn get_perf_context() -> PerfContext {
    THREAD_CONTEXT.with(|ctx| ctx.get())
}

/// Process-wide perf context
pub fn global_perf_context() -> PerfContext {
    PerfContext {
        internal_delete_skipped_count: GLOBAL_DELETE_SKIPPED.load(Ordering::Relaxed),
    }
}

/// Zero the calling thread's perf context
pub fn reset_perf_context() {
    THREAD_CONTEXT.with(|ctx| ctx.set(PerfContext::default()));
}

pub(crate) fn record_internal_delete_skipped(api: EngineApi, count: u64) {
    if count == 0 {
        return;
    }

    match api {
        EngineApi::Legacy => {
            GLOBAL_DELETE_SKIPPED.fetch_add(count, Ordering::Relaxed);
        }
        EngineApi::ThreadLocal => THREAD_CONTEXT.with(|ctx| {
            let mut snapshot = ctx.get();
            snapshot.internal_delete_skipped_count += count;
            ctx.set(snapshot);
        }),
    }
}
