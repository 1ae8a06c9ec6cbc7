//! Write-conflict retry boundary
//!
//! The only place the conflict signal is caught. Everything else passes
//! through untouched.

use crate::config::RetryPolicy;
use crate::error::{KeyspanError, Result};

/// Run `op`, re-running it while it fails with a write conflict
///
/// Sleeps between attempts according to `policy`. Once `policy.max_attempts`
/// attempts have all conflicted, the conflict is handed back to the caller.
pub fn write_conflict_retry<T, F>(policy: &RetryPolicy, op_name: &str, mut op: F) -> Result<T>
where
    F: FnMut() -> Result<T>,
{
    let mut conflicts: u32 = 0;

    loop {
        match op() {
            Err(KeyspanError::WriteConflict(conflict)) => {
                conflicts += 1;

                if conflicts >= policy.max_attempts {
                    tracing::warn!(
                        op = op_name,
                        attempts = conflicts,
                        "giving up after repeated write conflicts"
                    );
                    return Err(conflict.into());
                }

                let backoff = policy.backoff_for(conflicts);
                tracing::debug!(
                    op = op_name,
                    attempt = conflicts,
                    backoff_us = backoff.as_micros() as u64,
                    "write conflict, retrying"
                );

                if !backoff.is_zero() {
                    std::thread::sleep(backoff);
                }
            }
            other => return other,
        }
    }
}
