//! Configuration for keyspan
//!
//! Centralized configuration with sensible defaults.

use std::time::Duration;

use crate::error::{KeyspanError, Result};
use crate::perf::EngineApi;

/// Main configuration for a keyspace
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Engine Log Configuration
    // -------------------------------------------------------------------------
    /// Tag written at the start of every engine log line
    pub log_tag: String,

    /// Capacity of the line buffer (in bytes); longer lines are truncated
    pub log_buffer_capacity: usize,

    // -------------------------------------------------------------------------
    // Conflict Retry Configuration
    // -------------------------------------------------------------------------
    /// Policy used by the keyspace's write-conflict retry boundary
    pub retry: RetryPolicy,

    // -------------------------------------------------------------------------
    // Engine Capabilities
    // -------------------------------------------------------------------------
    /// Which performance-counter access path the engine exposes
    pub engine_api: EngineApi,
}

/// How a retry boundary reacts to repeated write conflicts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,

    /// Sleep after the first conflict; doubles on every further conflict
    pub initial_backoff: Duration,

    /// Upper bound for a single sleep
    pub max_backoff: Duration,
}

impl RetryPolicy {
    /// Retry immediately, without sleeping
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
        }
    }

    /// Backoff before the retry that follows conflict number `conflicts` (1-based)
    pub fn backoff_for(&self, conflicts: u32) -> Duration {
        let shift = conflicts.saturating_sub(1).min(16);
        self.initial_backoff
            .saturating_mul(1u32 << shift)
            .min(self.max_backoff)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 100,
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(100),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_tag: "[Engine]:".to_string(),
            log_buffer_capacity: 8192,
            retry: RetryPolicy::default(),
            engine_api: EngineApi::ThreadLocal,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check values that would make the keyspace misbehave
    pub fn validate(&self) -> Result<()> {
        if self.retry.max_attempts == 0 {
            return Err(KeyspanError::Config(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.retry.initial_backoff > self.retry.max_backoff {
            return Err(KeyspanError::Config(format!(
                "retry.initial_backoff ({:?}) exceeds retry.max_backoff ({:?})",
                self.retry.initial_backoff, self.retry.max_backoff
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the engine log tag
    pub fn log_tag(mut self, tag: impl Into<String>) -> Self {
        self.config.log_tag = tag.into();
        self
    }

    /// Set the engine log line capacity (in bytes)
    pub fn log_buffer_capacity(mut self, capacity: usize) -> Self {
        self.config.log_buffer_capacity = capacity;
        self
    }

    /// Set the full retry policy
    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.config.retry = policy;
        self
    }

    /// Set the maximum number of attempts for conflicting operations
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.retry.max_attempts = attempts;
        self
    }

    /// Set the engine API generation
    pub fn engine_api(mut self, api: EngineApi) -> Self {
        self.config.engine_api = api;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
