//! Logger Module
//!
//! Forwards the engine's diagnostic messages to the host log.
//!
//! ## Line Format
//! ```text
//! ┌──────────────┬──────────────────────────────────────────────┐
//! │ Tag          │ Rendered engine message (truncated to fit)   │
//! │ "[Engine]:"  │                                              │
//! └──────────────┴──────────────────────────────────────────────┘
//!  |<──────────────── log_buffer_capacity bytes ───────────────>|
//! ```
//!
//! Each `logv` call produces exactly one line on the sink. A logging problem
//! never propagates back into the engine operation that logged.

mod buffer;

use std::fmt::{self, Write};

pub use buffer::LineBuffer;

use crate::config::Config;
use crate::engine::EngineLogger;

/// Tracing target used for engine lines
pub const ENGINE_LOG_TARGET: &str = "keyspan::storage";

/// Line emitted when the tag itself cannot be rendered
pub const TAG_RENDER_FAILURE: &str = "EngineLogAdapter::logv: failed to render log tag";

/// Destination for rendered engine lines
pub trait LogSink: Send + Sync {
    fn write_line(&self, line: &str);
}

/// Sink that emits each line as a `tracing` info event
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write_line(&self, line: &str) {
        tracing::info!(target: ENGINE_LOG_TARGET, "{}", line);
    }
}

/// Adapter between the engine's logging hook and a [`LogSink`]
#[derive(Debug, Clone)]
pub struct EngineLogAdapter<S = TracingSink> {
    tag: String,
    capacity: usize,
    sink: S,
}

impl EngineLogAdapter<TracingSink> {
    /// Adapter writing to `tracing`, configured from `config`
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.log_tag, config.log_buffer_capacity, TracingSink)
    }
}

impl<S: LogSink> EngineLogAdapter<S> {
    pub fn new(tag: impl Into<String>, capacity: usize, sink: S) -> Self {
        Self {
            tag: tag.into(),
            capacity,
            sink,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Render one line and hand it to the sink
    pub fn logv(&self, args: fmt::Arguments<'_>) {
        let mut buffer = LineBuffer::with_capacity(self.capacity);

        if buffer.write_str(&self.tag).is_err() {
            self.sink.write_line(TAG_RENDER_FAILURE);
            return;
        }

        // A truncated or failed render still forwards what made it in.
        let _ = buffer.write_fmt(args);
        self.sink.write_line(buffer.as_str());
    }
}

impl<S: LogSink> EngineLogger for EngineLogAdapter<S> {
    fn logv(&self, args: fmt::Arguments<'_>) {
        EngineLogAdapter::logv(self, args);
    }
}
