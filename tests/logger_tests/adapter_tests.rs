//! Engine Log Adapter Tests
//!
//! Tests verify:
//! - One tagged line per `logv` call
//! - Long messages are truncated to the buffer capacity
//! - A tag that cannot be rendered yields one diagnostic line and leaves the
//!   arguments unformatted
//! - Formatting errors raised by arguments do not escape the adapter

use std::fmt;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use keyspan::engine::EngineLogger;
use keyspan::logger::{EngineLogAdapter, LineBuffer, LogSink, TAG_RENDER_FAILURE};
use keyspan::Config;

/// Sink that keeps every line it receives
#[derive(Default, Clone)]
struct CaptureSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl CaptureSink {
    fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

impl LogSink for CaptureSink {
    fn write_line(&self, line: &str) {
        self.lines.lock().push(line.to_string());
    }
}

/// Argument that records every time it is formatted
struct CountingArg<'a> {
    count: &'a AtomicUsize,
}

impl fmt::Display for CountingArg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.count.fetch_add(1, Ordering::SeqCst);
        write!(f, "counted")
    }
}

/// Argument whose formatting always fails
struct FailingArg;

impl fmt::Display for FailingArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("partial")?;
        Err(fmt::Error)
    }
}

// =============================================================================
// Line Rendering Tests
// =============================================================================

#[test]
fn test_logv_prefixes_tag() {
    let sink = CaptureSink::default();
    let adapter = EngineLogAdapter::new("[Engine]:", 8192, sink.clone());

    adapter.logv(format_args!("flushed {} keys to level {}", 42, 0));

    assert_eq!(sink.lines(), vec!["[Engine]:flushed 42 keys to level 0".to_string()]);
}

#[test]
fn test_one_line_per_call() {
    let sink = CaptureSink::default();
    let adapter = EngineLogAdapter::new("[Engine]:", 8192, sink.clone());

    adapter.logv(format_args!("first"));
    adapter.logv(format_args!("second"));
    adapter.logv(format_args!(""));

    assert_eq!(
        sink.lines(),
        vec!["[Engine]:first", "[Engine]:second", "[Engine]:"]
    );
}

#[test]
fn test_long_message_is_truncated() {
    let sink = CaptureSink::default();
    let adapter = EngineLogAdapter::new("[E]:", 16, sink.clone());

    adapter.logv(format_args!("{}", "x".repeat(100)));

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0], format!("[E]:{}", "x".repeat(12)));
    assert_eq!(lines[0].len(), 16);
}

#[test]
fn test_truncation_respects_char_boundaries() {
    let sink = CaptureSink::default();
    // Tag takes 4 bytes, leaving 3: room for one 2-byte char only
    let adapter = EngineLogAdapter::new("[E]:", 7, sink.clone());

    adapter.logv(format_args!("ééé"));

    assert_eq!(sink.lines(), vec!["[E]:é".to_string()]);
}

#[test]
fn test_failing_argument_forwards_partial_line() {
    let sink = CaptureSink::default();
    let adapter = EngineLogAdapter::new("[Engine]:", 8192, sink.clone());

    adapter.logv(format_args!("value={} tail", FailingArg));

    assert_eq!(sink.lines(), vec!["[Engine]:value=partial".to_string()]);
}

// =============================================================================
// Tag Failure Tests
// =============================================================================

#[test]
fn test_tag_render_failure_emits_single_diagnostic() {
    let sink = CaptureSink::default();
    // Capacity smaller than the tag: the tag itself cannot be rendered
    let adapter = EngineLogAdapter::new("[Engine]:", 4, sink.clone());
    let count = AtomicUsize::new(0);

    adapter.logv(format_args!("{} {}", CountingArg { count: &count }, CountingArg { count: &count }));

    assert_eq!(sink.lines(), vec![TAG_RENDER_FAILURE.to_string()]);
    assert_eq!(count.load(Ordering::SeqCst), 0, "arguments must not be formatted");
}

#[test]
fn test_arguments_formatted_once_on_success() {
    let sink = CaptureSink::default();
    let adapter = EngineLogAdapter::new("[Engine]:", 8192, sink.clone());
    let count = AtomicUsize::new(0);

    adapter.logv(format_args!("{}", CountingArg { count: &count }));

    assert_eq!(sink.lines(), vec!["[Engine]:counted".to_string()]);
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_tag_exactly_filling_buffer_still_logs() {
    let sink = CaptureSink::default();
    let adapter = EngineLogAdapter::new("[E]:", 4, sink.clone());

    adapter.logv(format_args!("dropped"));

    assert_eq!(sink.lines(), vec!["[E]:".to_string()]);
}

// =============================================================================
// Engine Hook Tests
// =============================================================================

#[test]
fn test_adapter_as_engine_logger() {
    let sink = CaptureSink::default();
    let logger: Arc<dyn EngineLogger> = Arc::new(EngineLogAdapter::new("[Engine]:", 64, sink.clone()));

    logger.logv(format_args!("opened with {} files", 3));

    assert_eq!(sink.lines(), vec!["[Engine]:opened with 3 files".to_string()]);
}

#[test]
fn test_adapter_from_config_logs_through_tracing() {
    let config = Config::builder().log_tag("[LSM]:").log_buffer_capacity(128).build();
    let adapter = EngineLogAdapter::from_config(&config);

    // No subscriber installed: the line is dropped, nothing panics
    adapter.logv(format_args!("compaction finished"));
}

// =============================================================================
// Line Buffer Tests
// =============================================================================

#[test]
fn test_line_buffer_tracks_truncation() {
    let mut buffer = LineBuffer::with_capacity(5);

    assert!(buffer.write_str("abc").is_ok());
    assert_eq!(buffer.remaining(), 2);
    assert!(!buffer.is_truncated());

    assert!(buffer.write_str("defg").is_err());
    assert_eq!(buffer.as_str(), "abcde");
    assert!(buffer.is_truncated());
    assert_eq!(buffer.remaining(), 0);
}

#[test]
fn test_line_buffer_zero_capacity() {
    let mut buffer = LineBuffer::with_capacity(0);

    assert!(buffer.write_str("").is_ok());
    assert!(buffer.write_str("a").is_err());
    assert!(buffer.is_empty());
}
