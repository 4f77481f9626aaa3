//! Unit tests for the Engine logging API
//!
//! IMPORTANT: LOGGER is a global OnceLock shared across all tests.
//! Tests that swap the logger are marked with #[serial].

use crate::obsidian::Engine;
use crate::obsidian::log::{Logger, LogEntry, LogSeverity};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST HELPERS
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn with_source(entries: &Arc<Mutex<Vec<LogEntry>>>, source: &str) -> Vec<LogEntry> {
    entries.lock().unwrap().iter().filter(|e| e.source == source).cloned().collect()
}

// ============================================================================
// LOGGING API TESTS
// ============================================================================

#[test]
#[serial]
fn test_default_logger_logs_without_panic() {
    Engine::reset_logger();
    Engine::log(LogSeverity::Info, "test::engine", "hello".to_string());
    Engine::log_detailed(LogSeverity::Error, "test::engine", "boom".to_string(), "engine.rs", 1);
}

#[test]
#[serial]
fn test_custom_logger_receives_simple_log() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);

    Engine::log(LogSeverity::Warn, "test::engine::simple", "careful".to_string());

    let logged = with_source(&entries, "test::engine::simple");
    assert_eq!(logged.len(), 1);
    assert_eq!(logged[0].severity, LogSeverity::Warn);
    assert_eq!(logged[0].message, "careful");
    assert_eq!(logged[0].file, None);
    assert_eq!(logged[0].line, None);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_log_detailed_with_file_line() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);

    Engine::log_detailed(
        LogSeverity::Error,
        "test::engine::detailed",
        "vkCreatePipeline failed".to_string(),
        "vulkan.rs",
        128,
    );

    let logged = with_source(&entries, "test::engine::detailed");
    assert_eq!(logged.len(), 1);
    assert_eq!(logged[0].file, Some("vulkan.rs"));
    assert_eq!(logged[0].line, Some(128));

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_reset_logger_stops_capture() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);
    Engine::reset_logger();

    Engine::log(LogSeverity::Info, "test::engine::reset", "after reset".to_string());

    assert!(with_source(&entries, "test::engine::reset").is_empty());
}

#[test]
#[serial]
fn test_macros_route_through_engine() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);

    crate::engine_trace!("test::engine::macros", "trace {}", 1);
    crate::engine_debug!("test::engine::macros", "debug {}", 2);
    crate::engine_info!("test::engine::macros", "info {}", 3);
    crate::engine_warn!("test::engine::macros", "warn {}", 4);
    crate::engine_error!("test::engine::macros", "error {}", 5);

    let logged = with_source(&entries, "test::engine::macros");
    let severities: Vec<LogSeverity> = logged.iter().map(|e| e.severity).collect();
    assert_eq!(
        severities,
        vec![
            LogSeverity::Trace,
            LogSeverity::Debug,
            LogSeverity::Info,
            LogSeverity::Warn,
            LogSeverity::Error,
        ]
    );
    assert_eq!(logged[4].message, "error 5");
    assert!(logged[4].file.is_some());

    Engine::reset_logger();
}
