//! Unit tests for log.rs
//!
//! Tests Logger trait, LogEntry, LogSeverity, DefaultLogger and the
//! error-building macros.

use crate::error::Error;
use crate::engine::Engine;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
use serial_test::serial;
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_debug() {
    assert_eq!(format!("{:?}", LogSeverity::Trace), "Trace");
    assert_eq!(format!("{:?}", LogSeverity::Info), "Info");
    assert_eq!(format!("{:?}", LogSeverity::Error), "Error");
}

// ============================================================================
// LOG ENTRY TESTS
// ============================================================================

#[test]
fn test_log_entry_creation_with_file_line() {
    let entry = LogEntry {
        severity: LogSeverity::Error,
        timestamp: SystemTime::now(),
        source: "obsidian::vulkan".to_string(),
        message: "vkCreateRenderPass failed".to_string(),
        file: Some("vulkan.rs"),
        line: Some(42),
    };

    assert_eq!(entry.severity, LogSeverity::Error);
    assert_eq!(entry.source, "obsidian::vulkan");
    assert_eq!(entry.file, Some("vulkan.rs"));
    assert_eq!(entry.line, Some(42));
}

// ============================================================================
// DEFAULT LOGGER TESTS
// ============================================================================

#[test]
fn test_default_logger_all_severities() {
    let logger = DefaultLogger;
    let timestamp = SystemTime::now();

    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        // Plain branch
        logger.log(&LogEntry {
            severity,
            timestamp,
            source: "test".to_string(),
            message: format!("{:?} message", severity),
            file: None,
            line: None,
        });
        // file:line branch
        logger.log(&LogEntry {
            severity,
            timestamp,
            source: "test".to_string(),
            message: format!("{:?} message with location", severity),
            file: Some("test.rs"),
            line: Some(7),
        });
    }
}

#[test]
fn test_logger_trait_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DefaultLogger>();
}

// ============================================================================
// MACRO TESTS
// ============================================================================

struct CaptureLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn capture() -> Arc<Mutex<Vec<LogEntry>>> {
    let entries = Arc::new(Mutex::new(Vec::new()));
    Engine::set_logger(CaptureLogger { entries: entries.clone() });
    entries
}

fn from_source(entries: &Arc<Mutex<Vec<LogEntry>>>, source: &str) -> Vec<LogEntry> {
    entries.lock().unwrap().iter().filter(|e| e.source == source).cloned().collect()
}

#[test]
#[serial]
fn test_engine_err_logs_and_builds_backend_error() {
    let entries = capture();

    let err = crate::engine_err!("test::log_macros::err", "lock poisoned ({})", 3);
    match err {
        Error::BackendError(msg) => assert_eq!(msg, "lock poisoned (3)"),
        other => panic!("unexpected error: {:?}", other),
    }

    let logged = from_source(&entries, "test::log_macros::err");
    assert_eq!(logged.len(), 1);
    assert_eq!(logged[0].severity, LogSeverity::Error);
    assert!(logged[0].file.is_some());
    assert!(logged[0].line.is_some());

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_engine_construction_err_builds_construction_failure() {
    let entries = capture();

    let err = crate::engine_construction_err!("test::log_macros::construct", "driver said {}", "no");
    assert!(matches!(err, Error::ConstructionFailure(ref msg) if msg == "driver said no"));
    assert_eq!(from_source(&entries, "test::log_macros::construct").len(), 1);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_engine_bail_returns_early() {
    let entries = capture();

    fn bails(flag: bool) -> crate::error::Result<u32> {
        if flag {
            crate::engine_bail!("test::log_macros::bail", "bailing out");
        }
        Ok(1)
    }

    assert!(bails(false).is_ok());
    assert!(matches!(bails(true), Err(Error::BackendError(_))));
    assert_eq!(from_source(&entries, "test::log_macros::bail").len(), 1);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_info_macro_has_no_location() {
    let entries = capture();

    crate::engine_info!("test::log_macros::info", "New render pass");

    let logged = from_source(&entries, "test::log_macros::info");
    assert_eq!(logged.len(), 1);
    assert_eq!(logged[0].severity, LogSeverity::Info);
    assert_eq!(logged[0].message, "New render pass");
    assert!(logged[0].file.is_none());

    Engine::reset_logger();
}
