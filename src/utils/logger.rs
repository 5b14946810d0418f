/*
 * Simulation Logging System
 *
 * This module implements the logger for the simulation. It provides
 * structured logging with different log levels, integrating with Rust's
 * standard logging framework.
 *
 * Why this is important:
 * - Lifecycle log lines are the shims' primary observable behavior
 * - Every formatted line also lands in the journal, so tests can assert
 *   on log side effects without scraping process output
 *
 * Where a kernel logger would write to a serial port, this one writes to
 * stderr.
 */

use log::{Level, LevelFilter, Metadata, Record};
use std::sync::Once;

use super::journal;

/// Logger implementation backing the `log` facade.
struct ShimLogger;

impl log::Log for ShimLogger {
    /// Checks if the given log level is enabled.
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    /// Logs the record to stderr and the journal.
    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let line = format!("[{}] {}", record.level(), record.args());
            journal::record(&line);
            eprintln!("{line}");
        }
    }

    /// Flushes the logger (no-op in this case).
    fn flush(&self) {}
}

/// The logger instance used for logging.
static LOGGER: ShimLogger = ShimLogger;

static INIT: Once = Once::new();

/// Initializes the logger
///
/// Tests and embedding hosts may all call this; installation happens
/// once, and concurrent callers block until it has completed.
pub fn init() {
    INIT.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Info);
        }
    });
}
