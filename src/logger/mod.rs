//! Logging
//!
//! stdout carries exactly one line, the startup banner. Everything else goes
//! through two streams:
//! - access: one line per response, in the configured format
//! - error: `[ERROR]` and `[WARN]` records

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;

/// Open the configured log files. Call once, before serving.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

// Before init (and in unit tests) both streams fall back to stderr
fn error_line(record: &str) {
    match writer::get() {
        Some(sinks) => sinks.error(record),
        None => eprintln!("{record}"),
    }
}

fn access_line(record: &str) {
    match writer::get() {
        Some(sinks) => sinks.access(record),
        None => eprintln!("{record}"),
    }
}

/// The one line printed to stdout before serving
pub fn log_server_start(port: u16) {
    println!("serving at port {port}");
}

pub fn log_accept_error(err: &std::io::Error) {
    log_error(&format!("accept failed: {err}"));
}

pub fn log_connection_error(err: &impl std::fmt::Display) {
    log_error(&format!("connection aborted: {err}"));
}

pub fn log_error(message: &str) {
    error_line(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    error_line(&format!("[WARN] {message}"));
}

/// One access record for a finished request
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    access_line(&entry.format(format));
}
