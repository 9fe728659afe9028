//! Logger module
//!
//! Provides logging utilities for the mock API server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging with a level threshold
//! - File-based logging support

mod format;
mod level;
pub mod writer;

pub use format::AccessLogEntry;
pub use level::LogLevel;

use crate::config::Config;
use std::net::SocketAddr;

/// Threshold used before `init()` runs (tests, early startup errors)
const DEFAULT_LEVEL: LogLevel = LogLevel::Info;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    let level = config.logging.level.parse().unwrap_or(DEFAULT_LEVEL);
    writer::init(
        level,
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

fn enabled(level: LogLevel) -> bool {
    writer::get()
        .map_or(DEFAULT_LEVEL, writer::LogWriter::level)
        .allows(level)
}

/// Write to info/access log
fn write_info(message: &str) {
    if !enabled(LogLevel::Info) {
        return;
    }
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(level: LogLevel, message: &str) {
    if !enabled(level) {
        return;
    }
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    let base = config.api.base();
    write_info("======================================");
    write_info("Mock API server started successfully");
    write_info(&format!("Listening on: http://{addr}"));
    let level: LogLevel = config.logging.level.parse().unwrap_or(DEFAULT_LEVEL);
    write_info(&format!("Log level: {level}"));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("Routes:");
    write_info(&format!("  - GET    {base}/users?page={{page}}"));
    write_info(&format!("  - GET    {base}/users/{{user_id}}"));
    write_info(&format!("  - GET    {base}/unknown"));
    write_info(&format!("  - POST   {base}/users"));
    write_info(&format!("  - PUT    {base}/users/{{user_id}}"));
    write_info(&format!("  - PATCH  {base}/users/{{user_id}}"));
    write_info(&format!("  - DELETE {base}/users/{{user_id}}"));
    if config.health.enabled {
        write_info(&format!(
            "Health checks: {} {}",
            config.health.liveness_path, config.health.readiness_path
        ));
    }
    write_info("======================================\n");
}

/// Dump the effective configuration at debug level
pub fn log_config(config: &Config) {
    if !enabled(LogLevel::Debug) {
        return;
    }
    match config.to_toml() {
        Ok(rendered) => write_info(&format!("[CONFIG] Effective configuration:\n{rendered}")),
        Err(e) => log_warning(&e),
    }
}

pub fn log_debug(message: &str) {
    if enabled(LogLevel::Debug) {
        write_info(&format!("[DEBUG] {message}"));
    }
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    log_debug(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(
        LogLevel::Error,
        &format!("[ERROR] Failed to serve connection: {err:?}"),
    );
}

pub fn log_error(message: &str) {
    write_error(LogLevel::Error, &format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(LogLevel::Warn, &format!("[WARN] {message}"));
}

pub fn log_headers_count(count: usize, show: bool) {
    if show {
        write_info(&format!("[Headers] Count: {count}"));
    }
}

/// Log formatted access log entry
///
/// Gated only by `logging.access_log` at the call site, never by the level.
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access_line(writer::get(), &entry.format(format));
}

fn write_access_line(writer: Option<&writer::LogWriter>, line: &str) {
    match writer {
        Some(w) => w.write_access(line),
        None => println!("{line}"),
    }
}

pub fn log_shutdown_started() {
    write_info("\n[Shutdown] Signal received, no longer accepting connections");
}

pub fn log_shutdown_complete(remaining: usize) {
    if remaining == 0 {
        write_info("[Shutdown] All connections closed");
    } else {
        log_warning(&format!(
            "[Shutdown] Exiting with {remaining} connection(s) still open"
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_access_lines_ignore_level_threshold() {
        let dir = std::env::temp_dir().join(format!("reqres-stub-access-{}", std::process::id()));
        let path = dir.join("access.log");
        let path_str = path.to_string_lossy().into_owned();
        let writer = writer::LogWriter::new(LogLevel::Warn, Some(&path_str), None).unwrap();

        let mut entry = AccessLogEntry::new(
            "127.0.0.1".to_string(),
            "GET".to_string(),
            "/api/unknown".to_string(),
        );
        entry.status = 200;
        write_access_line(Some(&writer), &entry.format("$request_method $request_uri $status"));

        let contents = fs::read_to_string(&path).unwrap();
        fs::remove_dir_all(&dir).ok();
        assert_eq!(contents, "GET /api/unknown 200\n");
    }
}
