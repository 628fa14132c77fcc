//! Logger initialization.
//!
//! This module provides functions to initialize the logger with custom formatting,
//! writing either to stderr or to a diagnostic log file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::LevelFilter;

/// Initializes the logger with the specified level and format, writing to stderr.
///
/// Configures `env_logger` with custom formatting. Supports both plain text
/// (with colors and emojis) and JSON formats for structured logging.
///
/// The logger reads from the `RUST_LOG` environment variable first, but the
/// provided `level` parameter overrides it. Passing `LevelFilter::Off`
/// discards every diagnostic.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Show failed lookups on stderr
/// domain_mail_status --input domains.txt --verbose
///
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=hickory_resolver=debug domain_mail_status --verbose --log-level debug
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(true);

    let mut builder = base_builder(level);
    apply_format(&mut builder, format);

    // try_init() so tests that initialize twice get an error instead of a panic
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

/// Initializes the logger to append to `path`.
///
/// The file is created if missing, even when `level` is `Off`, so an
/// unwritable log path is reported at startup. Colors are disabled.
///
/// # Errors
///
/// Returns `InitializationError::LoggerSetupError` if the file cannot be
/// opened, or `InitializationError::LoggerError` if a logger is already installed.
pub fn init_logger_to_file(
    level: LevelFilter,
    format: LogFormat,
    path: &Path,
) -> Result<(), InitializationError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            InitializationError::LoggerSetupError(format!(
                "cannot open log file {}: {e}",
                path.display()
            ))
        })?;

    colored::control::set_override(false);

    let mut builder = base_builder(level);
    builder.target(env_logger::Target::Pipe(Box::new(file)));
    apply_format(&mut builder, format);

    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

fn base_builder(level: LevelFilter) -> env_logger::Builder {
    // Read from RUST_LOG environment variable first, then override with CLI arg
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    // hickory logs every malformed UDP answer it recovers from
    builder.filter_module("hickory_proto", level.min(LevelFilter::Error));
    builder.filter_module("hickory_resolver", level.min(LevelFilter::Warn));
    builder.filter_module("domain_mail_status", level);
    builder
}

fn apply_format(builder: &mut env_logger::Builder, format: LogFormat) {
    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let colored_level = match level {
                    log::Level::Error => level.to_string().red(),
                    log::Level::Warn => level.to_string().yellow(),
                    log::Level::Info => level.to_string().green(),
                    log::Level::Debug => level.to_string().blue(),
                    log::Level::Trace => level.to_string().purple(),
                };

                let emoji = match level {
                    log::Level::Error => "❌",
                    log::Level::Warn => "⚠️",
                    log::Level::Info => "✔️",
                    log::Level::Debug => "🔍",
                    log::Level::Trace => "🔬",
                };

                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    emoji,
                    record.target().cyan(),
                    colored_level,
                    record.args()
                )
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logger_to_file_reports_unopenable_path() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending
        let result = init_logger_to_file(LevelFilter::Info, LogFormat::Plain, dir.path());
        assert!(matches!(
            result,
            Err(InitializationError::LoggerSetupError(_))
        ));
    }

    #[test]
    fn test_init_logger_to_file_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diagnostics.log");
        // Only the first logger in a test process installs; the file is opened either way
        let _ = init_logger_to_file(LevelFilter::Off, LogFormat::Json, &path);
        assert!(path.exists());
    }

    #[test]
    fn test_init_logger_plain_format_does_not_panic() {
        let result = init_logger_with(LevelFilter::Info, LogFormat::Plain);
        // Accept either success or error (if already initialized)
        assert!(result.is_ok() || matches!(result, Err(InitializationError::LoggerError(_))));
    }
}
