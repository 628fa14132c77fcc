//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

use crate::config::constants::{DNS_ATTEMPTS, DNS_TIMEOUT_SECS, MAX_WORKERS, STDIO_PATH};
use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace). Only consulted when `--verbose` is set.
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Returns the number of workers used when `--workers` is not given.
///
/// This is the host's available parallelism, or 1 if it cannot be determined.
pub fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Run configuration.
///
/// Parsed from the command line by the binary, or built programmatically by
/// library users:
///
/// ```no_run
/// use domain_mail_status::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     input: Some(PathBuf::from("domains.txt")),
///     workers: Some(16),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "domain_mail_status",
    version,
    about = "Checks domains for MX, SPF and DMARC records and writes one CSV row per domain"
)]
pub struct Config {
    /// File with one domain per line (stdin when omitted or "-")
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// File to write results to (stdout when omitted or "-")
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Number of concurrent workers [default: available parallelism]
    #[arg(long, short = 'w')]
    pub workers: Option<usize>,

    /// File to append diagnostics to (stderr when omitted)
    #[arg(long, value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// Emit diagnostics such as failed lookups
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Diagnostic level when --verbose is set
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Diagnostic format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Per-query DNS timeout in seconds
    #[arg(long = "dns-timeout", value_name = "SECS", default_value_t = DNS_TIMEOUT_SECS)]
    pub dns_timeout_secs: u64,

    /// Attempts per DNS query before giving up
    #[arg(long, default_value_t = DNS_ATTEMPTS)]
    pub dns_attempts: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            workers: None,
            log: None,
            verbose: false,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            dns_timeout_secs: DNS_TIMEOUT_SECS,
            dns_attempts: DNS_ATTEMPTS,
        }
    }
}

impl Config {
    /// Checks option values that clap cannot express.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the first invalid value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(workers) = self.workers {
            if workers == 0 || workers > MAX_WORKERS {
                return Err(ConfigError::InvalidWorkerCount {
                    value: workers,
                    max: MAX_WORKERS,
                });
            }
        }
        if self.dns_timeout_secs == 0 {
            return Err(ConfigError::InvalidDnsTimeout);
        }
        if self.dns_attempts == 0 {
            return Err(ConfigError::InvalidDnsAttempts);
        }
        Ok(())
    }

    /// Worker count for this run: `--workers` if given, otherwise the host's
    /// available parallelism.
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(default_worker_count)
    }

    /// Level the logger is initialized with. Diagnostics are discarded unless
    /// `--verbose` is set.
    pub fn effective_log_level(&self) -> log::LevelFilter {
        if self.verbose {
            self.log_level.clone().into()
        } else {
            log::LevelFilter::Off
        }
    }

    /// Input path, or `None` for stdin.
    pub fn input_path(&self) -> Option<&Path> {
        non_stdio(self.input.as_deref())
    }

    /// Output path, or `None` for stdout.
    pub fn output_path(&self) -> Option<&Path> {
        non_stdio(self.output.as_deref())
    }
}

fn non_stdio(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| p.as_os_str() != STDIO_PATH)
}
