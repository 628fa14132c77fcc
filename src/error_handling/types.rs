//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the logger with custom message (e.g., file creation).
    #[error("Logger initialization error: {0}")]
    LoggerSetupError(String),
}

/// Invalid configuration values.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `--workers` outside `1..=max`.
    #[error("worker count must be between 1 and {max}, got {value}")]
    InvalidWorkerCount {
        /// The rejected value
        value: usize,
        /// Largest accepted value
        max: usize,
    },

    /// `--dns-timeout` of zero.
    #[error("DNS timeout must be at least one second")]
    InvalidDnsTimeout,

    /// `--dns-attempts` of zero.
    #[error("DNS attempts must be at least 1")]
    InvalidDnsAttempts,
}

/// A failed DNS query.
///
/// `NoRecords` is an answer rather than a failure; callers treat it as an
/// empty record set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The name exists without records of the requested type, or does not exist.
    #[error("no records found for {name}")]
    NoRecords {
        /// Queried name
        name: String,
    },

    /// The resolver gave up waiting for an answer.
    #[error("lookup for {name} timed out")]
    Timeout {
        /// Queried name
        name: String,
    },

    /// Any other resolver or transport failure.
    #[error("lookup for {name} failed: {message}")]
    Failed {
        /// Queried name
        name: String,
        /// Resolver error text
        message: String,
    },
}

/// Fatal errors of a check run.
#[derive(Error, Debug)]
pub enum CheckError {
    /// Reading the domain list failed before end of input.
    #[error("could not read from input: {0}")]
    InputRead(#[source] std::io::Error),

    /// Writing a result row failed.
    #[error("could not write results: {0}")]
    OutputWrite(#[source] std::io::Error),

    /// Fewer rows were written than domains were dispatched.
    #[error("{dispatched} domains were dispatched but only {written} results were written")]
    IncompleteRun {
        /// Domains handed to the worker pool
        dispatched: usize,
        /// Rows written by the sink
        written: usize,
    },
}

/// Types of errors counted while inspecting domains.
///
/// None of these abort a run; they degrade the affected field of a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    DnsMxLookupError,
    DnsSpfLookupError,
    DnsDmarcLookupError,
    DnsLookupTimeout,
    InspectionPanic,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::DnsMxLookupError => "DNS MX lookup error",
            ErrorType::DnsSpfLookupError => "DNS TXT (SPF) lookup error",
            ErrorType::DnsDmarcLookupError => "DNS TXT (DMARC) lookup error",
            ErrorType::DnsLookupTimeout => "DNS lookup timeout",
            ErrorType::InspectionPanic => "Domain inspection panicked",
        }
    }
}
