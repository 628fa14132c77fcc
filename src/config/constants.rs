//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including DNS timeouts, concurrency limits and record prefixes.

// Network operation timeouts
/// DNS query timeout in seconds
/// Most answers arrive in well under a second; 5s leaves room for slow authoritative servers
pub const DNS_TIMEOUT_SECS: u64 = 5;
/// Attempts per query before the resolver gives up
pub const DNS_ATTEMPTS: usize = 2;

/// Upper bound for `--workers`.
///
/// Each worker holds at most three outstanding DNS queries, so this caps the
/// number of in-flight queries at roughly three thousand.
pub const MAX_WORKERS: usize = 1024;

/// Interval between progress log lines, in seconds.
pub const LOGGING_INTERVAL_SECS: u64 = 5;

// Record classification
/// SPF records start with this literal (RFC 7208 section 4.5)
pub const SPF_RECORD_PREFIX: &str = "v=spf1";
/// DMARC records start with this literal (RFC 7489 section 6.4)
pub const DMARC_RECORD_PREFIX: &str = "v=DMARC1";
/// DMARC policies are published under this label of the domain
pub const DMARC_DOMAIN_PREFIX: &str = "_dmarc.";

/// Longest accepted input line, in bytes, excluding the line terminator.
///
/// Domain names are at most 253 bytes; anything far beyond that is not a
/// domain list and is rejected instead of buffered.
pub const MAX_LINE_BYTES: usize = 64 * 1024;

/// Column header written once before any result rows.
pub const CSV_HEADER: &str = "domain, hasMX, hasSPF, spfRecord, hasDMARC, dmarcRecord";

/// Name used for stdin/stdout on the command line.
pub const STDIO_PATH: &str = "-";
