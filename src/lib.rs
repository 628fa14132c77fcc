//! domain_mail_status library: mail record checks for lists of domains
//!
//! For every domain read from the input, this library reports whether the
//! domain has MX records, an SPF record and a DMARC record, streaming one CSV
//! row per domain as results arrive. Lookups run on a bounded pool of workers
//! fed through a bounded queue, so memory stays flat for arbitrarily long
//! inputs.
//!
//! # Example
//!
//! ```no_run
//! use domain_mail_status::{run_check, Config};
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     input: Some(PathBuf::from("domains.txt")),
//!     output: Some(PathBuf::from("results.csv")),
//!     workers: Some(32),
//!     ..Default::default()
//! };
//!
//! let report = run_check(config).await?;
//! println!("Checked {} domains, {} with DMARC", report.total_domains, report.with_dmarc);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

mod app;
pub mod config;
pub mod dns;
pub mod error_handling;
pub mod export;
pub mod initialization;
pub mod inspect;
pub mod run;

#[cfg(test)]
mod test_helpers;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use dns::{HickoryResolver, MailResolver};
pub use error_handling::{CheckError, ConfigError, LookupError};
pub use inspect::{inspect_domain, InspectionResult};
pub use run::{check_domains, run_check, CheckOptions, CheckReport};
