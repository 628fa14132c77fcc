//! DNS resolver initialization.
//!
//! This module provides functions to initialize the DNS resolver with proper
//! timeout configuration.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

use crate::dns::HickoryResolver;

/// Initializes the DNS resolver used for MX and TXT lookups.
///
/// Reads the host's resolver configuration (`/etc/resolv.conf` on Unix, the
/// registry on Windows) so answers match what the host's mail software sees.
/// If that configuration cannot be read, falls back to the library default
/// upstreams (Google Public DNS).
///
/// The timeout and attempt count from the configuration override the system
/// values so one unresponsive server cannot stall a worker indefinitely.
///
/// # Arguments
///
/// * `timeout` - Per-query timeout
/// * `attempts` - Attempts per query before giving up
///
/// # Returns
///
/// A resolver wrapped in `Arc` for sharing across workers.
pub fn init_resolver(timeout: Duration, attempts: usize) -> Arc<HickoryResolver> {
    let (config, mut opts) = match hickory_resolver::system_conf::read_system_conf() {
        Ok(system) => system,
        Err(e) => {
            log::warn!("Could not read system DNS configuration, using default upstreams: {e}");
            (ResolverConfig::default(), ResolverOpts::default())
        }
    };

    opts.timeout = timeout;
    opts.attempts = attempts;
    // Queries are for apex names; never append search domains
    opts.ndots = 0;

    Arc::new(HickoryResolver::new(TokioAsyncResolver::tokio(config, opts)))
}
