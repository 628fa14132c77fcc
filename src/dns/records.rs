//! DNS record queries (MX, TXT).
//!
//! These wrap a [`MailResolver`] with the policy shared by every check:
//! an empty answer is logged but not an error, while timeouts and transport
//! failures are logged and returned so the caller can count them.

use log::{info, warn};

use crate::error_handling::LookupError;

use super::resolver::MailResolver;

/// Queries MX (mail exchanger) records for a domain.
///
/// # Returns
///
/// A vector of (priority, hostname) tuples, sorted by priority (lower = higher priority).
/// Returns an empty vector if the domain has no MX records or does not exist.
///
/// # Errors
///
/// Returns the resolver's [`LookupError`] for timeouts and other failures.
pub async fn lookup_mx_records(
    domain: &str,
    resolver: &dyn MailResolver,
) -> Result<Vec<(u16, String)>, LookupError> {
    match resolver.lookup_mx(domain).await {
        Ok(mut mx_records) => {
            // Sort by priority (lower preference = higher priority)
            mx_records.sort_by_key(|(priority, _)| *priority);
            Ok(mx_records)
        }
        Err(e) => empty_or_err("MX", domain, e),
    }
}

/// Queries TXT (text) records for a name.
///
/// Records keep the order the resolver returned them in.
///
/// # Errors
///
/// Returns the resolver's [`LookupError`] for timeouts and other failures.
pub async fn lookup_txt_records(
    name: &str,
    resolver: &dyn MailResolver,
) -> Result<Vec<String>, LookupError> {
    match resolver.lookup_txt(name).await {
        Ok(txt_records) => Ok(txt_records),
        Err(e) => empty_or_err("TXT", name, e),
    }
}

fn empty_or_err<T: Default>(kind: &str, name: &str, err: LookupError) -> Result<T, LookupError> {
    match err {
        // Expected for plenty of domains, so not counted as a failure
        LookupError::NoRecords { .. } => {
            info!("No {kind} records for {name}: {err}");
            Ok(T::default())
        }
        LookupError::Timeout { .. } => {
            warn!("{kind} record lookup timed out for {name}: {err}");
            Err(err)
        }
        LookupError::Failed { .. } => {
            warn!("Failed to lookup {kind} records for {name}: {err}");
            Err(err)
        }
    }
}
