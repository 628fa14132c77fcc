//! DNS record extraction utilities.
//!
//! This module provides functions to pick SPF and DMARC records out of TXT
//! record collections. Matching is a literal, case-sensitive prefix test on
//! the untrimmed record; the policy itself is never parsed.

use crate::config::{DMARC_DOMAIN_PREFIX, DMARC_RECORD_PREFIX, SPF_RECORD_PREFIX};

/// Extracts SPF record from TXT records.
///
/// SPF records start with "v=spf1".
///
/// # Returns
///
/// The first SPF record in resolver order, verbatim, or `None` if no SPF record exists.
pub fn extract_spf_record(txt_records: &[String]) -> Option<String> {
    first_with_prefix(txt_records, SPF_RECORD_PREFIX)
}

/// Extracts DMARC record from TXT records.
///
/// DMARC records start with "v=DMARC1". The records passed in should come from
/// the name built by [`dmarc_query_name`].
///
/// # Returns
///
/// The first DMARC record in resolver order, verbatim, or `None` if no DMARC record exists.
pub fn extract_dmarc_record(txt_records: &[String]) -> Option<String> {
    first_with_prefix(txt_records, DMARC_RECORD_PREFIX)
}

/// Name under which a domain publishes its DMARC policy (`_dmarc.<domain>`).
pub fn dmarc_query_name(domain: &str) -> String {
    format!("{DMARC_DOMAIN_PREFIX}{domain}")
}

fn first_with_prefix(txt_records: &[String], prefix: &str) -> Option<String> {
    txt_records
        .iter()
        .find(|txt| txt.starts_with(prefix))
        .cloned()
}
