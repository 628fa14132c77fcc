//! Domain inspection.
//!
//! Turns one domain name into an [`InspectionResult`] by running the MX, SPF
//! and DMARC checks. Inspection never fails: a lookup error only clears the
//! fields of the check it belongs to.

use crate::dns::{
    dmarc_query_name, extract_dmarc_record, extract_spf_record, lookup_mx_records,
    lookup_txt_records, MailResolver,
};
use crate::error_handling::{ErrorType, LookupError, ProcessingStats};

/// Mail-related records found for one domain.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InspectionResult {
    /// Domain as read from the input
    pub domain: String,
    /// At least one MX record exists
    pub has_mx: bool,
    /// A TXT record starting with `v=spf1` exists
    pub has_spf: bool,
    /// The first SPF record, verbatim
    pub spf_record: Option<String>,
    /// A TXT record starting with `v=DMARC1` exists at `_dmarc.<domain>`
    pub has_dmarc: bool,
    /// The first DMARC record, verbatim
    pub dmarc_record: Option<String>,
}

impl InspectionResult {
    /// Result with every check negative.
    pub fn absent(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            has_mx: false,
            has_spf: false,
            spf_record: None,
            has_dmarc: false,
            dmarc_record: None,
        }
    }
}

/// Inspects a domain's mail records.
///
/// Issues three lookups concurrently: MX for `domain`, TXT for `domain` (SPF)
/// and TXT for `_dmarc.<domain>` (DMARC). Each check is independent; a failure
/// in one is logged by the lookup layer, counted in `stats` and reported as
/// "absent" without affecting the other two.
pub async fn inspect_domain(
    domain: &str,
    resolver: &dyn MailResolver,
    stats: &ProcessingStats,
) -> InspectionResult {
    let (has_mx, spf_record, dmarc_record) = tokio::join!(
        detect_mx(domain, resolver, stats),
        detect_spf(domain, resolver, stats),
        detect_dmarc(domain, resolver, stats),
    );

    InspectionResult {
        domain: domain.to_string(),
        has_mx,
        has_spf: spf_record.is_some(),
        spf_record,
        has_dmarc: dmarc_record.is_some(),
        dmarc_record,
    }
}

async fn detect_mx(domain: &str, resolver: &dyn MailResolver, stats: &ProcessingStats) -> bool {
    match lookup_mx_records(domain, resolver).await {
        Ok(records) => !records.is_empty(),
        Err(e) => {
            record_failure(stats, ErrorType::DnsMxLookupError, &e);
            false
        }
    }
}

async fn detect_spf(
    domain: &str,
    resolver: &dyn MailResolver,
    stats: &ProcessingStats,
) -> Option<String> {
    match lookup_txt_records(domain, resolver).await {
        Ok(records) => extract_spf_record(&records),
        Err(e) => {
            record_failure(stats, ErrorType::DnsSpfLookupError, &e);
            None
        }
    }
}

async fn detect_dmarc(
    domain: &str,
    resolver: &dyn MailResolver,
    stats: &ProcessingStats,
) -> Option<String> {
    match lookup_txt_records(&dmarc_query_name(domain), resolver).await {
        Ok(records) => extract_dmarc_record(&records),
        Err(e) => {
            record_failure(stats, ErrorType::DnsDmarcLookupError, &e);
            None
        }
    }
}

fn record_failure(stats: &ProcessingStats, check: ErrorType, err: &LookupError) {
    if matches!(err, LookupError::Timeout { .. }) {
        stats.increment_error(ErrorType::DnsLookupTimeout);
    }
    stats.increment_error(check);
}
