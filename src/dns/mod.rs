//! DNS record querying.
//!
//! This module provides the async DNS operations domain inspection needs:
//! - Mail exchanger queries (MX records)
//! - Text record queries (TXT records) with SPF/DMARC extraction
//!
//! Queries go through the [`MailResolver`] trait; [`HickoryResolver`] is the
//! production implementation using `hickory-resolver` and the system DNS
//! configuration.

mod extract;
mod records;
mod resolver;

// Re-export public API
pub use extract::{dmarc_query_name, extract_dmarc_record, extract_spf_record};
pub use records::{lookup_mx_records, lookup_txt_records};
pub use resolver::{HickoryResolver, MailResolver};
