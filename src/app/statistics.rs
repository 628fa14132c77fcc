//! End-of-run statistics.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, ProcessingStats};
use crate::run::CheckReport;

/// Logs the lookup failure counts of a run, if any.
pub fn print_error_statistics(error_stats: &ProcessingStats) {
    let total_errors = error_stats.total_errors();

    if total_errors > 0 {
        info!("Lookup Error Counts ({} total):", total_errors);
        for error_type in ErrorType::iter() {
            let count = error_stats.get_error_count(error_type);
            if count > 0 {
                info!("   {}: {}", error_type.as_str(), count);
            }
        }
    }
}

/// Logs a one-line summary of the run.
pub fn print_simple_summary(report: &CheckReport) {
    info!(
        "Checked {} domain{} in {:.1}s: {} with MX, {} with SPF, {} with DMARC, {} lookup failure{}",
        report.total_domains,
        if report.total_domains == 1 { "" } else { "s" },
        report.elapsed_seconds,
        report.with_mx,
        report.with_spf,
        report.with_dmarc,
        report.lookup_failures,
        if report.lookup_failures == 1 { "" } else { "s" },
    );
}
