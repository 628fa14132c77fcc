//! Result row formatting.
//!
//! Rows are comma-space separated. Booleans render as `true`/`false`; record
//! fields are always double-quoted so embedded commas are safe:
//!
//! ```text
//! domain, hasMX, hasSPF, spfRecord, hasDMARC, dmarcRecord
//! a.com, true, true, "v=spf1 -all", false, ""
//! ```

use std::fmt::Write;

use crate::inspect::InspectionResult;

/// Formats one result as a row, without the trailing newline.
pub fn format_row(result: &InspectionResult) -> String {
    format!(
        "{}, {}, {}, {}, {}, {}",
        result.domain,
        result.has_mx,
        result.has_spf,
        quote_field(result.spf_record.as_deref()),
        result.has_dmarc,
        quote_field(result.dmarc_record.as_deref()),
    )
}

/// Double-quotes a record value; `None` renders as `""`.
///
/// Backslashes and quotes are backslash-escaped, as are control characters,
/// so a row always occupies exactly one line.
pub fn quote_field(value: Option<&str>) -> String {
    let value = value.unwrap_or_default();
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => {
                if (c as u32) <= 0xff {
                    let _ = write!(quoted, "\\x{:02x}", c as u32);
                } else {
                    let _ = write!(quoted, "\\u{{{:04x}}}", c as u32);
                }
            }
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
