//! Output formatting for inspection results.

mod csv;

pub use crate::config::CSV_HEADER;
pub use csv::{format_row, quote_field};
