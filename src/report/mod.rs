//! Prefix report parsing
//!
//! A report is the text produced for one prefix: a listing of
//! `date time size file_name` lines followed by the `Total Objects` and
//! `Total Size` header lines.

mod parser;
mod summary;

pub use parser::{parse_report, parse_report_chunks};
pub use summary::extract_totals;
