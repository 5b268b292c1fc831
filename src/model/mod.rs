mod report;
mod summary;

pub use report::{HeaderTotals, ReportRow};
pub use summary::{AggregateResult, GrandTotals, PrefixSummary};
