//! Concurrent fetch-parse-aggregate pipeline
//!
//! - **aggregator**: one prefix, fetch -> parse -> summarize
//! - **runner**: all prefixes under a concurrency ceiling and failure policy
//! - **totals**: grand totals over the per-prefix results
//! - **progress**: progress reporting abstraction

mod aggregator;
mod progress;
mod runner;
mod totals;

pub use aggregator::{label_of, summarize, PrefixAggregator};
pub use progress::{reporter, IndicatifProgress, NoopProgress, ProgressHandle, ProgressReporter};
pub use runner::{
    validate_labels, FailurePolicy, Pipeline, PipelineOutcome, PrefixFailure, DEFAULT_MAX_CONCURRENCY,
};
pub use totals::reduce_totals;
