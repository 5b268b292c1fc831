use std::time::Duration;

use tracing::debug;

use crate::error::{Result, StatError};
use crate::model::PrefixSummary;
use crate::report::{extract_totals, parse_report};
use crate::repository::ReportSource;
use crate::util::{format_megabytes, prefix_label};

/// Fetches and summarizes the report of a single prefix
pub struct PrefixAggregator<S> {
    source: S,
    bucket: String,
    fetch_timeout: Option<Duration>,
}

impl<S: ReportSource> PrefixAggregator<S> {
    pub fn new(source: S, bucket: impl Into<String>) -> Self {
        Self {
            source,
            bucket: bucket.into(),
            fetch_timeout: None,
        }
    }

    /// Fail a fetch that takes longer than `timeout`
    pub fn with_fetch_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Fetch the report for `prefix` and turn it into `(label, summary)`.
    ///
    /// Performs exactly one report fetch.
    pub async fn aggregate(&self, prefix: &str) -> Result<(String, PrefixSummary)> {
        let label = label_of(prefix)?;
        debug!(prefix, "fetching report");
        let report = self.fetch(prefix).await?;
        let summary = summarize(prefix, &report)?;
        debug!(prefix, count = summary.count, size = summary.size, "prefix aggregated");
        Ok((label.to_string(), summary))
    }

    async fn fetch(&self, prefix: &str) -> Result<String> {
        let fetch = self.source.fetch_report(&self.bucket, prefix);
        match self.fetch_timeout {
            Some(after) => tokio::time::timeout(after, fetch)
                .await
                .map_err(|_| StatError::TimedOut {
                    prefix: prefix.to_string(),
                    after,
                })?,
            None => fetch.await,
        }
    }
}

/// Derive the output label of `prefix`, rejecting prefixes without one
pub fn label_of(prefix: &str) -> Result<&str> {
    prefix_label(prefix).ok_or_else(|| StatError::InvalidPrefix(prefix.to_string()))
}

/// Parse a report and compute the summary of its prefix
pub fn summarize(prefix: &str, report: &str) -> Result<PrefixSummary> {
    let rows = parse_report(report)?;
    let totals = extract_totals(&rows)?;

    if totals.total_objects == 0 {
        return Err(StatError::DivisionByZero {
            prefix: prefix.to_string(),
        });
    }
    let avg = totals.total_size / totals.total_objects;

    Ok(PrefixSummary {
        count: totals.total_objects,
        size: totals.total_size,
        avg,
        size_mb: format_megabytes(totals.total_size.into()),
        avg_mb: format_megabytes(avg.into()),
    })
}
