//! Collaborator contract for prefix enumeration and report retrieval
//!
//! Decouples the aggregation pipeline from how prefixes and reports are
//! obtained (external commands in production, in-memory fixtures in tests).

use crate::error::Result;

/// Supplier of prefixes and per-prefix report text
///
/// Both calls are all-or-nothing: a failure yields no partial data.
#[allow(async_fn_in_trait)]
pub trait ReportSource {
    /// List the prefixes of a bucket, in the order they should be reported
    async fn list_prefixes(&self, bucket: &str) -> Result<Vec<String>>;

    /// Produce the raw report text for one prefix
    async fn fetch_report(&self, bucket: &str, prefix: &str) -> Result<String>;
}

impl<T: ReportSource> ReportSource for &T {
    async fn list_prefixes(&self, bucket: &str) -> Result<Vec<String>> {
        (**self).list_prefixes(bucket).await
    }

    async fn fetch_report(&self, bucket: &str, prefix: &str) -> Result<String> {
        (**self).fetch_report(bucket, prefix).await
    }
}
