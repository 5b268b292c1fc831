use std::path::PathBuf;
use std::time::Duration;

use crate::pipeline::{FailurePolicy, DEFAULT_MAX_CONCURRENCY};

pub const DEFAULT_LIST_COMMAND: &str = "./scripts/runExtractPrefixList.sh";
pub const DEFAULT_REPORT_COMMAND: &str = "./scripts/runPrefixSummary.sh";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Resolved settings for one aggregation run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub bucket: String,
    pub list_command: PathBuf,
    pub report_command: PathBuf,
    pub output_dir: PathBuf,
    pub max_concurrency: usize,
    pub fetch_timeout: Option<Duration>,
    pub failure_policy: FailurePolicy,
    pub quiet: bool,
}

impl RunConfig {
    /// Defaults for everything except the bucket
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            list_command: PathBuf::from(DEFAULT_LIST_COMMAND),
            report_command: PathBuf::from(DEFAULT_REPORT_COMMAND),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            fetch_timeout: None,
            failure_policy: FailurePolicy::FailFast,
            quiet: false,
        }
    }
}
