use futures::{StreamExt, stream};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::error::{Result, StatError};
use crate::model::{AggregateResult, PrefixSummary};
use crate::repository::ReportSource;

use super::aggregator::{PrefixAggregator, label_of};
use super::progress::{NoopProgress, ProgressReporter};

/// Default ceiling on concurrent report fetches
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// What a failed prefix does to the rest of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// First failure aborts the run; no results are returned
    #[default]
    FailFast,
    /// Failed prefixes are reported alongside the successful ones
    SkipFailed,
}

/// A prefix that could not be aggregated
#[derive(Debug)]
pub struct PrefixFailure {
    pub prefix: String,
    pub error: StatError,
}

/// Result of a pipeline run
#[derive(Debug, Default)]
pub struct PipelineOutcome {
    pub results: AggregateResult,
    /// Always empty under [`FailurePolicy::FailFast`]
    pub failures: Vec<PrefixFailure>,
}

/// Runs [`PrefixAggregator`] over many prefixes with bounded concurrency
pub struct Pipeline<S> {
    aggregator: PrefixAggregator<S>,
    max_concurrency: usize,
    policy: FailurePolicy,
    progress: Box<dyn ProgressReporter>,
}

impl<S: ReportSource> Pipeline<S> {
    pub fn new(aggregator: PrefixAggregator<S>) -> Self {
        Self {
            aggregator,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            policy: FailurePolicy::default(),
            progress: Box::new(NoopProgress),
        }
    }

    /// Set the number of fetches allowed in flight at once (at least one)
    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max.max(1);
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_progress(mut self, progress: Box<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    /// Aggregate every prefix, at most `max_concurrency` at a time.
    ///
    /// Labels are validated up front: a prefix without a label or two
    /// prefixes sharing one fail the run before anything is fetched.
    /// Results are ordered like `prefixes`, whatever order fetches complete in.
    pub async fn run(&self, prefixes: &[String]) -> Result<PipelineOutcome> {
        let labels = validate_labels(prefixes)?;

        debug!(
            prefixes = prefixes.len(),
            max_concurrency = self.max_concurrency,
            policy = ?self.policy,
            "starting pipeline"
        );

        let pb = self.progress.start("Aggregating", prefixes.len() as u64);
        let mut slots: Vec<Option<PrefixSummary>> = vec![None; prefixes.len()];
        let mut failures = Vec::new();

        let mut completions = stream::iter(prefixes.iter().enumerate())
            .map(|(idx, prefix)| async move { (idx, self.aggregator.aggregate(prefix).await) })
            .buffer_unordered(self.max_concurrency);

        while let Some((idx, result)) = completions.next().await {
            pb.inc(1);
            let prefix = &prefixes[idx];
            match result {
                Ok((_, summary)) => {
                    pb.set_message(prefix);
                    slots[idx] = Some(summary);
                }
                Err(error) => match self.policy {
                    FailurePolicy::FailFast => {
                        pb.finish();
                        return Err(error);
                    }
                    FailurePolicy::SkipFailed => {
                        warn!(prefix = %prefix, %error, "skipping failed prefix");
                        failures.push(PrefixFailure {
                            prefix: prefix.clone(),
                            error,
                        });
                    }
                },
            }
        }
        pb.finish();

        let results = labels
            .into_iter()
            .zip(slots)
            .filter_map(|(label, slot)| slot.map(|summary| (label, summary)))
            .collect();

        Ok(PipelineOutcome { results, failures })
    }
}

/// Derive every label and make sure no two prefixes share one
pub fn validate_labels(prefixes: &[String]) -> Result<Vec<&str>> {
    let mut seen: FxHashMap<&str, &str> = FxHashMap::default();
    let mut labels = Vec::with_capacity(prefixes.len());

    for prefix in prefixes {
        let label = label_of(prefix)?;
        if let Some(first) = seen.insert(label, prefix) {
            return Err(StatError::LabelCollision {
                label: label.to_string(),
                first: first.to_string(),
                second: prefix.clone(),
            });
        }
        labels.push(label);
    }
    Ok(labels)
}
