//! End-to-end inventory run
//!
//! list prefixes -> back up the list -> aggregate -> totals -> artifacts

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

use crate::config::RunConfig;
use crate::model::{AggregateResult, GrandTotals};
use crate::pipeline::{reduce_totals, Pipeline, PrefixAggregator, PrefixFailure, ProgressReporter};
use crate::repository::{ArtifactStore, ReportSource};

/// What a completed run produced
#[derive(Debug)]
pub struct InventoryReport {
    pub prefixes: Vec<String>,
    pub results: AggregateResult,
    pub totals: GrandTotals,
    pub failures: Vec<PrefixFailure>,
    pub written: Vec<PathBuf>,
}

/// Run the whole inventory for `config.bucket` against `source`.
///
/// The prefix list is persisted before aggregation starts, so it stays on
/// disk even when the run later fails. Aggregates and totals are only
/// written after the pipeline succeeds.
pub async fn run_inventory<S: ReportSource>(
    source: &S,
    store: &ArtifactStore,
    config: &RunConfig,
    progress: Box<dyn ProgressReporter>,
) -> Result<InventoryReport> {
    let start = Instant::now();

    info!(bucket = %config.bucket, "listing prefixes");
    let prefixes = source
        .list_prefixes(&config.bucket)
        .await
        .context("Failed to list prefixes")?;
    info!(count = prefixes.len(), "prefixes listed");

    let mut written = vec![store.save_prefix_list(&prefixes).await?];

    let aggregator = PrefixAggregator::new(source, config.bucket.as_str())
        .with_fetch_timeout(config.fetch_timeout);
    let pipeline = Pipeline::new(aggregator)
        .with_max_concurrency(config.max_concurrency)
        .with_failure_policy(config.failure_policy)
        .with_progress(progress);

    let outcome = pipeline
        .run(&prefixes)
        .await
        .context("Failed to aggregate prefixes")?;
    for failure in &outcome.failures {
        warn!(prefix = %failure.prefix, error = %failure.error, "prefix omitted from results");
    }

    let totals = reduce_totals(&outcome.results);
    written.push(store.save_aggregates(&outcome.results).await?);
    written.push(store.save_totals(&totals).await?);

    info!(
        prefixes = outcome.results.len(),
        failed = outcome.failures.len(),
        total_count = %totals.total_count,
        total_size = %totals.total_size_mb,
        elapsed = ?start.elapsed(),
        "inventory complete"
    );

    Ok(InventoryReport {
        prefixes,
        results: outcome.results,
        totals,
        failures: outcome.failures,
        written,
    })
}
