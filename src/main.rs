mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use bucketstat::export::render_csv;
use bucketstat::inventory::run_inventory;
use bucketstat::pipeline::reporter;
use bucketstat::repository::{load_aggregates_from, ArtifactStore, CommandSource};
use cli::{Cli, Command, CsvArgs, RunArgs};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Run(args) => run(args).await,
        Command::Csv(args) => export_csv(args).await,
    }
}

/// Log to stderr, honoring RUST_LOG before the -v count
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .init();
}

async fn run(args: RunArgs) -> Result<()> {
    let config = args.into_config();
    debug!(?config, "resolved configuration");

    let store = ArtifactStore::new(&config.output_dir).await?;
    let source = CommandSource::new(&config.list_command, &config.report_command);

    let report = run_inventory(&source, &store, &config, reporter(config.quiet)).await?;

    for path in &report.written {
        info!(path = %path.display(), "artifact written");
    }
    if !report.failures.is_empty() {
        eprintln!("{} prefix(es) failed and were skipped", report.failures.len());
    }
    eprintln!(
        "Total objects: {}, Total size: {} ({} bytes)",
        report.totals.total_count, report.totals.total_size_mb, report.totals.total_size
    );
    Ok(())
}

async fn export_csv(args: CsvArgs) -> Result<()> {
    let result = load_aggregates_from(&args.input).await?;
    let csv = render_csv(&result, args.column)?;

    let output = args.output_path();
    tokio::fs::write(&output, csv)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(path = %output.display(), rows = result.len(), "CSV written");
    Ok(())
}
