use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use bucketstat::config::{RunConfig, DEFAULT_LIST_COMMAND, DEFAULT_OUTPUT_DIR, DEFAULT_REPORT_COMMAND};
use bucketstat::export::CsvColumn;
use bucketstat::pipeline::{FailurePolicy, DEFAULT_MAX_CONCURRENCY};

#[derive(Parser, Debug)]
#[command(name = "bucketstat", about = "Aggregate object-storage inventory statistics per prefix")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List prefixes, aggregate every prefix report and write JSON artifacts
    Run(RunArgs),
    /// Convert an aggregates file into a `date,<column>` CSV
    Csv(CsvArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Bucket passed to both external commands
    #[arg(long, env = "BUCKET_NAME")]
    pub bucket: String,

    /// Command printing the bucket's prefixes as a JSON array
    #[arg(long, default_value = DEFAULT_LIST_COMMAND)]
    pub list_command: PathBuf,

    /// Command printing the report of one prefix
    #[arg(long, default_value = DEFAULT_REPORT_COMMAND)]
    pub report_command: PathBuf,

    /// Directory receiving FULL.json, OUTPUT.json and TOTAL.json
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Maximum number of reports fetched concurrently
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub concurrency: usize,

    /// Per-prefix fetch timeout in seconds
    #[arg(long)]
    pub fetch_timeout: Option<u64>,

    /// Keep going when a prefix fails instead of aborting the run
    #[arg(long)]
    pub skip_failed: bool,

    /// Hide the progress bar
    #[arg(short, long)]
    pub quiet: bool,
}

impl RunArgs {
    pub fn into_config(self) -> RunConfig {
        RunConfig {
            bucket: self.bucket,
            list_command: self.list_command,
            report_command: self.report_command,
            output_dir: self.output_dir,
            max_concurrency: self.concurrency,
            fetch_timeout: self.fetch_timeout.map(Duration::from_secs),
            failure_policy: if self.skip_failed {
                FailurePolicy::SkipFailed
            } else {
                FailurePolicy::FailFast
            },
            quiet: self.quiet,
        }
    }
}

#[derive(Args, Debug)]
pub struct CsvArgs {
    /// Aggregates file written by `run`
    #[arg(long, default_value = "output/OUTPUT.json")]
    pub input: PathBuf,

    /// Aggregate to export next to the date
    #[arg(long, value_enum, default_value_t = CsvColumn::Size)]
    pub column: CsvColumn,

    /// Destination CSV file (defaults to `<column>Var.csv`)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl CsvArgs {
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}Var.csv", self.column.header())))
    }
}
