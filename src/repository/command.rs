//! External-command implementation of [`ReportSource`]
//!
//! Prefixes come from `<list_command> <bucket>`, which prints a JSON array
//! of strings. Reports come from `<report_command> <bucket> <prefix>`.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::error::{Result, StatError};

use super::source::ReportSource;

/// Runs one script to list prefixes and another to summarize each prefix
#[derive(Debug, Clone)]
pub struct CommandSource {
    list_command: PathBuf,
    report_command: PathBuf,
}

impl CommandSource {
    pub fn new(list_command: impl Into<PathBuf>, report_command: impl Into<PathBuf>) -> Self {
        Self {
            list_command: list_command.into(),
            report_command: report_command.into(),
        }
    }

    /// Run a command to completion and return its stdout.
    ///
    /// Fails on spawn errors, non-zero exit, or anything written to stderr.
    /// The child is killed if the returned future is dropped early.
    async fn run(&self, program: &Path, args: &[&str]) -> Result<String> {
        let display = format!("{} {}", program.display(), args.join(" "));

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| StatError::transport(&display, format!("failed to spawn: {}", e)))?;

        let command = &display;
        debug!(%command, code = ?output.status.code(), "child process exited");

        if !output.stderr.is_empty() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(StatError::transport(&display, format!("stderr: {}", stderr.trim())));
        }
        if !output.status.success() {
            let reason = match output.status.code() {
                Some(code) => format!("exited with code {}", code),
                None => "terminated by signal".to_string(),
            };
            return Err(StatError::transport(&display, reason));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| StatError::transport(&display, format!("stdout is not UTF-8: {}", e)))
    }
}

impl ReportSource for CommandSource {
    async fn list_prefixes(&self, bucket: &str) -> Result<Vec<String>> {
        let stdout = self.run(&self.list_command, &[bucket]).await?;
        parse_prefix_list(&stdout)
    }

    async fn fetch_report(&self, bucket: &str, prefix: &str) -> Result<String> {
        self.run(&self.report_command, &[bucket, prefix]).await
    }
}

/// Decode a JSON array of prefixes that may be broken across lines
pub fn parse_prefix_list(output: &str) -> Result<Vec<String>> {
    let joined: String = output.chars().filter(|c| *c != '\n' && *c != '\r').collect();
    serde_json::from_str(&joined).map_err(|source| StatError::Decode {
        what: "prefix list".to_string(),
        source,
    })
}
