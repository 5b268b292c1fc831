use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::model::{AggregateResult, GrandTotals};

pub const PREFIX_LIST_FILE: &str = "FULL.json";
pub const AGGREGATES_FILE: &str = "OUTPUT.json";
pub const TOTALS_FILE: &str = "TOTAL.json";

/// Writes run artifacts as JSON files into one output directory
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub async fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Could not create output directory: {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn path_of(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    /// Back up the raw prefix list before any aggregation happens
    pub async fn save_prefix_list(&self, prefixes: &[String]) -> Result<PathBuf> {
        self.write_json(PREFIX_LIST_FILE, prefixes).await
    }

    pub async fn save_aggregates(&self, result: &AggregateResult) -> Result<PathBuf> {
        self.write_json(AGGREGATES_FILE, result).await
    }

    pub async fn save_totals(&self, totals: &GrandTotals) -> Result<PathBuf> {
        self.write_json(TOTALS_FILE, totals).await
    }

    pub async fn load_aggregates(&self) -> Result<AggregateResult> {
        load_aggregates_from(&self.path_of(AGGREGATES_FILE)).await
    }

    async fn write_json<T: Serialize + ?Sized>(&self, file_name: &str, value: &T) -> Result<PathBuf> {
        let path = self.path_of(file_name);
        let json = serde_json::to_vec(value)
            .with_context(|| format!("Failed to serialize {}", file_name))?;
        tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

/// Read an aggregates file (as written by [`ArtifactStore::save_aggregates`])
pub async fn load_aggregates_from(path: &Path) -> Result<AggregateResult> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("Invalid aggregates file: {}", path.display()))
}
