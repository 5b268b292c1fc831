// Shared benchmark helpers
// Functions here are used across different benchmark files
#![allow(dead_code)]

use bucketstat::repository::ReportSource;
use bucketstat::Result;
use std::collections::HashMap;

/// Generate a report listing `num_objects` objects
pub fn generate_report(num_objects: usize) -> String {
    let mut text = String::with_capacity(num_objects * 48);
    let mut total = 0u64;
    for i in 0..num_objects {
        let size = (i as u64 * 7919) % 5_000_000;
        total += size;
        text.push_str(&format!(
            "2023-01-15 {:02}:{:02}:{:02} {:>10} data/part-{:06}.parquet\n",
            i % 24,
            i % 60,
            (i / 60) % 60,
            size,
            i
        ));
    }
    text.push_str(&format!("\nTotal Objects: {}\n   Total Size: {}\n", num_objects, total));
    text
}

/// In-memory source returning pre-generated reports without delay
pub struct StaticSource {
    reports: HashMap<String, String>,
}

impl StaticSource {
    pub fn new(num_prefixes: usize, objects_per_prefix: usize) -> (Self, Vec<String>) {
        let report = generate_report(objects_per_prefix);
        let prefixes: Vec<String> = (0..num_prefixes)
            .map(|i| format!("logs/{:04}{:02}{:02}/", 2000 + i / 336, 1 + (i / 28) % 12, 1 + i % 28))
            .collect();
        let reports = prefixes.iter().map(|p| (p.clone(), report.clone())).collect();
        (Self { reports }, prefixes)
    }
}

impl ReportSource for StaticSource {
    async fn list_prefixes(&self, _bucket: &str) -> Result<Vec<String>> {
        Ok(self.reports.keys().cloned().collect())
    }

    async fn fetch_report(&self, _bucket: &str, prefix: &str) -> Result<String> {
        Ok(self.reports.get(prefix).cloned().unwrap_or_default())
    }
}
