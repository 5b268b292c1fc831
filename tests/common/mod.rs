// Shared test fixtures for integration tests
// Functions here are used across different test files
#![allow(dead_code)]

use bucketstat::repository::ReportSource;
use bucketstat::{Result, StatError};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Canned response for one prefix
#[derive(Clone)]
pub enum Reply {
    Report(String),
    Fail(String),
}

/// In-memory report source that records how many fetches overlap
pub struct MockSource {
    prefixes: Vec<String>,
    replies: HashMap<String, (Reply, Duration)>,
    default_delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    calls: AtomicUsize,
    fetched: Mutex<Vec<String>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self {
            prefixes: Vec::new(),
            replies: HashMap::new(),
            default_delay: Duration::ZERO,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
            fetched: Mutex::new(Vec::new()),
        }
    }

    /// Every fetch without an explicit delay sleeps this long
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.default_delay = delay;
        self
    }

    pub fn with_report(self, prefix: &str, report: impl Into<String>) -> Self {
        let delay = self.default_delay;
        self.with_reply(prefix, Reply::Report(report.into()), delay)
    }

    pub fn with_failure(self, prefix: &str, reason: &str) -> Self {
        let delay = self.default_delay;
        self.with_reply(prefix, Reply::Fail(reason.to_string()), delay)
    }

    pub fn with_reply(mut self, prefix: &str, reply: Reply, delay: Duration) -> Self {
        self.prefixes.push(prefix.to_string());
        self.replies.insert(prefix.to_string(), (reply, delay));
        self
    }

    pub fn prefixes(&self) -> Vec<String> {
        self.prefixes.clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

impl ReportSource for MockSource {
    async fn list_prefixes(&self, _bucket: &str) -> Result<Vec<String>> {
        Ok(self.prefixes.clone())
    }

    async fn fetch_report(&self, _bucket: &str, prefix: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.fetched.lock().unwrap().push(prefix.to_string());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let (reply, delay) = self
            .replies
            .get(prefix)
            .cloned()
            .unwrap_or_else(|| (Reply::Fail(format!("unknown prefix {}", prefix)), Duration::ZERO));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        match reply {
            Reply::Report(text) => Ok(text),
            Reply::Fail(reason) => Err(StatError::Transport {
                command: format!("mock fetch {}", prefix),
                reason,
            }),
        }
    }
}

/// Build a well-formed report from object sizes
pub fn report(sizes: &[u64]) -> String {
    let mut text = String::new();
    for (i, size) in sizes.iter().enumerate() {
        text.push_str(&format!("2023-01-15 10:{:02}:00 {:>10} object_{}.bin\n", i % 60, size, i));
    }
    text.push_str(&format!("\nTotal Objects: {}\n", sizes.len()));
    text.push_str(&format!("   Total Size: {}\n", sizes.iter().sum::<u64>()));
    text
}

/// Date-shaped prefixes `logs/YYYYMMDD/` for `n` consecutive January/February days
pub fn date_prefixes(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| format!("logs/2023{:02}{:02}/", 1 + i / 28, 1 + i % 28))
        .collect()
}
