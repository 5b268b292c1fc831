use std::fmt;

use rustc_hash::FxHashMap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Aggregates for a single prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixSummary {
    pub count: u64,
    pub size: u64,
    /// Floor of `size / count`
    pub avg: u64,
    pub size_mb: String,
    pub avg_mb: String,
}

/// Grand totals over every prefix of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrandTotals {
    /// Sums are widened so that no combination of per-prefix `u64` values overflows
    pub total_count: u128,
    pub total_size: u128,
    pub total_size_mb: String,
}

/// Label -> summary mapping that remembers insertion order.
///
/// Serializes as a JSON object whose keys appear in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateResult {
    index: FxHashMap<String, usize>,
    entries: Vec<(String, PrefixSummary)>,
}

impl AggregateResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a summary, returning the previous one for this label.
    ///
    /// A replaced entry keeps its original position.
    pub fn insert(&mut self, label: impl Into<String>, summary: PrefixSummary) -> Option<PrefixSummary> {
        let label = label.into();
        if let Some(&pos) = self.index.get(&label) {
            return Some(std::mem::replace(&mut self.entries[pos].1, summary));
        }
        self.index.insert(label.clone(), self.entries.len());
        self.entries.push((label, summary));
        None
    }

    pub fn get(&self, label: &str) -> Option<&PrefixSummary> {
        self.index.get(label).map(|&pos| &self.entries[pos].1)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PrefixSummary)> {
        self.entries.iter().map(|(label, s)| (label.as_str(), s))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }
}

impl<L: Into<String>> FromIterator<(L, PrefixSummary)> for AggregateResult {
    fn from_iter<I: IntoIterator<Item = (L, PrefixSummary)>>(iter: I) -> Self {
        let mut result = AggregateResult::new();
        for (label, summary) in iter {
            result.insert(label, summary);
        }
        result
    }
}

impl Serialize for AggregateResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, summary) in &self.entries {
            map.serialize_entry(label, summary)?;
        }
        map.end()
    }
}

struct AggregateResultVisitor;

impl<'de> Visitor<'de> for AggregateResultVisitor {
    type Value = AggregateResult;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of label to prefix summary")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut result = AggregateResult::new();
        while let Some((label, summary)) = access.next_entry::<String, PrefixSummary>()? {
            result.insert(label, summary);
        }
        Ok(result)
    }
}

impl<'de> Deserialize<'de> for AggregateResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(AggregateResultVisitor)
    }
}
