//! Execution results and measurement counts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Measurement counts keyed by bitstring outcome.
///
/// Insertion accumulates, so per-shot recording and bulk recording both
/// work through the same call. A `BTreeMap` keeps outcomes in bitstring
/// order for stable display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts(BTreeMap<String, u64>);

impl Counts {
    /// Create an empty counts map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.0.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Get the count for a bitstring (0 if absent).
    pub fn get(&self, bitstring: &str) -> u64 {
        self.0.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of recorded shots.
    pub fn total_shots(&self) -> u64 {
        self.0.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn num_outcomes(&self) -> usize {
        self.0.len()
    }

    /// Check if no outcomes were recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over (bitstring, count) pairs in bitstring order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.0.iter()
    }

    /// Outcomes sorted by descending count.
    pub fn sorted(&self) -> Vec<(&String, &u64)> {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// The most frequent outcome, if any.
    pub fn most_frequent(&self) -> Option<(&String, u64)> {
        self.sorted().first().map(|(s, c)| (*s, **c))
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for (bitstring, count) in iter {
            counts.insert(bitstring, count);
        }
        counts
    }
}

/// The result of executing a circuit on a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measurement counts by outcome bitstring.
    pub counts: Counts,
    /// Number of shots executed.
    pub shots: u32,
    /// Wall-clock execution time in milliseconds, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl ExecutionResult {
    /// Create a new execution result.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            execution_time_ms: None,
        }
    }

    /// Attach the execution time.
    #[must_use]
    pub fn with_execution_time(mut self, ms: u64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_accumulate() {
        let mut counts = Counts::new();
        counts.insert("0", 1);
        counts.insert("0", 1);
        counts.insert("1", 3);

        assert_eq!(counts.get("0"), 2);
        assert_eq!(counts.get("1"), 3);
        assert_eq!(counts.get("10"), 0);
        assert_eq!(counts.total_shots(), 5);
        assert_eq!(counts.num_outcomes(), 2);
    }

    #[test]
    fn test_counts_sorted_and_most_frequent() {
        let counts: Counts = [("00".to_string(), 400), ("11".to_string(), 600)]
            .into_iter()
            .collect();

        let sorted = counts.sorted();
        assert_eq!(sorted[0].0, "11");
        assert_eq!(counts.most_frequent(), Some((&"11".to_string(), 600)));
    }

    #[test]
    fn test_execution_result() {
        let mut counts = Counts::new();
        counts.insert("0", 1000);
        let result = ExecutionResult::new(counts, 1000).with_execution_time(12);

        assert_eq!(result.shots, 1000);
        assert_eq!(result.counts.total_shots(), 1000);
        assert_eq!(result.execution_time_ms, Some(12));
    }
}
