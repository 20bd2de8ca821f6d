//! Execution results.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Measurement counts keyed by classical bitstring.
///
/// Bitstrings are written with the highest classical bit leftmost, so for a
/// two-bit register the key `"10"` means `c1 = 1, c0 = 0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of `bitstring`, accumulating with any
    /// existing entry.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Number of occurrences of `bitstring` (zero if never observed).
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of recorded shots.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct outcomes observed.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The most frequent outcome. Ties go to the lexicographically smallest bitstring.
    pub fn most_frequent(&self) -> Option<(&String, u64)> {
        self.sorted().into_iter().next()
    }

    /// Outcomes ordered by count descending, then bitstring ascending.
    pub fn sorted(&self) -> Vec<(&String, u64)> {
        let mut entries: Vec<_> = self.counts.iter().map(|(k, v)| (k, *v)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Iterate over `(bitstring, count)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.counts.iter()
    }

    /// Fraction of shots that produced `bitstring`, or 0.0 with no shots.
    #[allow(clippy::cast_precision_loss)]
    pub fn probability(&self, bitstring: &str) -> f64 {
        let total = self.total_shots();
        if total == 0 {
            return 0.0;
        }
        self.get(bitstring) as f64 / total as f64
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for (bitstring, n) in iter {
            counts.insert(bitstring, n);
        }
        counts
    }
}

/// Result of executing a circuit on a backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measurement counts.
    pub counts: Counts,
    /// Number of shots executed.
    pub shots: u32,
    /// Wall-clock execution time in milliseconds.
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
        counts.insert("11", 3);
        counts.insert("11", 2);
        counts.insert("01", 1);

        assert_eq!(counts.get("11"), 5);
        assert_eq!(counts.get("00"), 0);
        assert_eq!(counts.total_shots(), 6);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_counts_sorted_and_most_frequent() {
        let counts: Counts = [("00", 10), ("10", 40), ("01", 40), ("11", 10)]
            .into_iter()
            .collect();

        let sorted = counts.sorted();
        assert_eq!(sorted[0], (&"01".to_string(), 40));
        assert_eq!(sorted[1], (&"10".to_string(), 40));
        assert_eq!(counts.most_frequent().map(|(k, _)| k.as_str()), Some("01"));
    }

    #[test]
    fn test_counts_probability() {
        let counts: Counts = [("00", 1), ("11", 3)].into_iter().collect();
        assert!((counts.probability("11") - 0.75).abs() < 1e-12);
        assert_eq!(Counts::new().probability("00"), 0.0);
    }

    #[test]
    fn test_execution_result() {
        let result = ExecutionResult::new(Counts::new(), 100).with_execution_time(7);
        assert_eq!(result.shots, 100);
        assert_eq!(result.execution_time_ms, Some(7));
    }
}
