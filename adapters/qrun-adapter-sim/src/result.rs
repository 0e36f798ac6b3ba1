//! Measurement counts and run results.
//!
//! Bitstring ordering: the rightmost bit corresponds to qubit 0. The string
//! `"01"` means qubit 0 measured `1` and qubit 1 measured `0`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Outcome-frequency table.
///
/// Maps fixed-width bitstrings to occurrence counts. Absent outcomes have
/// count zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create counts from (bitstring, count) pairs, summing duplicates.
    pub fn from_pairs(iter: impl IntoIterator<Item = (impl Into<String>, u64)>) -> Self {
        let mut counts = Self::new();
        for (k, v) in iter {
            counts.insert(k, v);
        }
        counts
    }

    /// Add `count` occurrences of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_default() += count;
    }

    /// Fold another table into this one.
    pub fn merge(&mut self, other: Counts) {
        for (k, v) in other.counts {
            self.insert(k, v);
        }
    }

    /// Get the count for a bitstring.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Iterate over (bitstring, count) pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.counts.iter()
    }

    /// Sum of all counts.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// The most frequent bitstring. Ties resolve to the lexicographically
    /// smallest outcome.
    pub fn most_frequent(&self) -> Option<(&String, &u64)> {
        self.counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
    }

    /// Relative frequency of each observed bitstring.
    #[allow(clippy::cast_precision_loss)]
    pub fn probabilities(&self) -> FxHashMap<String, f64> {
        let total = self.total_shots() as f64;
        if total == 0.0 {
            return FxHashMap::default();
        }
        self.counts
            .iter()
            .map(|(k, &v)| (k.clone(), v as f64 / total))
            .collect()
    }

    /// Counts sorted by count descending, then by bitstring.
    pub fn sorted(&self) -> Vec<(&String, &u64)> {
        let mut items: Vec<_> = self.counts.iter().collect();
        items.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        items
    }

    /// Number of distinct observed bitstrings.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no outcome was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

/// Result of running a circuit.
///
/// `counts.total_shots() == shots as u64` always holds for results produced
/// by the runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Name of the circuit that was run.
    pub circuit: String,
    /// Width of every bitstring in `counts`.
    pub num_qubits: usize,
    /// Number of shots executed.
    pub shots: u32,
    /// Measurement counts.
    pub counts: Counts,
    /// Base seed of the random source.
    ///
    /// [`CircuitRunner::run`](crate::CircuitRunner::run) always records the
    /// seed it used, including one drawn from entropy; results from
    /// `run_with_rng` carry `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Execution time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl RunResult {
    /// Create a new run result.
    pub fn new(circuit: impl Into<String>, num_qubits: usize, shots: u32, counts: Counts) -> Self {
        Self {
            circuit: circuit.into(),
            num_qubits,
            shots,
            counts,
            seed: None,
            execution_time_ms: None,
        }
    }

    /// Record the seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Set the execution time.
    pub fn with_execution_time(mut self, time_ms: u64) -> Self {
        self.execution_time_ms = Some(time_ms);
        self
    }

    /// Relative frequency of each observed bitstring.
    pub fn probabilities(&self) -> FxHashMap<String, f64> {
        self.counts.probabilities()
    }

    /// Count of outcomes where `qubit` measured 1.
    pub fn marginal_ones(&self, qubit: usize) -> u64 {
        if qubit >= self.num_qubits {
            return 0;
        }
        let pos = self.num_qubits - 1 - qubit;
        self.counts
            .iter()
            .filter(|(bits, _)| bits.as_bytes().get(pos) == Some(&b'1'))
            .map(|(_, &c)| c)
            .sum()
    }

    /// The most frequent outcome and its relative frequency.
    #[allow(clippy::cast_precision_loss)]
    pub fn most_frequent(&self) -> Option<(&String, f64)> {
        let total = self.counts.total_shots() as f64;
        if total == 0.0 {
            return None;
        }
        self.counts
            .most_frequent()
            .map(|(s, &c)| (s, c as f64 / total))
    }
}
