//! Born-rule outcome sampling.

use rand::Rng;

use crate::statevector::Statevector;

/// Draws basis outcomes from a fixed probability distribution.
///
/// Built once per run from the evolved statevector; every draw is a binary
/// search over the cumulative distribution.
#[derive(Debug, Clone)]
pub struct OutcomeSampler {
    cumulative: Vec<f64>,
    /// Highest outcome with non-zero probability, used when rounding pushes a
    /// draw past the end of the distribution.
    last_support: usize,
}

impl OutcomeSampler {
    /// Build a sampler over the outcome probabilities of `sv`.
    pub fn from_statevector(sv: &Statevector) -> Self {
        Self::from_probabilities(&sv.probabilities())
    }

    /// Build a sampler from per-outcome probabilities.
    ///
    /// The weights need not sum exactly to one; draws are scaled to the total.
    pub fn from_probabilities(probabilities: &[f64]) -> Self {
        let mut cumulative = Vec::with_capacity(probabilities.len());
        let mut acc = 0.0;
        let mut last_support = 0;
        for (i, &p) in probabilities.iter().enumerate() {
            acc += p;
            cumulative.push(acc);
            if p > 0.0 {
                last_support = i;
            }
        }
        Self {
            cumulative,
            last_support,
        }
    }

    /// Number of distinct outcomes.
    pub fn num_outcomes(&self) -> usize {
        self.cumulative.len()
    }

    /// Draw one outcome index.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let total = self.cumulative.last().copied().unwrap_or(0.0);
        let r = rng.r#gen::<f64>() * total;
        let idx = self.cumulative.partition_point(|&c| c <= r);
        idx.min(self.last_support)
    }
}
