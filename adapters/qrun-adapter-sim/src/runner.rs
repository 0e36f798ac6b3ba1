//! Circuit runner: build, run, summarize.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, instrument};

use qrun_ir::{Circuit, GateOp};

use crate::error::{SimError, SimResult};
use crate::result::{Counts, RunResult};
use crate::sampler::OutcomeSampler;
use crate::statevector::Statevector;

/// Default register limit: 2^24 amplitudes, about 256 MB.
pub const DEFAULT_MAX_QUBITS: u32 = 24;

/// Ceiling on any configured limit: 2^28 amplitudes, about 4 GB.
pub const HARD_MAX_QUBITS: u32 = 28;

/// Default number of shots handled by one parallel worker.
pub const DEFAULT_CHUNK_SIZE: u32 = 4096;

/// Runner configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Base seed. `None` draws a fresh seed from entropy on every run.
    pub seed: Option<u64>,
    /// Widest circuit the runner accepts, capped at [`HARD_MAX_QUBITS`].
    pub max_qubits: u32,
    /// Sample shots on the rayon thread pool.
    pub parallel: bool,
    /// Shots per parallel chunk. Chunk `i` uses seed `base + i`.
    pub chunk_size: u32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_qubits: DEFAULT_MAX_QUBITS,
            parallel: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Builds circuits and samples their measurement outcomes.
///
/// The runner holds only configuration; each [`CircuitRunner::run`] is
/// independent of every other. With a seed configured, runs are reproducible:
/// the same circuit, shot count and configuration always give the same counts.
#[derive(Debug, Clone, Default)]
pub struct CircuitRunner {
    config: RunnerConfig,
}

impl CircuitRunner {
    /// Create a runner with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner from a configuration.
    pub fn with_config(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Fix the base seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set the register limit. Values above [`HARD_MAX_QUBITS`] act as the ceiling.
    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.config.max_qubits = max_qubits;
        self
    }

    /// Enable or disable parallel sampling.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Set the parallel chunk size. Zero is treated as one.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: u32) -> Self {
        self.config.chunk_size = chunk_size;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// The register limit actually enforced.
    pub fn max_qubits(&self) -> u32 {
        self.config.max_qubits.min(HARD_MAX_QUBITS)
    }

    /// Build a validated circuit.
    pub fn build(
        &self,
        num_qubits: u32,
        ops: impl IntoIterator<Item = GateOp>,
    ) -> SimResult<Circuit> {
        Ok(Circuit::build(num_qubits, ops)?)
    }

    /// Run `circuit` for `shots` trials.
    ///
    /// Fails with [`SimError::InvalidShots`] for zero shots and with
    /// [`SimError::CircuitTooLarge`] when the circuit exceeds [`Self::max_qubits`].
    /// The returned counts always sum to `shots`.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name(), qubits = circuit.num_qubits()))]
    pub fn run(&self, circuit: &Circuit, shots: u32) -> SimResult<RunResult> {
        self.check(circuit, shots)?;
        let start = Instant::now();

        let seed = self.config.seed.unwrap_or_else(|| rand::thread_rng().r#gen());
        let sv = Statevector::from_circuit(circuit);
        let sampler = OutcomeSampler::from_statevector(&sv);
        debug!("Sampling over {} outcomes with seed {}", sampler.num_outcomes(), seed);

        let tally = if self.config.parallel {
            self.tally_parallel(&sampler, shots, seed)
        } else {
            let mut rng = StdRng::seed_from_u64(seed);
            tally(&sampler, shots, &mut rng)
        };

        let result = RunResult::new(circuit.name(), sv.num_qubits(), shots, to_counts(&sv, tally))
            .with_seed(Some(seed))
            .with_execution_time(elapsed_ms(start));
        debug!(
            "Run completed: {} distinct outcomes in {:?}",
            result.counts.len(),
            start.elapsed()
        );
        Ok(result)
    }

    /// Run `circuit` drawing from a caller-supplied random source.
    ///
    /// Ignores the configured seed and parallelism; the result records no seed.
    #[instrument(skip(self, circuit, rng), fields(circuit = circuit.name()))]
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        circuit: &Circuit,
        shots: u32,
        rng: &mut R,
    ) -> SimResult<RunResult> {
        self.check(circuit, shots)?;
        let start = Instant::now();

        let sv = Statevector::from_circuit(circuit);
        let sampler = OutcomeSampler::from_statevector(&sv);
        let tally = tally(&sampler, shots, rng);

        Ok(
            RunResult::new(circuit.name(), sv.num_qubits(), shots, to_counts(&sv, tally))
                .with_execution_time(elapsed_ms(start)),
        )
    }

    fn check(&self, circuit: &Circuit, shots: u32) -> SimResult<()> {
        if shots == 0 {
            return Err(SimError::InvalidShots(shots));
        }
        let max_qubits = self.max_qubits();
        if circuit.num_qubits() > max_qubits as usize {
            return Err(SimError::CircuitTooLarge {
                num_qubits: circuit.num_qubits(),
                max_qubits,
            });
        }
        debug!(
            "Starting simulation: {} qubits, {} ops, {} shots",
            circuit.num_qubits(),
            circuit.num_ops(),
            shots
        );
        Ok(())
    }

    fn tally_parallel(
        &self,
        sampler: &OutcomeSampler,
        shots: u32,
        seed: u64,
    ) -> FxHashMap<usize, u64> {
        let chunk = self.config.chunk_size.max(1);
        let num_chunks = shots.div_ceil(chunk);
        debug!("Sampling {} shots in {} chunks of {}", shots, num_chunks, chunk);

        (0..num_chunks)
            .into_par_iter()
            .map(|i| {
                let n = chunk.min(shots - i * chunk);
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(u64::from(i)));
                tally(sampler, n, &mut rng)
            })
            .reduce(FxHashMap::default, |mut acc, part| {
                for (k, v) in part {
                    *acc.entry(k).or_default() += v;
                }
                acc
            })
    }
}

/// Run `circuit` with default limits, drawing from `rng`.
pub fn run_with_rng<R: Rng + ?Sized>(
    circuit: &Circuit,
    shots: u32,
    rng: &mut R,
) -> SimResult<RunResult> {
    CircuitRunner::new().run_with_rng(circuit, shots, rng)
}

fn tally<R: Rng + ?Sized>(
    sampler: &OutcomeSampler,
    shots: u32,
    rng: &mut R,
) -> FxHashMap<usize, u64> {
    let mut tally = FxHashMap::default();
    for _ in 0..shots {
        *tally.entry(sampler.sample(rng)).or_default() += 1;
    }
    tally
}

fn to_counts(sv: &Statevector, tally: FxHashMap<usize, u64>) -> Counts {
    tally
        .into_iter()
        .map(|(outcome, n)| (sv.outcome_to_bitstring(outcome), n))
        .collect()
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
