//! Measurement results and wavefunction sampling.

use rand::Rng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::wavefunction::Wavefunction;

/// A collection of sampled computational-basis bitstrings.
///
/// Each bitstring holds one 0/1 entry per qubit, qubit 0 first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurements {
    bitstrings: Vec<Vec<u8>>,
}

impl Measurements {
    /// Wrap sampled bitstrings.
    pub fn new(bitstrings: Vec<Vec<u8>>) -> Self {
        Self { bitstrings }
    }

    /// The sampled bitstrings, in draw order.
    pub fn bitstrings(&self) -> &[Vec<u8>] {
        &self.bitstrings
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.bitstrings.len()
    }

    /// True when no samples were drawn.
    pub fn is_empty(&self) -> bool {
        self.bitstrings.is_empty()
    }

    /// Histogram of outcomes keyed by bitstring rendered qubit-0-first,
    /// e.g. `"10"` for qubit 0 measured 1 and qubit 1 measured 0.
    pub fn get_counts(&self) -> FxHashMap<String, usize> {
        let mut counts = FxHashMap::default();
        for bits in &self.bitstrings {
            let key: String = bits.iter().map(|b| if *b == 0 { '0' } else { '1' }).collect();
            *counts.entry(key).or_insert(0) += 1;
        }
        counts
    }

    /// The most frequently sampled bitstring, or `None` when empty.
    pub fn most_frequent(&self) -> Option<String> {
        self.get_counts()
            .into_iter()
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
            .map(|(bits, _)| bits)
    }
}

/// Exact per-term expectation values of an observable.
///
/// Values are kept in term order and not pre-summed, so callers can
/// recombine them with arbitrary weighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectationValues {
    values: Vec<f64>,
}

impl ExpectationValues {
    /// Wrap per-term values.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Per-term values, in observable term order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Aggregated expectation value.
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// Draw computational-basis samples from a wavefunction's probability
/// distribution.
///
/// Each sample is a bitstring with one entry per qubit, qubit 0 first
/// (matching the wavefunction's big-endian amplitude ordering).
pub fn sample_from_wavefunction(
    wavefunction: &Wavefunction,
    n_samples: usize,
    rng: &mut impl Rng,
) -> Vec<Vec<u8>> {
    let probabilities = wavefunction.probabilities();
    let n_qubits = wavefunction.n_qubits();
    let mut samples = Vec::with_capacity(n_samples);
    for _ in 0..n_samples {
        let r: f64 = rng.r#gen();
        let mut cumulative = 0.0;
        let mut outcome = probabilities.len() - 1;
        for (index, p) in probabilities.iter().enumerate() {
            cumulative += p;
            if r < cumulative {
                outcome = index;
                break;
            }
        }
        let bits = (0..n_qubits)
            .map(|q| ((outcome >> (n_qubits - 1 - q)) & 1) as u8)
            .collect();
        samples.push(bits);
    }
    samples
}
