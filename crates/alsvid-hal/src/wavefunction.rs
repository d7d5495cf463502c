//! Caller-visible wavefunction representation.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{HalError, HalResult};

/// A complex amplitude vector over all `2^n` basis states of an `n`-qubit
/// register.
///
/// Amplitude ordering is big-endian: qubit 0 is the most significant bit of
/// the basis index, so for two qubits the order is `|00>, |01>, |10>, |11>`
/// with the first position of each ket belonging to qubit 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wavefunction {
    amplitudes: Vec<Complex64>,
}

impl Wavefunction {
    /// Wrap an amplitude vector; the length must be `2^n` for some `n >= 1`.
    pub fn new(amplitudes: Vec<Complex64>) -> HalResult<Self> {
        let len = amplitudes.len();
        if len < 2 || !len.is_power_of_two() {
            return Err(HalError::InvalidWavefunction(format!(
                "amplitude vector length {len} is not a power of two >= 2"
            )));
        }
        Ok(Self { amplitudes })
    }

    /// Number of qubits.
    pub fn n_qubits(&self) -> usize {
        self.amplitudes.len().trailing_zeros() as usize
    }

    /// The raw amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Measurement probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_power_of_two_lengths() {
        assert!(Wavefunction::new(vec![Complex64::new(1.0, 0.0); 3]).is_err());
        assert!(Wavefunction::new(vec![]).is_err());
        assert!(Wavefunction::new(vec![Complex64::new(1.0, 0.0); 4]).is_ok());
    }

    #[test]
    fn n_qubits_from_length() {
        let wf = Wavefunction::new(vec![Complex64::new(0.5, 0.0); 8]).unwrap();
        assert_eq!(wf.n_qubits(), 3);
    }
}
