//! Simulator backend trait.
//!
//! The [`QuantumSimulator`] trait is the interface every Alsvid simulation
//! backend implements. It is deliberately synchronous: a simulation call
//! runs to completion before returning, builds fresh state per invocation,
//! and shares nothing across calls.
//!
//! ## Measurement modes
//!
//! A backend is either sampling (a stored or per-call sample count) or
//! exact. The two are mutually exclusive: requesting exact expectation
//! values from a backend configured with a stored sample count is a
//! configuration error, as is sampling with no count specified anywhere.

use alsvid_ir::Circuit;

use crate::error::HalResult;
use crate::measurement::{ExpectationValues, Measurements};
use crate::observable::PauliSum;
use crate::wavefunction::Wavefunction;

/// A backend that simulates circuits and exposes measurement results.
pub trait QuantumSimulator {
    /// The stored default sample count, if any.
    fn n_samples(&self) -> Option<usize>;

    /// Run a circuit and draw basis-state samples from the final state.
    ///
    /// `n_samples` overrides the stored default; with neither present the
    /// call fails with a configuration error.
    fn run_circuit_and_measure(
        &mut self,
        circuit: &Circuit,
        n_samples: Option<usize>,
    ) -> HalResult<Measurements>;

    /// Run a circuit and return the final wavefunction.
    ///
    /// `initial_state` replaces the default `|0...0>` starting state.
    fn get_wavefunction(
        &mut self,
        circuit: &Circuit,
        initial_state: Option<&Wavefunction>,
    ) -> HalResult<Wavefunction>;

    /// Exact per-term expectation values of `observable` against the state
    /// a circuit prepares.
    fn get_exact_expectation_values(
        &mut self,
        circuit: &Circuit,
        observable: &PauliSum,
    ) -> HalResult<ExpectationValues>;
}
