//! Backend implementation over the native statevector engine.
//!
//! The adapter reconciles two conventions at its boundary. The caller-side
//! amplitude ordering is big-endian (qubit 0 is the most significant bit of
//! a basis index); the engine indexes little-endian. [`flip_amplitudes`]
//! bit-reverses basis indices to map between the two, and is applied when
//! loading an initial state, when reading the wavefunction back out, and
//! around raw amplitude transforms. Qubit labels themselves agree on both
//! sides, so gate targets and observable indices pass through untouched.

use num_complex::Complex64;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use alsvid_hal::{
    ExpectationValues, HalError, HalResult, Measurements, PauliSum, QuantumSimulator,
    Wavefunction, sample_from_wavefunction,
};
use alsvid_ir::{Circuit, Operation};
use alsvid_sv::{NativeCircuit, NativeState, Observable, SvError};

use crate::translation::{ConversionError, convert_operation};

/// Bit-reverse the basis index of every amplitude, converting between the
/// caller's big-endian ordering and the engine's little-endian ordering.
/// Involutive: flipping twice restores the input.
pub(crate) fn flip_amplitudes(amplitudes: &[Complex64]) -> Vec<Complex64> {
    let n_qubits = amplitudes.len().trailing_zeros() as usize;
    if n_qubits == 0 {
        return amplitudes.to_vec();
    }
    let mut flipped = vec![Complex64::new(0.0, 0.0); amplitudes.len()];
    for (index, amp) in amplitudes.iter().enumerate() {
        let reversed = index.reverse_bits() >> (usize::BITS as usize - n_qubits);
        flipped[reversed] = *amp;
    }
    flipped
}

/// Split operations into maximal contiguous runs sharing the same
/// natively-executable classification.
fn partition_runs(operations: &[Operation]) -> Vec<&[Operation]> {
    let is_native = |op: &Operation| matches!(op, Operation::Gate(_));
    let mut runs = Vec::new();
    let mut start = 0;
    for i in 1..=operations.len() {
        if i == operations.len() || is_native(&operations[i]) != is_native(&operations[start]) {
            runs.push(&operations[start..i]);
            start = i;
        }
    }
    runs
}

fn conversion_error(err: ConversionError) -> HalError {
    HalError::InvalidCircuit(err.to_string())
}

fn engine_error(err: SvError) -> HalError {
    HalError::Backend(err.to_string())
}

/// Statevector simulation backend.
///
/// Each call builds a fresh native state and circuit; nothing is shared
/// across invocations besides the sampling RNG and run counters. A
/// simulator is either sampling (`with_samples`) or exact (`new`); exact
/// expectation values are refused in sampling mode.
pub struct SvSimulator {
    n_samples: Option<usize>,
    rng: StdRng,
    circuits_run: usize,
    jobs_run: usize,
}

impl SvSimulator {
    /// Create an exact-mode simulator with no stored sample count.
    pub fn new() -> Self {
        Self {
            n_samples: None,
            rng: StdRng::from_entropy(),
            circuits_run: 0,
            jobs_run: 0,
        }
    }

    /// Create a sampling simulator with a stored default sample count.
    pub fn with_samples(n_samples: usize) -> Self {
        Self {
            n_samples: Some(n_samples),
            ..Self::new()
        }
    }

    /// Seed the sampling RNG for reproducible draws.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Number of circuits simulated so far.
    pub fn circuits_run(&self) -> usize {
        self.circuits_run
    }

    /// Number of measurement or expectation jobs completed so far.
    pub fn jobs_run(&self) -> usize {
        self.jobs_run
    }

    /// Execute `circuit` against a fresh native state.
    ///
    /// Native runs are translated and applied through the engine; raw-state
    /// runs act on the flipped amplitude vector directly, preserving
    /// overall operation order.
    fn native_state(
        &mut self,
        circuit: &Circuit,
        initial_state: Option<&Wavefunction>,
    ) -> HalResult<NativeState> {
        let n_qubits = circuit.n_qubits();
        debug!(n_qubits, operations = circuit.len(), "simulating circuit");

        let mut state = NativeState::new(n_qubits);
        if let Some(wavefunction) = initial_state {
            if wavefunction.n_qubits() != n_qubits {
                return Err(HalError::InvalidWavefunction(format!(
                    "initial state spans {} qubit(s) but the circuit has {}",
                    wavefunction.n_qubits(),
                    n_qubits
                )));
            }
            state
                .load(&flip_amplitudes(wavefunction.amplitudes()))
                .map_err(engine_error)?;
        }

        for run in partition_runs(circuit.operations()) {
            match run[0] {
                Operation::Gate(_) => {
                    let mut native = NativeCircuit::new(n_qubits);
                    for operation in run {
                        if let Operation::Gate(op) = operation {
                            let gate = convert_operation(op).map_err(conversion_error)?;
                            native.add_gate(gate).map_err(engine_error)?;
                        }
                    }
                    debug!(gates = native.len(), "applying native run");
                    native.update_state(&mut state).map_err(engine_error)?;
                }
                Operation::MultiPhase(_) => {
                    let mut amplitudes = flip_amplitudes(state.vector());
                    for operation in run {
                        if let Operation::MultiPhase(op) = operation {
                            op.apply(&mut amplitudes)
                                .map_err(|e| HalError::InvalidCircuit(e.to_string()))?;
                        }
                    }
                    debug!(operations = run.len(), "applied raw-state run");
                    state
                        .load(&flip_amplitudes(&amplitudes))
                        .map_err(engine_error)?;
                }
            }
        }

        self.circuits_run += 1;
        Ok(state)
    }
}

impl Default for SvSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl QuantumSimulator for SvSimulator {
    fn n_samples(&self) -> Option<usize> {
        self.n_samples
    }

    fn run_circuit_and_measure(
        &mut self,
        circuit: &Circuit,
        n_samples: Option<usize>,
    ) -> HalResult<Measurements> {
        let n_samples = n_samples.or(self.n_samples).ok_or_else(|| {
            HalError::Configuration(
                "sample count required: configure a default or pass one per call".to_string(),
            )
        })?;
        let state = self.native_state(circuit, None)?;
        let wavefunction = Wavefunction::new(flip_amplitudes(state.vector()))?;
        let bitstrings = sample_from_wavefunction(&wavefunction, n_samples, &mut self.rng);
        self.jobs_run += 1;
        Ok(Measurements::new(bitstrings))
    }

    fn get_wavefunction(
        &mut self,
        circuit: &Circuit,
        initial_state: Option<&Wavefunction>,
    ) -> HalResult<Wavefunction> {
        let state = self.native_state(circuit, initial_state)?;
        self.jobs_run += 1;
        Wavefunction::new(flip_amplitudes(state.vector()))
    }

    fn get_exact_expectation_values(
        &mut self,
        circuit: &Circuit,
        observable: &PauliSum,
    ) -> HalResult<ExpectationValues> {
        if self.n_samples.is_some() {
            return Err(HalError::Configuration(
                "exact expectation values are unavailable on a sampling simulator".to_string(),
            ));
        }
        let state = self.native_state(circuit, None)?;
        let mut values = Vec::with_capacity(observable.n_terms());
        for term in observable.terms() {
            let native = Observable::from_text(&term.to_string())
                .map_err(|e| HalError::ObservableParse(e.to_string()))?;
            let value = native.expectation_value(&state).map_err(engine_error)?;
            values.push(value.re);
        }
        self.jobs_run += 1;
        Ok(ExpectationValues::new(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_ir::{Gate, GateOperation, MultiPhaseOperation};
    use proptest::prelude::*;

    #[test]
    fn flip_reverses_basis_indices() {
        let amps: Vec<Complex64> = (0..8).map(|k| Complex64::new(k as f64, 0.0)).collect();
        let flipped = flip_amplitudes(&amps);
        // Index 1 (001) maps to index 4 (100) and vice versa.
        assert_eq!(flipped[4], Complex64::new(1.0, 0.0));
        assert_eq!(flipped[1], Complex64::new(4.0, 0.0));
        assert_eq!(flipped[0], Complex64::new(0.0, 0.0));
        assert_eq!(flipped[7], Complex64::new(7.0, 0.0));
    }

    #[test]
    fn partition_groups_contiguous_kinds() {
        let gate = |g: Gate, qs: Vec<usize>| {
            Operation::from(GateOperation::new(g, qs).unwrap())
        };
        let phase = Operation::from(MultiPhaseOperation::new(vec![0.0, 0.0]).unwrap());
        let ops = vec![
            gate(Gate::h(), vec![0]),
            gate(Gate::x(), vec![0]),
            phase.clone(),
            phase,
            gate(Gate::z(), vec![0]),
        ];
        let runs = partition_runs(&ops);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].len(), 2);
        assert_eq!(runs[1].len(), 2);
        assert_eq!(runs[2].len(), 1);
    }

    #[test]
    fn partition_of_empty_is_empty() {
        assert!(partition_runs(&[]).is_empty());
    }

    proptest! {
        #[test]
        fn flip_is_an_involution(
            raw in prop::collection::vec((-1.0f64..1.0, -1.0f64..1.0), 1..5)
        ) {
            let len = 1 << raw.len();
            let amps: Vec<Complex64> = (0..len)
                .map(|k| {
                    let (re, im) = raw[k % raw.len()];
                    Complex64::new(re + k as f64, im)
                })
                .collect();
            prop_assert_eq!(flip_amplitudes(&flip_amplitudes(&amps)), amps);
        }
    }
}
