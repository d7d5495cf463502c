//! Native circuits: ordered gate lists bound to a register size.

use crate::error::{SvError, SvResult};
use crate::gate::NativeGate;
use crate::state::NativeState;

/// An ordered sequence of [`NativeGate`]s over a fixed register.
pub struct NativeCircuit {
    n_qubits: usize,
    gates: Vec<NativeGate>,
}

impl NativeCircuit {
    /// Create an empty circuit over `n_qubits` qubits.
    pub fn new(n_qubits: usize) -> Self {
        Self {
            n_qubits,
            gates: Vec::new(),
        }
    }

    /// Append a gate, validating its qubits against the register size.
    pub fn add_gate(&mut self, gate: NativeGate) -> SvResult<()> {
        if let Some(qubit) = gate.max_qubit() {
            if qubit >= self.n_qubits {
                return Err(SvError::QubitOutOfRange {
                    qubit,
                    n_qubits: self.n_qubits,
                });
            }
        }
        self.gates.push(gate);
        Ok(())
    }

    /// Register size.
    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    /// The gates, in application order.
    pub fn gates(&self) -> &[NativeGate] {
        &self.gates
    }

    /// Number of gates.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// True when the circuit holds no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Apply every gate, in order, to `state`.
    pub fn update_state(&self, state: &mut NativeState) -> SvResult<()> {
        if state.n_qubits() != self.n_qubits {
            return Err(SvError::QubitCountMismatch {
                circuit: self.n_qubits,
                state: state.n_qubits(),
            });
        }
        for gate in &self.gates {
            state.apply_gate(gate)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::NativeGateKind;
    use num_complex::Complex64;

    #[test]
    fn gates_out_of_range_are_rejected_at_insertion() {
        let mut circuit = NativeCircuit::new(2);
        let gate = NativeGate::new(NativeGateKind::PauliX, vec![5]).unwrap();
        assert!(matches!(
            circuit.add_gate(gate),
            Err(SvError::QubitOutOfRange { qubit: 5, n_qubits: 2 })
        ));
    }

    #[test]
    fn update_state_runs_gates_in_order() {
        let mut circuit = NativeCircuit::new(2);
        circuit
            .add_gate(NativeGate::new(NativeGateKind::PauliX, vec![0]).unwrap())
            .unwrap();
        circuit
            .add_gate(NativeGate::new(NativeGateKind::Cnot, vec![0, 1]).unwrap())
            .unwrap();

        let mut state = NativeState::new(2);
        circuit.update_state(&mut state).unwrap();
        assert!((state.vector()[3] - Complex64::new(1.0, 0.0)).norm() < 1e-10);
    }

    #[test]
    fn register_size_mismatch_is_an_error() {
        let circuit = NativeCircuit::new(3);
        let mut state = NativeState::new(2);
        assert!(matches!(
            circuit.update_state(&mut state),
            Err(SvError::QubitCountMismatch { circuit: 3, state: 2 })
        ));
    }
}
