//! Circuit operations.
//!
//! A circuit is a sequence of [`Operation`]s. Most are [`GateOperation`]s —
//! a gate bound to concrete qubit indices — which backends translate into
//! their native gate set. [`MultiPhaseOperation`] is the exception: it has no
//! gate-level representation and acts directly on an amplitude vector, so
//! backends must route it through their raw-state path.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::Gate;

/// A gate applied to an ordered tuple of qubit indices.
///
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateOperation {
    gate: Gate,
    qubit_indices: Vec<usize>,
}

impl GateOperation {
    /// Bind a gate to qubit indices.
    ///
    /// The index count must match the gate's arity and indices must be
    /// distinct.
    pub fn new(gate: Gate, qubit_indices: impl Into<Vec<usize>>) -> IrResult<Self> {
        let qubit_indices = qubit_indices.into();
        if qubit_indices.len() != gate.num_qubits() {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate.name().to_string(),
                expected: gate.num_qubits(),
                got: qubit_indices.len(),
            });
        }
        for (i, &qubit) in qubit_indices.iter().enumerate() {
            if qubit_indices[..i].contains(&qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate.name().to_string(),
                });
            }
        }
        Ok(Self {
            gate,
            qubit_indices,
        })
    }

    /// The gate being applied.
    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    /// The qubit indices the gate acts on, in gate-argument order.
    pub fn qubit_indices(&self) -> &[usize] {
        &self.qubit_indices
    }

    /// The gate's raw parameters.
    pub fn params(&self) -> &[f64] {
        self.gate.params()
    }
}

/// A diagonal phase operation over every basis state of the register.
///
/// Multiplies the amplitude of basis state `k` by `exp(i * phases[k])`.
/// Basis indices follow the caller-visible convention (qubit 0 is the most
/// significant bit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiPhaseOperation {
    phases: Vec<f64>,
}

impl MultiPhaseOperation {
    /// Create from one phase per basis state; the length must be a power of
    /// two.
    pub fn new(phases: impl Into<Vec<f64>>) -> IrResult<Self> {
        let phases = phases.into();
        if phases.is_empty() || !phases.len().is_power_of_two() {
            return Err(IrError::InvalidPhaseCount(phases.len()));
        }
        Ok(Self { phases })
    }

    /// One phase per basis state.
    pub fn phases(&self) -> &[f64] {
        &self.phases
    }

    /// Number of qubits this operation spans.
    pub fn num_qubits(&self) -> usize {
        self.phases.len().trailing_zeros() as usize
    }

    /// Apply the phases to an amplitude vector in place.
    pub fn apply(&self, amplitudes: &mut [Complex64]) -> IrResult<()> {
        if amplitudes.len() != self.phases.len() {
            return Err(IrError::AmplitudeLength {
                expected: self.phases.len(),
                got: amplitudes.len(),
            });
        }
        for (amp, &phase) in amplitudes.iter_mut().zip(&self.phases) {
            *amp *= Complex64::from_polar(1.0, phase);
        }
        Ok(())
    }
}

/// One step of a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// A gate bound to qubit indices; backends translate these natively.
    Gate(GateOperation),
    /// A raw amplitude-vector transform with no gate representation.
    MultiPhase(MultiPhaseOperation),
}

impl Operation {
    /// The gate operation, when this step is one.
    pub fn as_gate(&self) -> Option<&GateOperation> {
        match self {
            Operation::Gate(op) => Some(op),
            Operation::MultiPhase(_) => None,
        }
    }

    /// Highest qubit index this operation touches, if any.
    pub fn max_qubit(&self) -> Option<usize> {
        match self {
            Operation::Gate(op) => op.qubit_indices().iter().copied().max(),
            Operation::MultiPhase(op) => op.num_qubits().checked_sub(1),
        }
    }
}

impl From<GateOperation> for Operation {
    fn from(op: GateOperation) -> Self {
        Operation::Gate(op)
    }
}

impl From<MultiPhaseOperation> for Operation {
    fn from(op: MultiPhaseOperation) -> Self {
        Operation::MultiPhase(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_operation_checks_arity() {
        assert!(GateOperation::new(Gate::h(), vec![0]).is_ok());
        assert!(matches!(
            GateOperation::new(Gate::cnot(), vec![0]),
            Err(IrError::QubitCountMismatch { .. })
        ));
    }

    #[test]
    fn gate_operation_rejects_duplicate_qubits() {
        assert!(matches!(
            GateOperation::new(Gate::cnot(), vec![1, 1]),
            Err(IrError::DuplicateQubit { qubit: 1, .. })
        ));
    }

    #[test]
    fn multi_phase_applies_per_basis_state() {
        let op = MultiPhaseOperation::new(vec![0.0, std::f64::consts::PI]).unwrap();
        let mut amps = vec![Complex64::new(1.0, 0.0), Complex64::new(1.0, 0.0)];
        op.apply(&mut amps).unwrap();
        assert!((amps[0] - Complex64::new(1.0, 0.0)).norm() < 1e-12);
        assert!((amps[1] - Complex64::new(-1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn multi_phase_validates_lengths() {
        assert!(matches!(
            MultiPhaseOperation::new(vec![0.0, 0.1, 0.2]),
            Err(IrError::InvalidPhaseCount(3))
        ));
        let op = MultiPhaseOperation::new(vec![0.0; 4]).unwrap();
        let mut short = vec![Complex64::new(1.0, 0.0); 2];
        assert!(matches!(
            op.apply(&mut short),
            Err(IrError::AmplitudeLength {
                expected: 4,
                got: 2
            })
        ));
    }
}
