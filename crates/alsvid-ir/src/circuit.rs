//! Circuit type: an ordered operation sequence over a fixed register.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::operation::Operation;

/// An ordered sequence of operations on an `n_qubits` register.
///
/// Circuits are value objects: construct, pass by reference, never mutate
/// from the backend side. Operation order is significant — gate composition
/// does not commute in general.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    n_qubits: usize,
    operations: Vec<Operation>,
}

impl Circuit {
    /// Create an empty circuit over `n_qubits`.
    pub fn new(n_qubits: usize) -> Self {
        Self {
            n_qubits,
            operations: vec![],
        }
    }

    /// Build a circuit from operations, validating each against the register
    /// size.
    pub fn from_operations(
        operations: impl IntoIterator<Item = Operation>,
        n_qubits: usize,
    ) -> IrResult<Self> {
        let mut circuit = Self::new(n_qubits);
        for op in operations {
            circuit.push(op)?;
        }
        Ok(circuit)
    }

    /// Append an operation, validating its qubit usage.
    pub fn push(&mut self, operation: impl Into<Operation>) -> IrResult<()> {
        let operation = operation.into();
        if let Some(max) = operation.max_qubit() {
            if max >= self.n_qubits {
                return Err(IrError::QubitOutOfRange {
                    qubit: max,
                    n_qubits: self.n_qubits,
                });
            }
        }
        self.operations.push(operation);
        Ok(())
    }

    /// Register size.
    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    /// Operations in application order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// True when the circuit has no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::Gate;
    use crate::operation::{GateOperation, MultiPhaseOperation};

    #[test]
    fn push_validates_register_bounds() {
        let mut circuit = Circuit::new(2);
        circuit
            .push(GateOperation::new(Gate::h(), vec![0]).unwrap())
            .unwrap();
        let out_of_range = GateOperation::new(Gate::cnot(), vec![1, 2]).unwrap();
        assert!(matches!(
            circuit.push(out_of_range),
            Err(IrError::QubitOutOfRange {
                qubit: 2,
                n_qubits: 2
            })
        ));
    }

    #[test]
    fn multi_phase_must_span_register() {
        let mut circuit = Circuit::new(1);
        let too_wide = MultiPhaseOperation::new(vec![0.0; 4]).unwrap();
        assert!(circuit.push(too_wide).is_err());
    }

    #[test]
    fn from_operations_preserves_order() {
        let ops = vec![
            Operation::from(GateOperation::new(Gate::x(), vec![0]).unwrap()),
            Operation::from(GateOperation::new(Gate::cnot(), vec![0, 1]).unwrap()),
        ];
        let circuit = Circuit::from_operations(ops, 2).unwrap();
        assert_eq!(circuit.len(), 2);
        assert_eq!(
            circuit.operations()[0].as_gate().unwrap().gate().name(),
            "X"
        );
        assert_eq!(
            circuit.operations()[1].as_gate().unwrap().gate().name(),
            "CNOT"
        );
    }
}
