//! Native gate descriptions.
//!
//! A [`NativeGate`] pairs a [`NativeGateKind`] with the target qubits it
//! acts on, plus an optional classical control annotation. Gates are plain
//! data; the kernels that apply them live in [`crate::state`].

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::{SvError, SvResult};

/// Single-qubit Pauli axis label, used by multi-qubit Pauli rotations and
/// observable terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauliAxis {
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

/// The operation a native gate performs.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeGateKind {
    /// Identity (no-op).
    Identity,
    /// Pauli-X.
    PauliX,
    /// Pauli-Y.
    PauliY,
    /// Pauli-Z.
    PauliZ,
    /// Hadamard.
    Hadamard,
    /// S = diag(1, i).
    SGate,
    /// T = diag(1, e^{iπ/4}).
    TGate,
    /// exp(+iθX/2).
    RotateX(f64),
    /// exp(+iθY/2).
    RotateY(f64),
    /// exp(+iθZ/2).
    RotateZ(f64),
    /// diag(1, e^{iλ}).
    Phase(f64),
    /// Controlled-X; targets are `[control, target]`.
    Cnot,
    /// Swap two qubits.
    Swap,
    /// exp(+iθP/2) for a multi-qubit Pauli string P, one axis per target.
    PauliRotation {
        /// Axis label per target qubit, in target order.
        axes: Vec<PauliAxis>,
        /// Rotation angle θ.
        angle: f64,
    },
    /// Arbitrary unitary on the targets. Row/column bit 0 of the matrix
    /// index corresponds to the *last* target; the first target is the most
    /// significant bit.
    DenseMatrix(Array2<Complex64>),
}

impl NativeGateKind {
    /// The gate's display name.
    pub fn name(&self) -> &'static str {
        match self {
            NativeGateKind::Identity => "I",
            NativeGateKind::PauliX => "X",
            NativeGateKind::PauliY => "Y",
            NativeGateKind::PauliZ => "Z",
            NativeGateKind::Hadamard => "H",
            NativeGateKind::SGate => "S",
            NativeGateKind::TGate => "T",
            NativeGateKind::RotateX(_) => "RX",
            NativeGateKind::RotateY(_) => "RY",
            NativeGateKind::RotateZ(_) => "RZ",
            NativeGateKind::Phase(_) => "Phase",
            NativeGateKind::Cnot => "CNOT",
            NativeGateKind::Swap => "SWAP",
            NativeGateKind::PauliRotation { .. } => "PauliRotation",
            NativeGateKind::DenseMatrix(_) => "DenseMatrix",
        }
    }

    /// Required target count, or `None` for variable-arity kinds.
    fn expected_targets(&self) -> Option<usize> {
        match self {
            NativeGateKind::Identity
            | NativeGateKind::PauliX
            | NativeGateKind::PauliY
            | NativeGateKind::PauliZ
            | NativeGateKind::Hadamard
            | NativeGateKind::SGate
            | NativeGateKind::TGate
            | NativeGateKind::RotateX(_)
            | NativeGateKind::RotateY(_)
            | NativeGateKind::RotateZ(_)
            | NativeGateKind::Phase(_) => Some(1),
            NativeGateKind::Cnot | NativeGateKind::Swap => Some(2),
            NativeGateKind::PauliRotation { .. } | NativeGateKind::DenseMatrix(_) => None,
        }
    }
}

/// A gate instance bound to target qubits.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeGate {
    kind: NativeGateKind,
    targets: Vec<usize>,
    control: Option<(usize, u8)>,
}

impl NativeGate {
    /// Bind a gate kind to target qubits, validating arity and shape.
    pub fn new(kind: NativeGateKind, targets: Vec<usize>) -> SvResult<Self> {
        if let Some(expected) = kind.expected_targets() {
            if targets.len() != expected {
                return Err(SvError::TargetCount {
                    gate: kind.name(),
                    expected,
                    got: targets.len(),
                });
            }
        }
        match &kind {
            NativeGateKind::PauliRotation { axes, .. } => {
                if axes.len() != targets.len() {
                    return Err(SvError::AxisCount {
                        axes: axes.len(),
                        targets: targets.len(),
                    });
                }
            }
            NativeGateKind::DenseMatrix(matrix) => {
                let expected = 1usize << targets.len();
                if matrix.nrows() != expected || matrix.ncols() != expected {
                    return Err(SvError::MatrixShape {
                        rows: matrix.nrows(),
                        cols: matrix.ncols(),
                        expected,
                        targets: targets.len(),
                    });
                }
            }
            _ => {}
        }
        for (i, q) in targets.iter().enumerate() {
            if targets[..i].contains(q) {
                return Err(SvError::DuplicateTarget { qubit: *q });
            }
        }
        Ok(Self {
            kind,
            targets,
            control: None,
        })
    }

    /// Condition the gate on a control qubit holding `value` (0 or 1).
    ///
    /// Basis states whose control bit differs pass through unchanged.
    pub fn add_control_qubit(&mut self, qubit: usize, value: u8) -> SvResult<()> {
        if self.targets.contains(&qubit) {
            return Err(SvError::ControlOverlapsTarget { qubit });
        }
        self.control = Some((qubit, value));
        Ok(())
    }

    /// The gate's operation.
    pub fn kind(&self) -> &NativeGateKind {
        &self.kind
    }

    /// The gate's display name.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Target qubits, in binding order.
    pub fn targets(&self) -> &[usize] {
        &self.targets
    }

    /// The control annotation, if any.
    pub fn control(&self) -> Option<(usize, u8)> {
        self.control
    }

    /// The highest qubit index the gate touches.
    pub fn max_qubit(&self) -> Option<usize> {
        self.targets
            .iter()
            .copied()
            .chain(self.control.map(|(q, _)| q))
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn arity_is_validated() {
        assert!(NativeGate::new(NativeGateKind::Hadamard, vec![0]).is_ok());
        assert!(matches!(
            NativeGate::new(NativeGateKind::Hadamard, vec![0, 1]),
            Err(SvError::TargetCount { gate: "H", .. })
        ));
        assert!(matches!(
            NativeGate::new(NativeGateKind::Cnot, vec![2]),
            Err(SvError::TargetCount { gate: "CNOT", .. })
        ));
    }

    #[test]
    fn duplicate_targets_are_rejected() {
        assert!(matches!(
            NativeGate::new(NativeGateKind::Swap, vec![1, 1]),
            Err(SvError::DuplicateTarget { qubit: 1 })
        ));
    }

    #[test]
    fn dense_matrix_shape_is_validated() {
        let m = array![
            [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
            [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
        ];
        assert!(NativeGate::new(NativeGateKind::DenseMatrix(m.clone()), vec![3]).is_ok());
        assert!(matches!(
            NativeGate::new(NativeGateKind::DenseMatrix(m), vec![0, 1]),
            Err(SvError::MatrixShape { .. })
        ));
    }

    #[test]
    fn pauli_rotation_axis_count_is_validated() {
        let kind = NativeGateKind::PauliRotation {
            axes: vec![PauliAxis::X, PauliAxis::X],
            angle: 0.5,
        };
        assert!(NativeGate::new(kind.clone(), vec![0, 1]).is_ok());
        assert!(matches!(
            NativeGate::new(kind, vec![0]),
            Err(SvError::AxisCount { axes: 2, targets: 1 })
        ));
    }

    #[test]
    fn control_must_not_overlap_targets() {
        let mut gate = NativeGate::new(NativeGateKind::PauliX, vec![0]).unwrap();
        assert!(matches!(
            gate.add_control_qubit(0, 1),
            Err(SvError::ControlOverlapsTarget { qubit: 0 })
        ));
        gate.add_control_qubit(2, 1).unwrap();
        assert_eq!(gate.control(), Some((2, 1)));
        assert_eq!(gate.max_qubit(), Some(2));
    }
}
