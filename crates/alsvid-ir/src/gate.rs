//! Quantum gate types.

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::matrices;

/// A quantum gate: a name, its real-valued parameters, and (for custom
/// gates) an explicit unitary matrix.
///
/// Built-in gates are identified by name and compute their matrix on demand;
/// custom gates carry theirs. Backends are free to recognize built-in names
/// and translate them natively, falling back to [`Gate::matrix`] otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    name: String,
    params: Vec<f64>,
    n_qubits: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    matrix: Option<Array2<Complex64>>,
}

impl Gate {
    fn builtin(name: &str, params: Vec<f64>) -> Self {
        let n_qubits = matrices::builtin_arity(name)
            .expect("builtin constructor called with unknown gate name");
        Self {
            name: name.to_string(),
            params,
            n_qubits,
            matrix: None,
        }
    }

    /// Create a custom gate from an explicit unitary matrix.
    ///
    /// The matrix must be square with dimension `2^k` for some `k >= 1`.
    pub fn custom(name: impl Into<String>, matrix: Array2<Complex64>) -> IrResult<Self> {
        let (rows, cols) = matrix.dim();
        if rows != cols {
            return Err(IrError::InvalidMatrix(format!(
                "matrix is {rows}x{cols}, expected square"
            )));
        }
        if rows < 2 || !rows.is_power_of_two() {
            return Err(IrError::InvalidMatrix(format!(
                "matrix dimension {rows} is not a power of two >= 2"
            )));
        }
        Ok(Self {
            name: name.into(),
            params: vec![],
            n_qubits: rows.trailing_zeros() as usize,
            matrix: Some(matrix),
        })
    }

    /// Identity gate.
    pub fn i() -> Self {
        Self::builtin("I", vec![])
    }

    /// Pauli-X gate.
    pub fn x() -> Self {
        Self::builtin("X", vec![])
    }

    /// Pauli-Y gate.
    pub fn y() -> Self {
        Self::builtin("Y", vec![])
    }

    /// Pauli-Z gate.
    pub fn z() -> Self {
        Self::builtin("Z", vec![])
    }

    /// Hadamard gate.
    pub fn h() -> Self {
        Self::builtin("H", vec![])
    }

    /// S gate (sqrt(Z)).
    pub fn s() -> Self {
        Self::builtin("S", vec![])
    }

    /// S-dagger gate.
    pub fn sdag() -> Self {
        Self::builtin("Sdag", vec![])
    }

    /// T gate (fourth root of Z).
    pub fn t() -> Self {
        Self::builtin("T", vec![])
    }

    /// T-dagger gate.
    pub fn tdag() -> Self {
        Self::builtin("Tdag", vec![])
    }

    /// Rotation around X: `exp(-i θ X / 2)`.
    pub fn rx(theta: f64) -> Self {
        Self::builtin("RX", vec![theta])
    }

    /// Rotation around Y: `exp(-i θ Y / 2)`.
    pub fn ry(theta: f64) -> Self {
        Self::builtin("RY", vec![theta])
    }

    /// Rotation around Z: `exp(-i θ Z / 2)`.
    pub fn rz(theta: f64) -> Self {
        Self::builtin("RZ", vec![theta])
    }

    /// Phase gate `diag(1, e^{iθ})`.
    pub fn phase(theta: f64) -> Self {
        Self::builtin("PHASE", vec![theta])
    }

    /// Controlled-NOT gate; the first qubit is the control.
    pub fn cnot() -> Self {
        Self::builtin("CNOT", vec![])
    }

    /// Controlled-Z gate.
    pub fn cz() -> Self {
        Self::builtin("CZ", vec![])
    }

    /// Controlled phase gate `diag(1, 1, 1, e^{iθ})`.
    pub fn cphase(theta: f64) -> Self {
        Self::builtin("CPHASE", vec![theta])
    }

    /// SWAP gate.
    pub fn swap() -> Self {
        Self::builtin("SWAP", vec![])
    }

    /// Two-qubit Pauli rotation `exp(-i θ X⊗X / 2)`.
    pub fn xx(theta: f64) -> Self {
        Self::builtin("XX", vec![theta])
    }

    /// Two-qubit Pauli rotation `exp(-i θ Y⊗Y / 2)`.
    pub fn yy(theta: f64) -> Self {
        Self::builtin("YY", vec![theta])
    }

    /// Two-qubit Pauli rotation `exp(-i θ Z⊗Z / 2)`.
    pub fn zz(theta: f64) -> Self {
        Self::builtin("ZZ", vec![theta])
    }

    /// XY interaction gate `exp(+i θ (X⊗X + Y⊗Y) / 4)`: identity on
    /// `|00>`/`|11>`, with a `cos(θ/2)` / `+i·sin(θ/2)` mixing block on the
    /// single-excitation subspace (iSWAP family; note the sign differs from
    /// the `exp(-iθP/2)` rotation gates).
    pub fn xy(theta: f64) -> Self {
        Self::builtin("XY", vec![theta])
    }

    /// Toffoli gate; the first two qubits are controls.
    pub fn ccnot() -> Self {
        Self::builtin("CCNOT", vec![])
    }

    /// Fredkin gate; the first qubit is the control.
    pub fn cswap() -> Self {
        Self::builtin("CSWAP", vec![])
    }

    /// Gate name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gate parameters, in declaration order.
    pub fn params(&self) -> &[f64] {
        &self.params
    }

    /// Number of qubits this gate acts on.
    pub fn num_qubits(&self) -> usize {
        self.n_qubits
    }

    /// The gate's unitary matrix, if one is defined.
    ///
    /// Custom gates return their stored matrix; built-in gates compute
    /// theirs. Basis ordering is big-endian: the first qubit an operation
    /// lists is the most significant bit of the matrix index.
    pub fn matrix(&self) -> Option<Array2<Complex64>> {
        match &self.matrix {
            Some(m) => Some(m.clone()),
            None => matrices::builtin_matrix(&self.name, &self.params),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;
    use std::f64::consts::PI;

    #[test]
    fn builtin_gate_properties() {
        assert_eq!(Gate::h().name(), "H");
        assert_eq!(Gate::h().num_qubits(), 1);
        assert_eq!(Gate::cnot().num_qubits(), 2);
        assert_eq!(Gate::ccnot().num_qubits(), 3);
        assert_eq!(Gate::rx(PI).params(), &[PI]);
        assert!(Gate::cz().matrix().is_some());
    }

    #[test]
    fn custom_gate_from_matrix() {
        let m = arr2(&[
            [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
            [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
        ]);
        let gate = Gate::custom("NOT", m.clone()).unwrap();
        assert_eq!(gate.name(), "NOT");
        assert_eq!(gate.num_qubits(), 1);
        assert_eq!(gate.matrix().unwrap(), m);
    }

    #[test]
    fn custom_gate_rejects_bad_dimensions() {
        let ragged = Array2::<Complex64>::zeros((2, 3));
        assert!(matches!(
            Gate::custom("bad", ragged),
            Err(IrError::InvalidMatrix(_))
        ));

        let odd = Array2::<Complex64>::zeros((3, 3));
        assert!(matches!(
            Gate::custom("bad", odd),
            Err(IrError::InvalidMatrix(_))
        ));
    }
}
