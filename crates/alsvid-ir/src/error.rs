//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur when building circuits and operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Gate applied to the wrong number of qubits.
    #[error("Gate '{gate_name}' acts on {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Number of qubits the gate acts on.
        expected: usize,
        /// Number of qubit indices provided.
        got: usize,
    },

    /// The same qubit index appears twice in one operation.
    #[error("Duplicate qubit {qubit} in operation (gate: {gate_name})")]
    DuplicateQubit {
        /// The duplicate qubit index.
        qubit: usize,
        /// Name of the gate.
        gate_name: String,
    },

    /// Operation references a qubit outside the circuit register.
    #[error("Qubit {qubit} out of range for a {n_qubits}-qubit circuit")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: usize,
        /// Size of the circuit register.
        n_qubits: usize,
    },

    /// Custom gate matrix has invalid dimensions.
    #[error("Invalid gate matrix: {0}")]
    InvalidMatrix(String),

    /// Phase vector length is not a power of two.
    #[error("Phase vector length {0} is not a power of two")]
    InvalidPhaseCount(usize),

    /// Amplitude vector length does not match the operation.
    #[error("Amplitude vector has length {got}, expected {expected}")]
    AmplitudeLength {
        /// Expected vector length.
        expected: usize,
        /// Actual vector length.
        got: usize,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
