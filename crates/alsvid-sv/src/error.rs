//! Engine error types.

use thiserror::Error;

/// Errors raised by the statevector engine.
#[derive(Debug, Error)]
pub enum SvError {
    /// A gate was given the wrong number of target qubits.
    #[error("gate {gate} expects {expected} target(s), got {got}")]
    TargetCount {
        /// Gate name.
        gate: &'static str,
        /// Required target count.
        expected: usize,
        /// Provided target count.
        got: usize,
    },

    /// The same qubit appears twice among a gate's targets.
    #[error("duplicate target qubit {qubit}")]
    DuplicateTarget {
        /// The repeated qubit index.
        qubit: usize,
    },

    /// A dense matrix's shape does not match its target count.
    #[error("dense matrix is {rows}x{cols}, expected {expected}x{expected} for {targets} target(s)")]
    MatrixShape {
        /// Matrix row count.
        rows: usize,
        /// Matrix column count.
        cols: usize,
        /// Required dimension (2^targets).
        expected: usize,
        /// Number of targets.
        targets: usize,
    },

    /// A Pauli rotation's axis list does not match its target count.
    #[error("pauli rotation has {axes} axis label(s) for {targets} target(s)")]
    AxisCount {
        /// Number of axis labels.
        axes: usize,
        /// Number of targets.
        targets: usize,
    },

    /// A control qubit coincides with one of the gate's targets.
    #[error("control qubit {qubit} is also a target")]
    ControlOverlapsTarget {
        /// The offending qubit index.
        qubit: usize,
    },

    /// A qubit index lies outside the register.
    #[error("qubit {qubit} out of range for a {n_qubits}-qubit state")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: usize,
        /// Register size.
        n_qubits: usize,
    },

    /// A loaded amplitude vector has the wrong length.
    #[error("amplitude vector has length {got}, expected {expected}")]
    AmplitudeLength {
        /// Required length (2^n_qubits).
        expected: usize,
        /// Provided length.
        got: usize,
    },

    /// A circuit was applied to a state of a different register size.
    #[error("circuit acts on {circuit} qubit(s) but state has {state}")]
    QubitCountMismatch {
        /// Circuit register size.
        circuit: usize,
        /// State register size.
        state: usize,
    },

    /// The textual observable encoding could not be parsed.
    #[error("observable parse error: {0}")]
    ObservableParse(String),
}

/// Convenience alias for engine results.
pub type SvResult<T> = Result<T, SvError>;
