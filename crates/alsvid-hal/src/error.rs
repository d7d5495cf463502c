//! Error types for the backend interface.

use thiserror::Error;

/// Errors that can occur when driving a backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// Backend configuration error (missing sample count, conflicting
    /// measurement modes, ...).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Circuit cannot be executed on this backend.
    #[error("Invalid circuit: {0}")]
    InvalidCircuit(String),

    /// Amplitude vector is not a valid wavefunction.
    #[error("Invalid wavefunction: {0}")]
    InvalidWavefunction(String),

    /// Textual Pauli-sum observable could not be parsed.
    #[error("Cannot parse observable: {0}")]
    ObservableParse(String),

    /// Generic backend error.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for backend operations.
pub type HalResult<T> = Result<T, HalError>;
