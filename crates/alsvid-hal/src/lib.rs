//! Alsvid backend interface
//!
//! The contract between circuit-producing code and simulation backends:
//! the [`QuantumSimulator`] trait plus the value types flowing across it —
//! [`Wavefunction`], [`Measurements`], [`ExpectationValues`], and the
//! [`PauliSum`] observable with its textual encoding
//! (`"1.0 [Z0 Z1] + 0.5 []"`).
//!
//! Amplitude and bitstring ordering is big-endian throughout: qubit 0 is
//! the most significant bit of a basis index and the first entry of a
//! sampled bitstring. Backends whose engines index differently reconcile
//! internally.

pub mod backend;
pub mod error;
pub mod measurement;
pub mod observable;
pub mod wavefunction;

pub use backend::QuantumSimulator;
pub use error::{HalError, HalResult};
pub use measurement::{ExpectationValues, Measurements, sample_from_wavefunction};
pub use observable::{PauliOp, PauliString, PauliSum, PauliSumTerm};
pub use wavefunction::Wavefunction;
