//! Alsvid abstract circuit representation
//!
//! Core data structures for describing quantum circuits independently of any
//! execution backend. A [`Circuit`] is a flat, ordered sequence of
//! [`Operation`]s over a fixed qubit register; backends translate it into
//! whatever native form their engine consumes.
//!
//! # Core components
//!
//! - **Gates**: [`Gate`] — built-in gates identified by name (`H`, `CNOT`,
//!   `XX`, ...) plus custom gates defined by an explicit unitary matrix
//! - **Operations**: [`GateOperation`] binding a gate to qubit indices, and
//!   [`MultiPhaseOperation`] acting directly on the amplitude vector
//! - **Circuit**: [`Circuit`] — ordered operations plus the register size
//!
//! # Example: building a GHZ state
//!
//! ```rust
//! use alsvid_ir::{Circuit, Gate, GateOperation};
//!
//! let mut circuit = Circuit::new(3);
//! circuit.push(GateOperation::new(Gate::h(), vec![0]).unwrap()).unwrap();
//! circuit.push(GateOperation::new(Gate::cnot(), vec![0, 1]).unwrap()).unwrap();
//! circuit.push(GateOperation::new(Gate::cnot(), vec![1, 2]).unwrap()).unwrap();
//!
//! assert_eq!(circuit.n_qubits(), 3);
//! assert_eq!(circuit.len(), 3);
//! ```
//!
//! # Conventions
//!
//! - Rotation gates are `exp(-i θ P / 2)` for the generating Pauli `P`.
//! - Gate matrices are big-endian: the first qubit an operation lists maps
//!   to the most significant bit of the matrix row/column index.

pub mod circuit;
pub mod error;
pub mod gate;
mod matrices;
pub mod operation;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::Gate;
pub use operation::{GateOperation, MultiPhaseOperation, Operation};
