//! Alsvid native statevector engine.
//!
//! A dense statevector simulator with its own gate vocabulary
//! ([`NativeGateKind`]), circuits ([`NativeCircuit`]), and exact
//! observables ([`Observable`]).
//!
//! Two conventions hold throughout:
//!
//! - **Indexing is little-endian**: qubit `q` is bit `q` of a basis index.
//! - **Rotations are exp(+iθP/2)**: `RotateX/Y/Z` and `PauliRotation` use
//!   the positive sign; `Phase(λ)` is `diag(1, e^{iλ})`.
//!
//! Frontends with other conventions reconcile at their own boundary.

pub mod circuit;
pub mod error;
pub mod gate;
pub mod observable;
pub mod state;

mod pauli;

pub use circuit::NativeCircuit;
pub use error::{SvError, SvResult};
pub use gate::{NativeGate, NativeGateKind, PauliAxis};
pub use observable::{Observable, PauliTerm};
pub use state::NativeState;
