//! Alsvid statevector backend.
//!
//! Implements [`alsvid_hal::QuantumSimulator`] on top of the
//! [`alsvid_sv`] engine. The [`translation`] module maps abstract gates
//! onto the engine's gate set (special cases, then a name-keyed table,
//! then a dense-matrix fallback); the [`simulator`] module runs circuits,
//! reconciling the caller's big-endian amplitude ordering with the
//! engine's little-endian one.

pub mod simulator;
pub mod translation;

pub use simulator::SvSimulator;
pub use translation::{ConversionError, ParamTransform, convert_circuit, convert_operation};
