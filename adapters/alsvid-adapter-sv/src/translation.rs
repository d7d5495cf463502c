//! Gate and circuit translation into the native gate set.
//!
//! Resolution runs in priority order: a special-case builder (currently
//! only CPHASE, which the engine has no direct constructor for), then the
//! name-keyed translation table, then the dense-matrix fallback for
//! anything else that can produce a unitary. The fallback makes coverage
//! universal — any gate with a matrix simulates — at the cost of the
//! engine's structured-gate kernels.
//!
//! Parameter transforms reconcile rotation sign conventions: the abstract
//! rotations are exp(-iθP/2) while the engine applies exp(+iθP/2), so the
//! rotation entries negate their angle. Phase-style gates are diag(1, e^{iλ})
//! on both sides and pass angles through unchanged.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;
use thiserror::Error;

use alsvid_ir::{Circuit, GateOperation, Operation};
use alsvid_sv::{NativeCircuit, NativeGate, NativeGateKind, PauliAxis, SvError};

/// Errors produced while translating operations to native gates.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// A gate registered as non-parametric arrived carrying parameters.
    #[error("gate {gate} is not parametric but received {got} parameter(s)")]
    NotParametric {
        /// Gate name.
        gate: String,
        /// Number of parameters supplied.
        got: usize,
    },

    /// A parametric gate arrived with the wrong parameter count.
    #[error("gate {gate} expects {expected} parameter(s), got {got}")]
    ParamCount {
        /// Gate name.
        gate: String,
        /// Required parameter count.
        expected: usize,
        /// Supplied parameter count.
        got: usize,
    },

    /// A gate with no table entry also defines no unitary matrix.
    #[error("gate {gate} has no native translation and no matrix to fall back on")]
    MissingMatrix {
        /// Gate name.
        gate: String,
    },

    /// An operation kind with no gate-level representation reached the
    /// circuit converter; such operations go through the raw-state path
    /// instead.
    #[error("operation has no native gate representation")]
    NonNativeOperation,

    /// The engine rejected the constructed gate.
    #[error(transparent)]
    Engine(#[from] SvError),
}

/// How a gate's raw parameters map onto the native constructor's angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamTransform {
    /// The gate takes no parameters; any present signal misuse.
    NotParametric,
    /// One angle, negated for the engine's opposite rotation sign.
    Negate,
    /// One angle, passed through unchanged.
    Identity,
}

impl ParamTransform {
    /// Validate and transform `params`, returning the native angle if the
    /// gate takes one.
    fn apply(self, gate: &str, params: &[f64]) -> Result<Option<f64>, ConversionError> {
        match self {
            ParamTransform::NotParametric => {
                if params.is_empty() {
                    Ok(None)
                } else {
                    Err(ConversionError::NotParametric {
                        gate: gate.to_string(),
                        got: params.len(),
                    })
                }
            }
            ParamTransform::Negate | ParamTransform::Identity => {
                let [theta] = params else {
                    return Err(ConversionError::ParamCount {
                        gate: gate.to_string(),
                        expected: 1,
                        got: params.len(),
                    });
                };
                Ok(Some(if self == ParamTransform::Negate {
                    -theta
                } else {
                    *theta
                }))
            }
        }
    }
}

/// The native construction a table entry performs.
enum NativeTemplate {
    /// A fixed gate kind over the operation's qubits.
    Kind(NativeGateKind),
    /// An angle-parameterized kind over the operation's qubits.
    Angle(fn(f64) -> NativeGateKind),
    /// A fixed kind on the second qubit, controlled by the first.
    Controlled(NativeGateKind),
    /// A two-qubit Pauli rotation with fixed axes.
    PauliRotation([PauliAxis; 2]),
}

/// One translation-table entry: a constructor template plus the parameter
/// transform feeding it.
struct GateTranslation {
    template: NativeTemplate,
    transform: ParamTransform,
}

impl GateTranslation {
    fn build(&self, op: &GateOperation) -> Result<NativeGate, ConversionError> {
        let name = op.gate().name();
        let angle = self.transform.apply(name, op.params())?;
        let qubits = op.qubit_indices();
        let gate = match &self.template {
            NativeTemplate::Kind(kind) => NativeGate::new(kind.clone(), qubits.to_vec())?,
            NativeTemplate::Angle(ctor) => {
                let theta = angle.ok_or_else(|| ConversionError::ParamCount {
                    gate: name.to_string(),
                    expected: 1,
                    got: 0,
                })?;
                NativeGate::new(ctor(theta), qubits.to_vec())?
            }
            NativeTemplate::Controlled(kind) => {
                let mut gate = NativeGate::new(kind.clone(), vec![qubits[1]])?;
                gate.add_control_qubit(qubits[0], 1)?;
                gate
            }
            NativeTemplate::PauliRotation(axes) => {
                let theta = angle.ok_or_else(|| ConversionError::ParamCount {
                    gate: name.to_string(),
                    expected: 1,
                    got: 0,
                })?;
                NativeGate::new(
                    NativeGateKind::PauliRotation {
                        axes: axes.to_vec(),
                        angle: theta,
                    },
                    qubits.to_vec(),
                )?
            }
        };
        Ok(gate)
    }
}

/// Name-keyed translation table, built once on first use.
static TRANSLATION_TABLE: LazyLock<FxHashMap<&'static str, GateTranslation>> =
    LazyLock::new(|| {
        let fixed = [
            ("I", NativeGateKind::Identity),
            ("X", NativeGateKind::PauliX),
            ("Y", NativeGateKind::PauliY),
            ("Z", NativeGateKind::PauliZ),
            ("H", NativeGateKind::Hadamard),
            ("S", NativeGateKind::SGate),
            ("T", NativeGateKind::TGate),
            ("CNOT", NativeGateKind::Cnot),
            ("SWAP", NativeGateKind::Swap),
        ];
        let rotations: [(&'static str, fn(f64) -> NativeGateKind); 3] = [
            ("RX", NativeGateKind::RotateX),
            ("RY", NativeGateKind::RotateY),
            ("RZ", NativeGateKind::RotateZ),
        ];
        let pauli_pairs = [
            ("XX", [PauliAxis::X, PauliAxis::X]),
            ("YY", [PauliAxis::Y, PauliAxis::Y]),
            ("ZZ", [PauliAxis::Z, PauliAxis::Z]),
        ];

        let mut table = FxHashMap::default();
        for (name, kind) in fixed {
            table.insert(
                name,
                GateTranslation {
                    template: NativeTemplate::Kind(kind),
                    transform: ParamTransform::NotParametric,
                },
            );
        }
        for (name, ctor) in rotations {
            table.insert(
                name,
                GateTranslation {
                    template: NativeTemplate::Angle(ctor),
                    transform: ParamTransform::Negate,
                },
            );
        }
        table.insert(
            "PHASE",
            GateTranslation {
                template: NativeTemplate::Angle(NativeGateKind::Phase),
                transform: ParamTransform::Identity,
            },
        );
        table.insert(
            "CZ",
            GateTranslation {
                template: NativeTemplate::Controlled(NativeGateKind::PauliZ),
                transform: ParamTransform::NotParametric,
            },
        );
        for (name, axes) in pauli_pairs {
            table.insert(
                name,
                GateTranslation {
                    template: NativeTemplate::PauliRotation(axes),
                    transform: ParamTransform::Negate,
                },
            );
        }
        table
    });

/// CPHASE has no native constructor: build the target-qubit phase gate and
/// annotate it with the control. Both sides define the diagonal as
/// diag(1, e^{iλ}), so the angle passes through unchanged.
fn build_cphase(op: &GateOperation) -> Result<NativeGate, ConversionError> {
    let angle = ParamTransform::Identity.apply(op.gate().name(), op.params())?;
    let lambda = angle.ok_or_else(|| ConversionError::ParamCount {
        gate: op.gate().name().to_string(),
        expected: 1,
        got: 0,
    })?;
    let qubits = op.qubit_indices();
    let mut gate = NativeGate::new(NativeGateKind::Phase(lambda), vec![qubits[1]])?;
    gate.add_control_qubit(qubits[0], 1)?;
    Ok(gate)
}

fn dense_fallback(op: &GateOperation) -> Result<NativeGate, ConversionError> {
    let matrix = op
        .gate()
        .matrix()
        .ok_or_else(|| ConversionError::MissingMatrix {
            gate: op.gate().name().to_string(),
        })?;
    Ok(NativeGate::new(
        NativeGateKind::DenseMatrix(matrix),
        op.qubit_indices().to_vec(),
    )?)
}

/// Translate one gate operation into exactly one native gate.
pub fn convert_operation(op: &GateOperation) -> Result<NativeGate, ConversionError> {
    let name = op.gate().name();
    if name == "CPHASE" {
        return build_cphase(op);
    }
    if let Some(translation) = TRANSLATION_TABLE.get(name) {
        return translation.build(op);
    }
    dense_fallback(op)
}

/// Translate a whole circuit, preserving operation order.
///
/// Every operation must be a plain gate; operation kinds that act on raw
/// amplitudes have no gate-level translation and are routed around the
/// converter by the simulator.
pub fn convert_circuit(circuit: &Circuit) -> Result<NativeCircuit, ConversionError> {
    let mut native = NativeCircuit::new(circuit.n_qubits());
    for operation in circuit.operations() {
        match operation {
            Operation::Gate(op) => native.add_gate(convert_operation(op)?)?,
            Operation::MultiPhase(_) => return Err(ConversionError::NonNativeOperation),
        }
    }
    Ok(native)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_ir::{Gate, MultiPhaseOperation};
    use std::f64::consts::PI;

    fn op(gate: Gate, qubits: Vec<usize>) -> GateOperation {
        GateOperation::new(gate, qubits).unwrap()
    }

    #[test]
    fn every_table_gate_converts_to_its_native_name() {
        let cases: Vec<(GateOperation, &str)> = vec![
            (op(Gate::i(), vec![0]), "I"),
            (op(Gate::x(), vec![0]), "X"),
            (op(Gate::y(), vec![0]), "Y"),
            (op(Gate::z(), vec![0]), "Z"),
            (op(Gate::h(), vec![0]), "H"),
            (op(Gate::s(), vec![0]), "S"),
            (op(Gate::t(), vec![0]), "T"),
            (op(Gate::rx(0.3), vec![0]), "RX"),
            (op(Gate::ry(0.3), vec![0]), "RY"),
            (op(Gate::rz(0.3), vec![0]), "RZ"),
            (op(Gate::phase(0.3), vec![0]), "Phase"),
            (op(Gate::cnot(), vec![0, 1]), "CNOT"),
            (op(Gate::cz(), vec![0, 1]), "Z"),
            (op(Gate::swap(), vec![0, 1]), "SWAP"),
            (op(Gate::xx(0.3), vec![0, 1]), "PauliRotation"),
            (op(Gate::yy(0.3), vec![0, 1]), "PauliRotation"),
            (op(Gate::zz(0.3), vec![0, 1]), "PauliRotation"),
        ];
        for (operation, expected) in cases {
            let native = convert_operation(&operation).unwrap();
            assert_eq!(native.name(), expected, "for {}", operation.gate().name());
        }
    }

    #[test]
    fn rotations_negate_their_angle() {
        let native = convert_operation(&op(Gate::rx(PI / 3.0), vec![2])).unwrap();
        assert_eq!(native.kind(), &NativeGateKind::RotateX(-PI / 3.0));
        assert_eq!(native.targets(), &[2]);

        let native = convert_operation(&op(Gate::zz(0.7), vec![0, 1])).unwrap();
        assert_eq!(
            native.kind(),
            &NativeGateKind::PauliRotation {
                axes: vec![PauliAxis::Z, PauliAxis::Z],
                angle: -0.7,
            }
        );
    }

    #[test]
    fn phase_passes_its_angle_through() {
        let native = convert_operation(&op(Gate::phase(0.4), vec![1])).unwrap();
        assert_eq!(native.kind(), &NativeGateKind::Phase(0.4));
    }

    #[test]
    fn cz_becomes_a_controlled_z() {
        let native = convert_operation(&op(Gate::cz(), vec![0, 1])).unwrap();
        assert_eq!(native.kind(), &NativeGateKind::PauliZ);
        assert_eq!(native.targets(), &[1]);
        assert_eq!(native.control(), Some((0, 1)));
    }

    #[test]
    fn cphase_special_case_carries_a_control_annotation() {
        let native = convert_operation(&op(Gate::cphase(PI / 4.0), vec![2, 0])).unwrap();
        assert_eq!(native.kind(), &NativeGateKind::Phase(PI / 4.0));
        assert_eq!(native.targets(), &[0]);
        assert_eq!(native.control(), Some((2, 1)));
    }

    #[test]
    fn unknown_names_take_the_dense_fallback() {
        for operation in [
            op(Gate::sdag(), vec![0]),
            op(Gate::tdag(), vec![0]),
            op(Gate::xy(0.3), vec![0, 1]),
            op(Gate::ccnot(), vec![0, 1, 2]),
            op(Gate::cswap(), vec![0, 1, 2]),
        ] {
            let native = convert_operation(&operation).unwrap();
            assert_eq!(native.name(), "DenseMatrix", "for {}", operation.gate().name());
        }
    }

    #[test]
    fn custom_gates_carry_their_matrix_into_the_fallback() {
        let m = ndarray::arr2(&[
            [
                num_complex::Complex64::new(0.0, 0.0),
                num_complex::Complex64::new(0.0, -1.0),
            ],
            [
                num_complex::Complex64::new(0.0, 1.0),
                num_complex::Complex64::new(0.0, 0.0),
            ],
        ]);
        let gate = Gate::custom("MY_Y", m.clone()).unwrap();
        let native = convert_operation(&op(gate, vec![0])).unwrap();
        assert_eq!(native.kind(), &NativeGateKind::DenseMatrix(m));
    }

    #[test]
    fn non_parametric_misuse_fails_loudly() {
        assert!(matches!(
            ParamTransform::NotParametric.apply("X", &[0.1]),
            Err(ConversionError::NotParametric { got: 1, .. })
        ));
        assert!(matches!(
            ParamTransform::Negate.apply("RX", &[]),
            Err(ConversionError::ParamCount {
                expected: 1,
                got: 0,
                ..
            })
        ));
    }

    #[test]
    fn circuit_conversion_preserves_order_and_count() {
        let mut circuit = Circuit::new(2);
        circuit.push(op(Gate::h(), vec![0])).unwrap();
        circuit.push(op(Gate::cnot(), vec![0, 1])).unwrap();
        circuit.push(op(Gate::rx(0.2), vec![1])).unwrap();

        let native = convert_circuit(&circuit).unwrap();
        assert_eq!(native.n_qubits(), 2);
        assert_eq!(native.len(), 3);
        assert_eq!(native.gates()[0].name(), "H");
        assert_eq!(native.gates()[1].name(), "CNOT");
        assert_eq!(native.gates()[2].name(), "RX");
    }

    #[test]
    fn circuit_conversion_rejects_raw_state_operations() {
        let mut circuit = Circuit::new(1);
        circuit
            .push(MultiPhaseOperation::new(vec![0.0, PI]).unwrap())
            .unwrap();
        assert!(matches!(
            convert_circuit(&circuit),
            Err(ConversionError::NonNativeOperation)
        ));
    }
}
