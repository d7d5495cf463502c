//! Statevector storage and gate kernels.
//!
//! Amplitudes are indexed little-endian: qubit `q` is bit `q` of the basis
//! index, so `|q0=1, q1=0⟩` of a two-qubit register is index 1. Callers
//! with a different bit convention permute on the way in and out.

use num_complex::Complex64;

use crate::error::{SvError, SvResult};
use crate::gate::{NativeGate, NativeGateKind, PauliAxis};
use crate::pauli::PauliMasks;

/// Control-qubit predicate over basis indices.
#[derive(Debug, Clone, Copy)]
struct ControlMask {
    mask: usize,
    value: usize,
}

impl ControlMask {
    fn none() -> Self {
        Self { mask: 0, value: 0 }
    }

    fn single(qubit: usize, value: u8) -> Self {
        let mask = 1 << qubit;
        Self {
            mask,
            value: if value == 0 { 0 } else { mask },
        }
    }

    fn satisfied(self, index: usize) -> bool {
        index & self.mask == self.value
    }
}

/// A statevector over `n_qubits` qubits.
pub struct NativeState {
    amplitudes: Vec<Complex64>,
    n_qubits: usize,
}

impl NativeState {
    /// Create a state initialized to `|0...0⟩`.
    pub fn new(n_qubits: usize) -> Self {
        let size = 1 << n_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            n_qubits,
        }
    }

    /// Replace the amplitudes wholesale. The vector length must be
    /// `2^n_qubits`.
    pub fn load(&mut self, amplitudes: &[Complex64]) -> SvResult<()> {
        if amplitudes.len() != self.amplitudes.len() {
            return Err(SvError::AmplitudeLength {
                expected: self.amplitudes.len(),
                got: amplitudes.len(),
            });
        }
        self.amplitudes.copy_from_slice(amplitudes);
        Ok(())
    }

    /// The amplitude vector, little-endian indexed.
    pub fn vector(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Mutable access to the amplitudes, for in-place transforms.
    pub fn vector_mut(&mut self) -> &mut [Complex64] {
        &mut self.amplitudes
    }

    /// Register size.
    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    /// Apply one gate, bounds-checking its qubits against the register.
    pub fn apply_gate(&mut self, gate: &NativeGate) -> SvResult<()> {
        if let Some(qubit) = gate.max_qubit() {
            if qubit >= self.n_qubits {
                return Err(SvError::QubitOutOfRange {
                    qubit,
                    n_qubits: self.n_qubits,
                });
            }
        }
        let ctrl = match gate.control() {
            Some((qubit, value)) => ControlMask::single(qubit, value),
            None => ControlMask::none(),
        };
        let targets = gate.targets();
        match gate.kind() {
            NativeGateKind::Identity => {}
            NativeGateKind::PauliX => self.apply_x(targets[0], ctrl),
            NativeGateKind::PauliY => self.apply_y(targets[0], ctrl),
            NativeGateKind::PauliZ => self.apply_z(targets[0], ctrl),
            NativeGateKind::Hadamard => self.apply_h(targets[0], ctrl),
            NativeGateKind::SGate => self.apply_phase(targets[0], std::f64::consts::FRAC_PI_2, ctrl),
            NativeGateKind::TGate => self.apply_phase(targets[0], std::f64::consts::FRAC_PI_4, ctrl),
            NativeGateKind::RotateX(theta) => self.apply_rx(targets[0], *theta, ctrl),
            NativeGateKind::RotateY(theta) => self.apply_ry(targets[0], *theta, ctrl),
            NativeGateKind::RotateZ(theta) => self.apply_rz(targets[0], *theta, ctrl),
            NativeGateKind::Phase(lambda) => self.apply_phase(targets[0], *lambda, ctrl),
            NativeGateKind::Cnot => self.apply_cnot(targets[0], targets[1], ctrl),
            NativeGateKind::Swap => self.apply_swap(targets[0], targets[1], ctrl),
            NativeGateKind::PauliRotation { axes, angle } => {
                self.apply_pauli_rotation(targets, axes, *angle, ctrl);
            }
            NativeGateKind::DenseMatrix(matrix) => self.apply_dense(targets, matrix, ctrl),
        }
        Ok(())
    }

    fn apply_x(&mut self, qubit: usize, ctrl: ControlMask) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.n_qubits) {
            if i & mask == 0 && ctrl.satisfied(i) {
                let j = i | mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_y(&mut self, qubit: usize, ctrl: ControlMask) {
        let mask = 1 << qubit;
        let i_val = Complex64::new(0.0, 1.0);
        for i in 0..(1 << self.n_qubits) {
            if i & mask == 0 && ctrl.satisfied(i) {
                let j = i | mask;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = -i_val * self.amplitudes[j];
                self.amplitudes[j] = i_val * tmp;
            }
        }
    }

    fn apply_z(&mut self, qubit: usize, ctrl: ControlMask) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.n_qubits) {
            if i & mask != 0 && ctrl.satisfied(i) {
                self.amplitudes[i] = -self.amplitudes[i];
            }
        }
    }

    fn apply_h(&mut self, qubit: usize, ctrl: ControlMask) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..(1 << self.n_qubits) {
            if i & mask == 0 && ctrl.satisfied(i) {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_phase(&mut self, qubit: usize, lambda: f64, ctrl: ControlMask) {
        let mask = 1 << qubit;
        let phase = Complex64::from_polar(1.0, lambda);
        for i in 0..(1 << self.n_qubits) {
            if i & mask != 0 && ctrl.satisfied(i) {
                self.amplitudes[i] *= phase;
            }
        }
    }

    // Rotations follow the exp(+iθP/2) sign convention.

    fn apply_rx(&mut self, qubit: usize, theta: f64, ctrl: ControlMask) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let i_s = Complex64::new(0.0, (theta / 2.0).sin());
        for i in 0..(1 << self.n_qubits) {
            if i & mask == 0 && ctrl.satisfied(i) {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a + i_s * b;
                self.amplitudes[j] = i_s * a + c * b;
            }
        }
    }

    fn apply_ry(&mut self, qubit: usize, theta: f64, ctrl: ControlMask) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        for i in 0..(1 << self.n_qubits) {
            if i & mask == 0 && ctrl.satisfied(i) {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a + s * b;
                self.amplitudes[j] = -s * a + c * b;
            }
        }
    }

    fn apply_rz(&mut self, qubit: usize, theta: f64, ctrl: ControlMask) {
        let mask = 1 << qubit;
        let phase_0 = Complex64::from_polar(1.0, theta / 2.0);
        let phase_1 = Complex64::from_polar(1.0, -theta / 2.0);
        for i in 0..(1 << self.n_qubits) {
            if ctrl.satisfied(i) {
                if i & mask == 0 {
                    self.amplitudes[i] *= phase_0;
                } else {
                    self.amplitudes[i] *= phase_1;
                }
            }
        }
    }

    fn apply_cnot(&mut self, control: usize, target: usize, ctrl: ControlMask) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..(1 << self.n_qubits) {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) && ctrl.satisfied(i) {
                let j = i | tgt_mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_swap(&mut self, q1: usize, q2: usize, ctrl: ControlMask) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        for i in 0..(1 << self.n_qubits) {
            let b1 = (i & mask1) != 0;
            let b2 = (i & mask2) != 0;
            if b1 && !b2 && ctrl.satisfied(i) {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }

    /// ψ' = cos(θ/2)·ψ + i·sin(θ/2)·Pψ, where P is the Pauli string.
    fn apply_pauli_rotation(
        &mut self,
        targets: &[usize],
        axes: &[PauliAxis],
        theta: f64,
        ctrl: ControlMask,
    ) {
        let masks = PauliMasks::from_ops(targets.iter().copied().zip(axes.iter().copied()));
        let c = Complex64::new((theta / 2.0).cos(), 0.0);
        let i_s = Complex64::new(0.0, (theta / 2.0).sin());

        if masks.flip == 0 {
            // All-Z string: diagonal update.
            for i in 0..(1 << self.n_qubits) {
                if ctrl.satisfied(i) {
                    self.amplitudes[i] *= c + i_s * masks.source_phase(i);
                }
            }
            return;
        }

        // Index pairs {i, i ^ flip} are processed once, keyed off the
        // highest flipped bit being 0.
        let top = 1usize << (usize::BITS - 1 - masks.flip.leading_zeros() as u32);
        for i in 0..(1 << self.n_qubits) {
            if i & top == 0 && ctrl.satisfied(i) {
                let j = i ^ masks.flip;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a + i_s * masks.source_phase(j) * b;
                self.amplitudes[j] = c * b + i_s * masks.source_phase(i) * a;
            }
        }
    }

    fn apply_dense(
        &mut self,
        targets: &[usize],
        matrix: &ndarray::Array2<Complex64>,
        ctrl: ControlMask,
    ) {
        let k = targets.len();
        let sub_dim = 1usize << k;
        let target_mask: usize = targets.iter().map(|q| 1usize << q).sum();

        // Physical index offset for each matrix sub-index. The first target
        // is the most significant bit of the sub-index.
        let offsets: Vec<usize> = (0..sub_dim)
            .map(|r| {
                targets
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| (r >> (k - 1 - j)) & 1 == 1)
                    .map(|(_, q)| 1usize << q)
                    .sum()
            })
            .collect();

        let mut scratch = vec![Complex64::new(0.0, 0.0); sub_dim];
        for base in 0..(1 << self.n_qubits) {
            if base & target_mask != 0 || !ctrl.satisfied(base) {
                continue;
            }
            for (r, offset) in offsets.iter().enumerate() {
                scratch[r] = self.amplitudes[base | offset];
            }
            for (r, offset) in offsets.iter().enumerate() {
                let mut acc = Complex64::new(0.0, 0.0);
                for (col, amp) in scratch.iter().enumerate() {
                    acc += matrix[[r, col]] * amp;
                }
                self.amplitudes[base | offset] = acc;
            }
        }
    }
}
