//! Bit-mask bookkeeping shared by Pauli rotations and observable terms.

use num_complex::Complex64;

use crate::gate::PauliAxis;

/// Precomputed masks for a Pauli string over basis-index bits.
///
/// `flip` holds the X and Y positions (the bits the string toggles),
/// `phase` holds the Y and Z positions (the bits contributing ±1 signs),
/// and `n_y` counts Y factors for the overall i^{n_y} prefactor.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PauliMasks {
    pub(crate) flip: usize,
    pub(crate) phase: usize,
    pub(crate) n_y: u32,
}

impl PauliMasks {
    pub(crate) fn from_ops(ops: impl IntoIterator<Item = (usize, PauliAxis)>) -> Self {
        let mut flip = 0usize;
        let mut phase = 0usize;
        let mut n_y = 0u32;
        for (qubit, axis) in ops {
            let bit = 1usize << qubit;
            match axis {
                PauliAxis::X => flip |= bit,
                PauliAxis::Y => {
                    flip |= bit;
                    phase |= bit;
                    n_y += 1;
                }
                PauliAxis::Z => phase |= bit,
            }
        }
        Self { flip, phase, n_y }
    }

    /// The scalar φ in P|source⟩ = φ · |source ⊕ flip⟩.
    ///
    /// Y contributes i on a 0 bit and -i on a 1 bit; Z contributes -1 on a
    /// 1 bit. Folding the signs together gives i^{n_y} times a parity sign.
    pub(crate) fn source_phase(&self, source: usize) -> Complex64 {
        let i_pow = match self.n_y % 4 {
            0 => Complex64::new(1.0, 0.0),
            1 => Complex64::new(0.0, 1.0),
            2 => Complex64::new(-1.0, 0.0),
            _ => Complex64::new(0.0, -1.0),
        };
        if (source & self.phase).count_ones() % 2 == 0 {
            i_pow
        } else {
            -i_pow
        }
    }
}
