//! Unitary matrices for the built-in gate set.
//!
//! Matrix basis ordering is big-endian: the first qubit an operation lists is
//! the most significant bit of the matrix row/column index.

use ndarray::{Array2, arr2};
use num_complex::Complex64;
use std::f64::consts::FRAC_PI_4;

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

fn r(re: f64) -> Complex64 {
    Complex64::new(re, 0.0)
}

fn diagonal(entries: &[Complex64]) -> Array2<Complex64> {
    let mut m = Array2::zeros((entries.len(), entries.len()));
    for (i, entry) in entries.iter().enumerate() {
        m[(i, i)] = *entry;
    }
    m
}

/// Identity matrix with one pair of rows exchanged.
fn permutation(dim: usize, swap: (usize, usize)) -> Array2<Complex64> {
    let mut m = Array2::zeros((dim, dim));
    for i in 0..dim {
        let j = match i {
            _ if i == swap.0 => swap.1,
            _ if i == swap.1 => swap.0,
            _ => i,
        };
        m[(i, j)] = r(1.0);
    }
    m
}

/// Number of qubits a built-in gate acts on, or `None` for unknown names.
pub(crate) fn builtin_arity(name: &str) -> Option<usize> {
    match name {
        "I" | "X" | "Y" | "Z" | "H" | "S" | "Sdag" | "T" | "Tdag" | "RX" | "RY" | "RZ"
        | "PHASE" => Some(1),
        "CNOT" | "CZ" | "CPHASE" | "SWAP" | "XX" | "YY" | "ZZ" | "XY" => Some(2),
        "CCNOT" | "CSWAP" => Some(3),
        _ => None,
    }
}

/// Unitary matrix of a built-in gate, or `None` for unknown names or a
/// parametric gate invoked without its angle.
pub(crate) fn builtin_matrix(name: &str, params: &[f64]) -> Option<Array2<Complex64>> {
    let matrix = match name {
        "I" => diagonal(&[r(1.0), r(1.0)]),
        "X" => arr2(&[[r(0.0), r(1.0)], [r(1.0), r(0.0)]]),
        "Y" => arr2(&[[r(0.0), c(0.0, -1.0)], [c(0.0, 1.0), r(0.0)]]),
        "Z" => diagonal(&[r(1.0), r(-1.0)]),
        "H" => {
            let h = 1.0 / 2.0_f64.sqrt();
            arr2(&[[r(h), r(h)], [r(h), r(-h)]])
        }
        "S" => diagonal(&[r(1.0), c(0.0, 1.0)]),
        "Sdag" => diagonal(&[r(1.0), c(0.0, -1.0)]),
        "T" => diagonal(&[r(1.0), Complex64::from_polar(1.0, FRAC_PI_4)]),
        "Tdag" => diagonal(&[r(1.0), Complex64::from_polar(1.0, -FRAC_PI_4)]),
        "RX" => {
            let half = params.first()? / 2.0;
            let (cos, sin) = (half.cos(), half.sin());
            arr2(&[[r(cos), c(0.0, -sin)], [c(0.0, -sin), r(cos)]])
        }
        "RY" => {
            let half = params.first()? / 2.0;
            let (cos, sin) = (half.cos(), half.sin());
            arr2(&[[r(cos), r(-sin)], [r(sin), r(cos)]])
        }
        "RZ" => {
            let half = params.first()? / 2.0;
            diagonal(&[
                Complex64::from_polar(1.0, -half),
                Complex64::from_polar(1.0, half),
            ])
        }
        "PHASE" => {
            let theta = *params.first()?;
            diagonal(&[r(1.0), Complex64::from_polar(1.0, theta)])
        }
        "CNOT" => permutation(4, (2, 3)),
        "CZ" => diagonal(&[r(1.0), r(1.0), r(1.0), r(-1.0)]),
        "CPHASE" => {
            let theta = *params.first()?;
            diagonal(&[r(1.0), r(1.0), r(1.0), Complex64::from_polar(1.0, theta)])
        }
        "SWAP" => permutation(4, (1, 2)),
        "XX" => {
            let half = params.first()? / 2.0;
            let (cos, sin) = (r(half.cos()), c(0.0, -half.sin()));
            arr2(&[
                [cos, r(0.0), r(0.0), sin],
                [r(0.0), cos, sin, r(0.0)],
                [r(0.0), sin, cos, r(0.0)],
                [sin, r(0.0), r(0.0), cos],
            ])
        }
        "YY" => {
            let half = params.first()? / 2.0;
            let (cos, minus, plus) = (r(half.cos()), c(0.0, -half.sin()), c(0.0, half.sin()));
            arr2(&[
                [cos, r(0.0), r(0.0), plus],
                [r(0.0), cos, minus, r(0.0)],
                [r(0.0), minus, cos, r(0.0)],
                [plus, r(0.0), r(0.0), cos],
            ])
        }
        "ZZ" => {
            let half = params.first()? / 2.0;
            let (back, forth) = (
                Complex64::from_polar(1.0, -half),
                Complex64::from_polar(1.0, half),
            );
            diagonal(&[back, forth, forth, back])
        }
        "XY" => {
            let half = params.first()? / 2.0;
            let (cos, sin) = (r(half.cos()), c(0.0, half.sin()));
            arr2(&[
                [r(1.0), r(0.0), r(0.0), r(0.0)],
                [r(0.0), cos, sin, r(0.0)],
                [r(0.0), sin, cos, r(0.0)],
                [r(0.0), r(0.0), r(0.0), r(1.0)],
            ])
        }
        "CCNOT" => permutation(8, (6, 7)),
        "CSWAP" => permutation(8, (5, 6)),
        _ => return None,
    };
    Some(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn assert_unitary(m: &Array2<Complex64>) {
        let dim = m.nrows();
        for i in 0..dim {
            for j in 0..dim {
                let mut dot = Complex64::new(0.0, 0.0);
                for k in 0..dim {
                    dot += m[(k, i)].conj() * m[(k, j)];
                }
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(
                    (dot - Complex64::new(expected, 0.0)).norm() < 1e-12,
                    "columns {i}, {j} not orthonormal"
                );
            }
        }
    }

    #[test]
    fn all_builtin_matrices_are_unitary() {
        for name in [
            "I", "X", "Y", "Z", "H", "S", "Sdag", "T", "Tdag", "CNOT", "CZ", "SWAP", "CCNOT",
            "CSWAP",
        ] {
            let m = builtin_matrix(name, &[]).unwrap();
            assert_unitary(&m);
        }
        for name in ["RX", "RY", "RZ", "PHASE", "CPHASE", "XX", "YY", "ZZ", "XY"] {
            let m = builtin_matrix(name, &[0.37]).unwrap();
            assert_unitary(&m);
        }
    }

    #[test]
    fn parametric_gate_without_angle_has_no_matrix() {
        assert!(builtin_matrix("RX", &[]).is_none());
        assert!(builtin_matrix("CPHASE", &[]).is_none());
    }

    #[test]
    fn unknown_name_has_no_matrix() {
        assert!(builtin_matrix("FOO", &[1.0]).is_none());
        assert!(builtin_arity("FOO").is_none());
    }

    #[test]
    fn cnot_flips_target_when_control_set() {
        let m = builtin_matrix("CNOT", &[]).unwrap();
        // |10> -> |11>, first qubit (control) is the most significant bit.
        assert_eq!(m[(3, 2)], Complex64::new(1.0, 0.0));
        assert_eq!(m[(2, 3)], Complex64::new(1.0, 0.0));
        assert_eq!(m[(0, 0)], Complex64::new(1.0, 0.0));
    }

    #[test]
    fn xx_full_turn_is_minus_i_times_swap_of_parity() {
        let m = builtin_matrix("XX", &[PI]).unwrap();
        // exp(-i pi/2 XX) = -i XX
        assert!((m[(0, 3)] - Complex64::new(0.0, -1.0)).norm() < 1e-12);
        assert!((m[(0, 0)]).norm() < 1e-12);
    }

    #[test]
    fn xy_mixes_the_single_excitation_subspace_with_plus_i_sin() {
        let theta = 0.8;
        let m = builtin_matrix("XY", &[theta]).unwrap();
        let half = theta / 2.0;
        assert!((m[(1, 2)] - Complex64::new(0.0, half.sin())).norm() < 1e-12);
        assert!((m[(2, 1)] - Complex64::new(0.0, half.sin())).norm() < 1e-12);
        assert!((m[(1, 1)] - Complex64::new(half.cos(), 0.0)).norm() < 1e-12);
        assert_eq!(m[(0, 0)], Complex64::new(1.0, 0.0));
        assert_eq!(m[(3, 3)], Complex64::new(1.0, 0.0));
    }

    proptest::proptest! {
        #[test]
        fn parametric_matrices_stay_unitary(theta in -10.0f64..10.0) {
            for name in ["RX", "RY", "RZ", "PHASE", "CPHASE", "XX", "YY", "ZZ", "XY"] {
                let m = builtin_matrix(name, &[theta]).unwrap();
                assert_unitary(&m);
            }
        }
    }
}
