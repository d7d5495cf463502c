//! Pauli-sum observables and exact expectation values.
//!
//! [`Observable::from_text`] parses the quantum-chemistry operator
//! encoding, one weighted Pauli string per `+`-separated term:
//!
//! ```text
//! 1.0 [Z0 Z1] + (0.5+0j) [X2] + 0.25 []
//! ```
//!
//! Coefficients are plain floats or parenthesized complex literals with a
//! trailing `j` imaginary unit. `[]` is the identity term. Qubit indices
//! follow the engine's little-endian basis convention.

use num_complex::Complex64;

use crate::error::{SvError, SvResult};
use crate::gate::PauliAxis;
use crate::pauli::PauliMasks;
use crate::state::NativeState;

/// One weighted Pauli string.
#[derive(Debug, Clone, PartialEq)]
pub struct PauliTerm {
    coefficient: Complex64,
    ops: Vec<(usize, PauliAxis)>,
}

impl PauliTerm {
    /// Build a term from a coefficient and (qubit, axis) factors.
    pub fn new(coefficient: Complex64, ops: Vec<(usize, PauliAxis)>) -> Self {
        Self { coefficient, ops }
    }

    /// The term's coefficient.
    pub fn coefficient(&self) -> Complex64 {
        self.coefficient
    }

    /// The (qubit, axis) factors.
    pub fn ops(&self) -> &[(usize, PauliAxis)] {
        &self.ops
    }

    /// ⟨ψ| c·P |ψ⟩ for this term against `state`.
    pub fn expectation_value(&self, state: &NativeState) -> SvResult<Complex64> {
        if let Some(&(qubit, _)) = self.ops.iter().max_by_key(|(q, _)| *q) {
            if qubit >= state.n_qubits() {
                return Err(SvError::QubitOutOfRange {
                    qubit,
                    n_qubits: state.n_qubits(),
                });
            }
        }
        let masks = PauliMasks::from_ops(self.ops.iter().copied());
        let amplitudes = state.vector();
        let mut sum = Complex64::new(0.0, 0.0);
        for (i, amp) in amplitudes.iter().enumerate() {
            let source = i ^ masks.flip;
            sum += amp.conj() * masks.source_phase(source) * amplitudes[source];
        }
        Ok(self.coefficient * sum)
    }
}

/// A sum of weighted Pauli strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Observable {
    terms: Vec<PauliTerm>,
}

impl Observable {
    /// Parse the textual Pauli-sum encoding.
    pub fn from_text(text: &str) -> SvResult<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        split_terms(trimmed)
            .into_iter()
            .map(parse_term)
            .collect::<SvResult<Vec<_>>>()
            .map(|terms| Self { terms })
    }

    /// The terms, in declaration order.
    pub fn terms(&self) -> &[PauliTerm] {
        &self.terms
    }

    /// Number of terms.
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// ⟨ψ| O |ψ⟩: the sum of per-term expectation values.
    pub fn expectation_value(&self, state: &NativeState) -> SvResult<Complex64> {
        let mut sum = Complex64::new(0.0, 0.0);
        for term in &self.terms {
            sum += term.expectation_value(state)?;
        }
        Ok(sum)
    }
}

/// Split on `+` at depth zero, so complex coefficients like `(1+2j)` stay
/// intact. An exponent sign (`1e+20`) is part of its float literal, not a
/// term separator.
fn split_terms(s: &str) -> Vec<&str> {
    let mut terms = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in s.char_indices() {
        match ch {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            '+' if depth == 0
                && !(i > 0 && matches!(s.as_bytes()[i - 1], b'e' | b'E')) =>
            {
                terms.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    terms.push(&s[start..]);
    terms
}

fn parse_term(s: &str) -> SvResult<PauliTerm> {
    let s = s.trim();
    let (coeff_str, ops_str) = match s.find('[') {
        Some(open) => {
            let close = s
                .rfind(']')
                .ok_or_else(|| SvError::ObservableParse(format!("unclosed bracket in '{s}'")))?;
            (&s[..open], &s[open + 1..close])
        }
        None => (s, ""),
    };
    let coeff_str = coeff_str.trim();
    let coefficient = if coeff_str.is_empty() {
        Complex64::new(1.0, 0.0)
    } else {
        parse_coefficient(coeff_str)?
    };
    let ops = ops_str
        .split_whitespace()
        .map(parse_factor)
        .collect::<SvResult<Vec<_>>>()?;
    Ok(PauliTerm::new(coefficient, ops))
}

/// A coefficient is a float, an imaginary literal (`2j`), or a
/// parenthesized complex literal (`(1.5-2j)`).
fn parse_coefficient(s: &str) -> SvResult<Complex64> {
    let bad = || SvError::ObservableParse(format!("bad coefficient '{s}'"));
    let inner = s
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(s);
    match inner.strip_suffix('j') {
        None => inner
            .parse::<f64>()
            .map(|re| Complex64::new(re, 0.0))
            .map_err(|_| bad()),
        Some(body) => {
            // Find the sign separating real and imaginary parts, skipping
            // a leading sign and exponent signs.
            let split = body
                .char_indices()
                .skip(1)
                .filter(|(i, c)| {
                    (*c == '+' || *c == '-')
                        && !matches!(body.as_bytes()[i - 1], b'e' | b'E')
                })
                .map(|(i, _)| i)
                .last();
            let (re_str, im_str) = match split {
                Some(i) => (&body[..i], &body[i..]),
                None => ("0", body),
            };
            let re = re_str.trim().parse::<f64>().map_err(|_| bad())?;
            let im = match im_str.trim() {
                "" | "+" => 1.0,
                "-" => -1.0,
                other => other.parse::<f64>().map_err(|_| bad())?,
            };
            Ok(Complex64::new(re, im))
        }
    }
}

fn parse_factor(s: &str) -> SvResult<(usize, PauliAxis)> {
    let mut chars = s.chars();
    let axis = match chars.next() {
        Some('X') => PauliAxis::X,
        Some('Y') => PauliAxis::Y,
        Some('Z') => PauliAxis::Z,
        _ => {
            return Err(SvError::ObservableParse(format!("bad Pauli factor '{s}'")));
        }
    };
    let qubit = chars
        .as_str()
        .parse::<usize>()
        .map_err(|_| SvError::ObservableParse(format!("bad qubit index in '{s}'")))?;
    Ok((qubit, axis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::{NativeGate, NativeGateKind};

    fn approx(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn parses_real_and_complex_coefficients() {
        let obs = Observable::from_text("1.0 [Z0 Z1] + (0.5+0j) [X2] + -0.25 []").unwrap();
        assert_eq!(obs.n_terms(), 3);
        assert!(approx(obs.terms()[0].coefficient(), Complex64::new(1.0, 0.0)));
        assert!(approx(obs.terms()[1].coefficient(), Complex64::new(0.5, 0.0)));
        assert!(approx(obs.terms()[2].coefficient(), Complex64::new(-0.25, 0.0)));
        assert_eq!(obs.terms()[0].ops(), &[(0, PauliAxis::Z), (1, PauliAxis::Z)]);
        assert!(obs.terms()[2].ops().is_empty());
    }

    #[test]
    fn parses_imaginary_literals() {
        let obs = Observable::from_text("(1.5-2j) [Y0]").unwrap();
        assert!(approx(obs.terms()[0].coefficient(), Complex64::new(1.5, -2.0)));

        let pure = Observable::from_text("2j [Z0]").unwrap();
        assert!(approx(pure.terms()[0].coefficient(), Complex64::new(0.0, 2.0)));
    }

    #[test]
    fn parses_exponent_coefficients() {
        let obs = Observable::from_text("1e+2 [Z0] + 2.5E-3 []").unwrap();
        assert_eq!(obs.n_terms(), 2);
        assert!(approx(obs.terms()[0].coefficient(), Complex64::new(100.0, 0.0)));
        assert!(approx(
            obs.terms()[1].coefficient(),
            Complex64::new(0.0025, 0.0)
        ));

        let complex = Observable::from_text("(1e-3+2j) [Y1]").unwrap();
        assert!(approx(
            complex.terms()[0].coefficient(),
            Complex64::new(0.001, 2.0)
        ));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(Observable::from_text("1.0 [Q0]").is_err());
        assert!(Observable::from_text("abc [Z0]").is_err());
        assert!(Observable::from_text("1.0 [Z0").is_err());
    }

    #[test]
    fn identity_expectation_is_the_norm() {
        let state = NativeState::new(3);
        let obs = Observable::from_text("2.5 []").unwrap();
        assert!(approx(
            obs.expectation_value(&state).unwrap(),
            Complex64::new(2.5, 0.0)
        ));
    }

    #[test]
    fn z_expectation_on_basis_states() {
        let mut state = NativeState::new(2);
        let z0 = Observable::from_text("1.0 [Z0]").unwrap();
        assert!(approx(
            z0.expectation_value(&state).unwrap(),
            Complex64::new(1.0, 0.0)
        ));

        let x = NativeGate::new(NativeGateKind::PauliX, vec![0]).unwrap();
        state.apply_gate(&x).unwrap();
        assert!(approx(
            z0.expectation_value(&state).unwrap(),
            Complex64::new(-1.0, 0.0)
        ));
    }

    #[test]
    fn x_expectation_on_plus_state() {
        let mut state = NativeState::new(1);
        let h = NativeGate::new(NativeGateKind::Hadamard, vec![0]).unwrap();
        state.apply_gate(&h).unwrap();
        let obs = Observable::from_text("1.0 [X0]").unwrap();
        assert!(approx(
            obs.expectation_value(&state).unwrap(),
            Complex64::new(1.0, 0.0)
        ));
    }

    #[test]
    fn y_expectation_uses_complex_phases() {
        // (|0⟩ + i|1⟩)/√2 is the +1 eigenstate of Y.
        let mut state = NativeState::new(1);
        let h = NativeGate::new(NativeGateKind::Hadamard, vec![0]).unwrap();
        let s = NativeGate::new(NativeGateKind::SGate, vec![0]).unwrap();
        state.apply_gate(&h).unwrap();
        state.apply_gate(&s).unwrap();
        let obs = Observable::from_text("1.0 [Y0]").unwrap();
        assert!(approx(
            obs.expectation_value(&state).unwrap(),
            Complex64::new(1.0, 0.0)
        ));
    }

    #[test]
    fn term_qubit_out_of_range_is_an_error() {
        let state = NativeState::new(1);
        let obs = Observable::from_text("1.0 [Z4]").unwrap();
        assert!(matches!(
            obs.expectation_value(&state),
            Err(SvError::QubitOutOfRange { qubit: 4, n_qubits: 1 })
        ));
    }
}
