//! Pauli-sum observables.
//!
//! An observable is a weighted sum of Pauli strings:
//!
//!   O = Σ_k  c_k · P_k
//!
//! where each P_k is a tensor product of single-qubit Pauli operators
//! (I, X, Y, Z) and c_k ∈ ℝ. The textual encoding follows the standard
//! quantum-chemistry operator format:
//!
//! ```text
//! 1.0 [Z0 Z1] + 0.5 []
//! ```
//!
//! where `[]` is the identity term.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{HalError, HalResult};

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliOp {
    /// Identity — dropped when building strings.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl fmt::Display for PauliOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            PauliOp::I => 'I',
            PauliOp::X => 'X',
            PauliOp::Y => 'Y',
            PauliOp::Z => 'Z',
        };
        write!(f, "{c}")
    }
}

/// A tensor product of Pauli operators on indexed qubits.
///
/// Stored as a sorted `Vec<(qubit_index, PauliOp)>` with identity factors
/// omitted. Qubits not listed are implicitly I.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauliString {
    ops: Vec<(usize, PauliOp)>,
}

impl PauliString {
    /// Construct from (qubit, op) pairs.
    ///
    /// Identity operators are dropped; the remaining ops are sorted by
    /// qubit.
    pub fn from_ops(ops: impl IntoIterator<Item = (usize, PauliOp)>) -> Self {
        let mut v: Vec<(usize, PauliOp)> = ops
            .into_iter()
            .filter(|(_, op)| *op != PauliOp::I)
            .collect();
        v.sort_by_key(|(q, _)| *q);
        Self { ops: v }
    }

    /// The non-identity (qubit, op) pairs, sorted by qubit index.
    pub fn ops(&self) -> &[(usize, PauliOp)] {
        &self.ops
    }

    /// True if there are no non-identity operators.
    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    /// The highest qubit index referenced, or `None` for the identity.
    pub fn max_qubit(&self) -> Option<usize> {
        self.ops.last().map(|(q, _)| *q)
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (qubit, op)) in self.ops.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{op}{qubit}")?;
        }
        Ok(())
    }
}

/// A single weighted Pauli term: `coeff · pauli`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauliSumTerm {
    /// Real coefficient.
    pub coeff: f64,
    /// The Pauli string.
    pub pauli: PauliString,
}

impl PauliSumTerm {
    /// Create a new term.
    pub fn new(coeff: f64, pauli: PauliString) -> Self {
        Self { coeff, pauli }
    }

    /// Shorthand: weighted identity term.
    pub fn identity(coeff: f64) -> Self {
        Self::new(coeff, PauliString::default())
    }
}

impl fmt::Display for PauliSumTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.coeff, self.pauli)
    }
}

/// A sum-of-Pauli-strings observable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PauliSum {
    terms: Vec<PauliSumTerm>,
}

impl PauliSum {
    /// Create from a list of terms.
    pub fn from_terms(terms: Vec<PauliSumTerm>) -> Self {
        Self { terms }
    }

    /// All terms, in declaration order.
    pub fn terms(&self) -> &[PauliSumTerm] {
        &self.terms
    }

    /// Number of terms.
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// The minimum register size this observable acts on.
    pub fn min_qubits(&self) -> usize {
        self.terms
            .iter()
            .filter_map(|t| t.pauli.max_qubit())
            .max()
            .map_or(0, |q| q + 1)
    }
}

impl FromIterator<PauliSumTerm> for PauliSum {
    fn from_iter<T: IntoIterator<Item = PauliSumTerm>>(iter: T) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for PauliSum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

impl FromStr for PauliSum {
    type Err = HalError;

    fn from_str(s: &str) -> HalResult<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        split_terms(trimmed)
            .into_iter()
            .map(parse_term)
            .collect::<HalResult<Vec<_>>>()
            .map(Self::from_terms)
    }
}

/// Split on `+` term separators. An exponent sign (`1e+20`) is part of its
/// float literal, not a separator.
fn split_terms(s: &str) -> Vec<&str> {
    let bytes = s.as_bytes();
    let mut terms = Vec::new();
    let mut start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'+' && i > 0 && !matches!(bytes[i - 1], b'e' | b'E') {
            terms.push(&s[start..i]);
            start = i + 1;
        }
    }
    terms.push(&s[start..]);
    terms
}

fn parse_term(s: &str) -> HalResult<PauliSumTerm> {
    let s = s.trim();
    let (coeff_str, ops_str) = match s.find('[') {
        Some(open) => {
            let close = s
                .rfind(']')
                .ok_or_else(|| HalError::ObservableParse(format!("unclosed bracket in '{s}'")))?;
            (&s[..open], &s[open + 1..close])
        }
        None => (s, ""),
    };
    let coeff_str = coeff_str.trim();
    let coeff = if coeff_str.is_empty() {
        1.0
    } else {
        coeff_str
            .parse::<f64>()
            .map_err(|_| HalError::ObservableParse(format!("bad coefficient '{coeff_str}'")))?
    };
    let ops = ops_str
        .split_whitespace()
        .map(parse_factor)
        .collect::<HalResult<Vec<_>>>()?;
    Ok(PauliSumTerm::new(coeff, PauliString::from_ops(ops)))
}

fn parse_factor(s: &str) -> HalResult<(usize, PauliOp)> {
    let mut chars = s.chars();
    let op = match chars.next() {
        Some('I') => PauliOp::I,
        Some('X') => PauliOp::X,
        Some('Y') => PauliOp::Y,
        Some('Z') => PauliOp::Z,
        _ => {
            return Err(HalError::ObservableParse(format!(
                "bad Pauli factor '{s}'"
            )));
        }
    };
    let qubit = chars
        .as_str()
        .parse::<usize>()
        .map_err(|_| HalError::ObservableParse(format!("bad qubit index in '{s}'")))?;
    Ok((qubit, op))
}
