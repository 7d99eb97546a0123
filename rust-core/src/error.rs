//! Errors, numerical diagnostics and the [`Report`] wrapper.
//!
//! Configuration and resource problems abort an evaluation before the lattice
//! scan starts and surface as [`FieldError`]. Physically questionable input
//! (a helix whose real and imaginary parts are not orthogonal, contact piles
//! that disagree, ...) never aborts: it is logged and travels next to the
//! result as a [`Diagnostic`].

use std::collections::TryReserveError;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Errors raised by the field engines and the request boundary.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("Unknown calculation type '{0}', valid calculations are 's', 'r', 'i'")]
    UnknownCalculation(String),

    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Number of contact neighbours {requested} exceeds the maximum of {max}")]
    TooManyNeighbours { requested: usize, max: usize },

    #[error("Number of angles must be greater than 0")]
    InvalidAngleCount,

    #[error("Supercell repetitions must be strictly positive, got {0:?}")]
    InvalidSupercell([usize; 3]),

    #[error("Length mismatch for {what}: expected {expected}, found {found}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Rotation axis must be a non-zero vector")]
    ZeroRotationAxis,

    #[error("Unit cell is singular (determinant {determinant:e})")]
    SingularCell { determinant: f64 },

    #[error("Failed to allocate {what}")]
    Allocation {
        what: &'static str,
        #[source]
        source: TryReserveError,
    },

    #[error(
        "Evaluation produced {} diagnostic(s){}",
        .0.len(),
        .0.first().map(|d| format!(", first: {}", d)).unwrap_or_default()
    )]
    Inconsistent(Vec<Diagnostic>),
}

/// Which cutoff a [`Diagnostic::NonPositiveRadius`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RadiusKind {
    Sum,
    Contact,
}

/// Non-fatal findings collected while setting up or finishing an evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Diagnostic {
    /// Real and imaginary Fourier parts of a helical atom differ in length.
    UnequalHelixNorms {
        atom: usize,
        real_norm: f64,
        imaginary_norm: f64,
    },
    /// Real and imaginary Fourier parts of a helical atom are not orthogonal.
    NonOrthogonalHelix { atom: usize, overlap: f64 },
    /// The incommensurate engine received a non-zero phase; the sweep is
    /// shifted by 2π·phase.
    NonZeroPhase { atom: usize, phase: f64 },
    /// Cosine and sine contact piles disagree at `slot`; the slot is skipped.
    ContactRankMismatch {
        slot: usize,
        cosine_rank: Option<f64>,
        sine_rank: Option<f64>,
    },
    NonPositiveRadius { kind: RadiusKind, value: f64 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnequalHelixNorms {
                atom,
                real_norm,
                imaginary_norm,
            } => write!(
                f,
                "staggered moment of atom {} differs between real ({:e}) and imaginary ({:e}) parts",
                atom, real_norm, imaginary_norm
            ),
            Diagnostic::NonOrthogonalHelix { atom, overlap } => write!(
                f,
                "real and imaginary parts of atom {} are not orthogonal (overlap {:e})",
                atom, overlap
            ),
            Diagnostic::NonZeroPhase { atom, phase } => write!(
                f,
                "atom {} has phase {} in an incommensurate sum, angles are shifted accordingly",
                atom, phase
            ),
            Diagnostic::ContactRankMismatch {
                slot,
                cosine_rank,
                sine_rank,
            } => write!(
                f,
                "contact neighbour {} has ranks {:?} (cosine) and {:?} (sine)",
                slot, cosine_rank, sine_rank
            ),
            Diagnostic::NonPositiveRadius { kind, value } => {
                write!(f, "{:?} radius is <= 0 ({})", kind, value)
            }
        }
    }
}

/// A computed value together with the diagnostics produced on the way.
#[must_use = "a report may carry diagnostics that should be inspected"]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Report<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            diagnostics: Vec::new(),
        }
    }

    pub fn with_diagnostics(value: T, diagnostics: Vec<Diagnostic>) -> Self {
        Self { value, diagnostics }
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Report<U> {
        Report {
            value: f(self.value),
            diagnostics: self.diagnostics,
        }
    }

    /// Append diagnostics produced by an earlier stage.
    pub fn prepend(mut self, mut earlier: Vec<Diagnostic>) -> Self {
        earlier.append(&mut self.diagnostics);
        self.diagnostics = earlier;
        self
    }

    /// Treat any diagnostic as an error.
    pub fn into_strict(self) -> Result<T, FieldError> {
        if self.diagnostics.is_empty() {
            Ok(self.value)
        } else {
            Err(FieldError::Inconsistent(self.diagnostics))
        }
    }

    pub fn into_parts(self) -> (T, Vec<Diagnostic>) {
        (self.value, self.diagnostics)
    }
}

/// Log a diagnostic and keep it.
pub(crate) fn record(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    log::warn!("{}", diagnostic);
    diagnostics.push(diagnostic);
}
