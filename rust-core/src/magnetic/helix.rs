// Helix decomposition: each incommensurate atom is described by a staggered moment m0 and two
// unit vectors a, b so that its moment at phase θ is m0·(cos θ·a + sin θ·b).

use crate::algebra::Vec3;
use crate::config::HELIX_TOLERANCE;
use crate::error::{record, Diagnostic, Report};
use crate::lattice::SummationDomain;
use crate::magnetic::structure::{MagneticAtom, MagneticStructure};

/// Helical description of one magnetic atom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HelixAtom {
    /// Staggered moment |sk| (μB).
    pub moment: f64,
    /// Unit vector along the real part.
    pub a: Vec3,
    /// Unit vector along the imaginary part.
    pub b: Vec3,
    /// Cartesian position of the atom in the central cell.
    pub reference: Vec3,
    pub phase: f64,
}

fn unit_or_zero(v: Vec3) -> (f64, Vec3) {
    let norm = v.norm();
    if norm > 0.0 {
        (norm, v / norm)
    } else {
        (0.0, Vec3::zeros())
    }
}

impl HelixAtom {
    fn from_atom(index: usize, atom: &MagneticAtom, domain: &SummationDomain, diagnostics: &mut Vec<Diagnostic>) -> Self {
        let (moment, a) = unit_or_zero(atom.real());
        let (imaginary_norm, b) = unit_or_zero(atom.imaginary());

        if (moment - imaginary_norm).abs() > HELIX_TOLERANCE {
            record(
                diagnostics,
                Diagnostic::UnequalHelixNorms {
                    atom: index,
                    real_norm: moment,
                    imaginary_norm,
                },
            );
        }
        let overlap = a.dot(&b);
        if overlap.abs() > HELIX_TOLERANCE {
            record(diagnostics, Diagnostic::NonOrthogonalHelix { atom: index, overlap });
        }
        if atom.phase.abs() > HELIX_TOLERANCE {
            record(
                diagnostics,
                Diagnostic::NonZeroPhase {
                    atom: index,
                    phase: atom.phase,
                },
            );
        }

        Self {
            moment,
            a,
            b,
            reference: domain.centred_cartesian(&atom.position),
            phase: atom.phase,
        }
    }
}

/// Decompose every atom of `structure` into its helix, collecting the
/// consistency diagnostics of all atoms.
pub fn helix_decomposition(structure: &MagneticStructure, domain: &SummationDomain) -> Report<Vec<HelixAtom>> {
    let mut diagnostics = Vec::new();
    let helices = structure
        .atoms
        .iter()
        .enumerate()
        .map(|(index, atom)| HelixAtom::from_atom(index, atom, domain, &mut diagnostics))
        .collect();
    Report::with_diagnostics(helices, diagnostics)
}
