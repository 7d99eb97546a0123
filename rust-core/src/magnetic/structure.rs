use std::f64::consts::PI;

use nalgebra::Vector3;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::algebra::Vec3;
use crate::config::MAGNETIC_MOMENT_TOLERANCE;
use crate::error::FieldError;

/// Complex Fourier component of a moment (μB): real part `sk`, imaginary part `isk`.
pub type FourierComponent = Vector3<Complex64>;

/// Build a Fourier component from its real and imaginary 3-vectors.
pub fn fourier_component(real: &Vec3, imaginary: &Vec3) -> FourierComponent {
    real.zip_map(imaginary, Complex64::new)
}

/// A magnetic atom of the unit cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MagneticAtom {
    /// Fractional coordinates in the unit cell.
    pub position: Vec3,
    pub fourier: FourierComponent,
    /// Phase in units of 2π.
    #[serde(default)]
    pub phase: f64,
}

impl MagneticAtom {
    pub fn new(position: Vec3, fourier: FourierComponent, phase: f64) -> Self {
        Self {
            position,
            fourier,
            phase,
        }
    }

    /// Atom with a real Fourier component and zero phase.
    pub fn collinear(position: Vec3, moment: Vec3) -> Self {
        Self::new(position, fourier_component(&moment, &Vec3::zeros()), 0.0)
    }

    pub fn real(&self) -> Vec3 {
        self.fourier.map(|c| c.re)
    }

    pub fn imaginary(&self) -> Vec3 {
        self.fourier.map(|c| c.im)
    }

    /// True when any real or imaginary part exceeds [`MAGNETIC_MOMENT_TOLERANCE`].
    pub fn is_magnetic(&self) -> bool {
        self.fourier
            .iter()
            .any(|c| c.re.abs() > MAGNETIC_MOMENT_TOLERANCE || c.im.abs() > MAGNETIC_MOMENT_TOLERANCE)
    }

    /// Moment of this atom in cell image `image` for propagation vector `k`:
    /// `cos(2π(k·R + φ))·sk + sin(2π(k·R + φ))·isk`.
    pub fn moment_at(&self, propagation: &Vec3, image: &Vec3) -> Vec3 {
        let (s, c) = (2.0 * PI * (propagation.dot(image) + self.phase)).sin_cos();
        self.real() * c + self.imaginary() * s
    }
}

/// Propagation vector plus the magnetic atoms of one unit cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagneticStructure {
    /// Propagation vector K, reciprocal lattice units.
    pub propagation: Vec3,
    pub atoms: Vec<MagneticAtom>,
}

impl MagneticStructure {
    pub fn new(propagation: Vec3, atoms: Vec<MagneticAtom>) -> Self {
        Self { propagation, atoms }
    }

    /// Build a structure from flat per-atom buffers.
    ///
    /// `positions` holds 3 values per atom, `fourier` 6 (real x, y, z then
    /// imaginary x, y, z) and `phases` 1. All lengths must describe the same
    /// number of atoms.
    pub fn from_flat(
        propagation: Vec3,
        positions: &[f64],
        fourier: &[f64],
        phases: &[f64],
    ) -> Result<Self, FieldError> {
        let count = positions.len() / 3;
        if positions.len() != 3 * count {
            return Err(FieldError::LengthMismatch {
                what: "positions",
                expected: 3 * count,
                found: positions.len(),
            });
        }
        if fourier.len() != 6 * count {
            return Err(FieldError::LengthMismatch {
                what: "fourier components",
                expected: 6 * count,
                found: fourier.len(),
            });
        }
        if phases.len() != count {
            return Err(FieldError::LengthMismatch {
                what: "phases",
                expected: count,
                found: phases.len(),
            });
        }

        let atoms = positions
            .chunks_exact(3)
            .zip(fourier.chunks_exact(6))
            .zip(phases)
            .map(|((p, f), &phase)| {
                let real = Vector3::new(f[0], f[1], f[2]);
                let imaginary = Vector3::new(f[3], f[4], f[5]);
                MagneticAtom::new(
                    Vector3::new(p[0], p[1], p[2]),
                    fourier_component(&real, &imaginary),
                    phase,
                )
            })
            .collect();
        Ok(Self::new(propagation, atoms))
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn positions(&self) -> Vec<Vec3> {
        self.atoms.iter().map(|atom| atom.position).collect()
    }

    /// Drop atoms whose Fourier component vanishes. Returns how many were removed.
    pub fn retain_magnetic(&mut self) -> usize {
        let before = self.atoms.len();
        self.atoms.retain(MagneticAtom::is_magnetic);
        before - self.atoms.len()
    }
}
