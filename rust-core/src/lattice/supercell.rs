use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::algebra::{self, Mat3, Vec3};
use crate::error::FieldError;
use crate::lattice::unit_cell::UnitCell;

/// Rectangular replication of the unit cell along its three lattice vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[usize; 3]", into = "[usize; 3]")]
pub struct Supercell {
    repeats: [usize; 3],
}

impl Supercell {
    pub fn new(repeats: [usize; 3]) -> Result<Self, FieldError> {
        if repeats.iter().any(|&n| n == 0) {
            return Err(FieldError::InvalidSupercell(repeats));
        }
        Ok(Self { repeats })
    }

    pub fn repeats(&self) -> [usize; 3] {
        self.repeats
    }

    /// Number of cell images, i.e. iterations of the outer scan loop.
    pub fn image_count(&self) -> usize {
        self.repeats.iter().product()
    }

    /// Integer translation of image `index`; the last axis varies fastest.
    pub fn image(&self, index: usize) -> Vec3 {
        let [_, ny, nz] = self.repeats;
        let k = index % nz;
        let j = (index / nz) % ny;
        let i = index / (ny * nz);
        Vector3::new(i as f64, j as f64, k as f64)
    }

    /// Integer half of each repeat count; the probe is shifted by it so that
    /// it sits in the central cell.
    pub fn centre_offset(&self) -> Vec3 {
        let [nx, ny, nz] = self.repeats;
        Vector3::new((nx / 2) as f64, (ny / 2) as f64, (nz / 2) as f64)
    }

    /// Lattice vectors of the whole supercell (rows).
    pub fn lattice(&self, cell: &UnitCell) -> Mat3 {
        let [nx, ny, nz] = self.repeats;
        algebra::diag(nx as f64, ny as f64, nz as f64) * cell.basis()
    }
}

impl TryFrom<[usize; 3]> for Supercell {
    type Error = FieldError;

    fn try_from(repeats: [usize; 3]) -> Result<Self, Self::Error> {
        Supercell::new(repeats)
    }
}

impl From<Supercell> for [usize; 3] {
    fn from(supercell: Supercell) -> Self {
        supercell.repeats
    }
}
