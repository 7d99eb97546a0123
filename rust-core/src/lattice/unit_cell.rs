use serde::{Deserialize, Serialize};

use crate::algebra::{self, Mat3, Vec3};
use crate::error::FieldError;

/// A unit cell given by three lattice vectors stored as matrix rows (Å).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitCell {
    basis: Mat3,
    inverse: Mat3,
}

impl UnitCell {
    /// Build a cell from its basis, rejecting degenerate cells.
    pub fn new(basis: Mat3) -> Result<Self, FieldError> {
        let inverse = algebra::inverse(&basis)?;
        Ok(Self { basis, inverse })
    }

    pub fn from_rows(rows: &[[f64; 3]; 3]) -> Result<Self, FieldError> {
        Self::new(algebra::from_rows(rows))
    }

    /// Simple cubic cell with side `a`.
    pub fn cubic(a: f64) -> Result<Self, FieldError> {
        Self::new(algebra::diag(a, a, a))
    }

    pub fn basis(&self) -> &Mat3 {
        &self.basis
    }

    pub fn inverse(&self) -> &Mat3 {
        &self.inverse
    }

    pub fn rows(&self) -> [[f64; 3]; 3] {
        algebra::to_rows(&self.basis)
    }

    /// Fractional (u,v,w) → cartesian.
    pub fn to_cartesian(&self, frac: &Vec3) -> Vec3 {
        algebra::row_times(frac, &self.basis)
    }

    /// Cartesian → fractional (u,v,w).
    pub fn to_fractional(&self, cart: &Vec3) -> Vec3 {
        algebra::row_times(cart, &self.inverse)
    }

    pub fn volume(&self) -> f64 {
        algebra::determinant(&self.basis).abs()
    }
}

/// Serialised as the three lattice vectors.
#[derive(Serialize, Deserialize)]
struct CellRows([[f64; 3]; 3]);

impl Serialize for UnitCell {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        CellRows(self.rows()).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for UnitCell {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let CellRows(rows) = CellRows::deserialize(deserializer)?;
        UnitCell::from_rows(&rows).map_err(serde::de::Error::custom)
    }
}
