// Summation domain: the finite set of lattice sites around the probe that enter the sums,
// and the parallel scan over them shared by all field engines.

use rayon::prelude::*;

use crate::algebra::Vec3;
use crate::lattice::inscribed_sphere::largest_inscribed_sphere;
use crate::lattice::supercell::Supercell;
use crate::lattice::unit_cell::UnitCell;

/// One atom image inside the summation sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeSite {
    /// Index of the atom in the unit cell.
    pub atom: usize,
    /// Integer translation (i, j, k) of the cell image.
    pub image: Vec3,
    /// Cartesian position of the atom image.
    pub position: Vec3,
    /// `position - probe`.
    pub displacement: Vec3,
    /// Length of `displacement`.
    pub distance: f64,
}

impl LatticeSite {
    /// Unit vector from the probe towards the site.
    pub fn direction(&self) -> Vec3 {
        self.displacement / self.distance
    }

    pub fn inv_cube(&self) -> f64 {
        1.0 / self.distance.powi(3)
    }
}

/// Unit cell, supercell, probe site and the radius of the summation sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummationDomain {
    pub cell: UnitCell,
    pub supercell: Supercell,
    /// Probe position, fractional coordinates of the unit cell.
    pub probe: Vec3,
    /// Only sites closer than this (Å) enter the sums.
    pub radius: f64,
}

impl SummationDomain {
    pub fn new(cell: UnitCell, supercell: Supercell, probe: Vec3, radius: f64) -> Self {
        Self {
            cell,
            supercell,
            probe,
            radius,
        }
    }

    /// Cartesian probe position, placed in the central cell of the supercell.
    pub fn probe_cartesian(&self) -> Vec3 {
        self.centred_cartesian(&self.probe)
    }

    /// Cartesian position of fractional `frac` moved to the central cell.
    pub fn centred_cartesian(&self, frac: &Vec3) -> Vec3 {
        self.cell.to_cartesian(&(frac + self.supercell.centre_offset()))
    }

    /// Radius of the largest sphere around the probe that fits in the supercell.
    pub fn inscribed_radius(&self) -> f64 {
        largest_inscribed_sphere(&self.cell, &self.supercell, &self.probe)
    }

    /// Visit every atom image closer than `radius` to the probe.
    ///
    /// Cell images are distributed over the rayon pool; each worker folds into
    /// its own accumulator created by `identity`, and accumulators of
    /// neighbouring partitions are combined left to right with `merge`. Within
    /// one image, atoms are visited in order.
    pub fn scan<A, I, F, M>(&self, positions: &[Vec3], identity: I, visit: F, merge: M) -> A
    where
        A: Send,
        I: Fn() -> A + Sync + Send,
        F: Fn(&mut A, &LatticeSite) + Sync + Send,
        M: Fn(A, A) -> A + Sync + Send,
    {
        let probe = self.probe_cartesian();
        log::debug!(
            "Scanning {:?} supercell, {} atoms, probe at {:?} (cart), radius {}",
            self.supercell.repeats(),
            positions.len(),
            probe.as_slice(),
            self.radius
        );

        (0..self.supercell.image_count())
            .into_par_iter()
            .fold(&identity, |mut acc, index| {
                let image = self.supercell.image(index);
                for (atom, frac) in positions.iter().enumerate() {
                    let position = self.cell.to_cartesian(&(frac + image));
                    let displacement = position - probe;
                    let distance = displacement.norm();
                    if distance < self.radius {
                        let site = LatticeSite {
                            atom,
                            image,
                            position,
                            displacement,
                            distance,
                        };
                        visit(&mut acc, &site);
                    }
                }
                acc
            })
            .reduce(&identity, merge)
    }
}
