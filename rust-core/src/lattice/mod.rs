// Lattice module: unit cell, supercell replication and the summation domain around the probe
// This module provides the geometry shared by every field engine and the parallel site scan.

// ======================== MODULE DECLARATIONS ========================
pub mod inscribed_sphere;
pub mod summation_domain;
pub mod supercell;
pub mod unit_cell;

// Test modules
mod _tests_lattice;

// ======================== CELLS ========================
pub use unit_cell::UnitCell;       // struct - lattice vectors as rows plus cached inverse
// UnitCell impl methods:
//   new(basis: Mat3) -> Result<Self>                   - rejects singular cells
//   from_rows(rows: &[[f64; 3]; 3]) -> Result<Self>    - rows are the lattice vectors a, b, c
//   cubic(a: f64) -> Result<Self>                      - simple cubic cell
//   to_cartesian(&self, frac: &Vec3) -> Vec3           - fractional → cartesian (row convention)
//   to_fractional(&self, cart: &Vec3) -> Vec3          - cartesian → fractional
//   basis / inverse / rows / volume

pub use supercell::Supercell;      // struct - strictly positive repeat counts along a, b, c
// Supercell impl methods:
//   new(repeats: [usize; 3]) -> Result<Self>           - rejects zero repeats
//   image_count(&self) -> usize                        - number of cell images
//   image(&self, index: usize) -> Vec3                 - (i, j, k) of a flat image index
//   centre_offset(&self) -> Vec3                       - integer half of each repeat count
//   lattice(&self, cell: &UnitCell) -> Mat3            - supercell lattice vectors

// ======================== SUMMATION DOMAIN ========================
pub use summation_domain::{
    LatticeSite,       // struct - atom image inside the sphere: position, displacement, distance
    SummationDomain,   // struct - cell + supercell + probe + radius, owns the parallel scan
};
// SummationDomain impl methods:
//   probe_cartesian(&self) -> Vec3                     - probe in the central cell
//   centred_cartesian(&self, frac: &Vec3) -> Vec3      - any fractional point moved to the central cell
//   inscribed_radius(&self) -> f64                     - largest sphere that fits in the supercell
//   scan(&self, positions, identity, visit, merge) -> A - fork-join fold over all sites within radius

pub use inscribed_sphere::largest_inscribed_sphere; // fn(cell, supercell, probe) -> f64
