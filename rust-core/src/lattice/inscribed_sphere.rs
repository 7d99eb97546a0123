use crate::algebra::Vec3;
use crate::lattice::supercell::Supercell;
use crate::lattice::unit_cell::UnitCell;

/// Radius of the largest sphere centred on the probe that fits inside the supercell.
///
/// The probe is placed in the central cell as in the field sums; the result
/// is its shortest distance to the six faces of the supercell. A summation
/// radius below this value never reaches the supercell boundary.
pub fn largest_inscribed_sphere(cell: &UnitCell, supercell: &Supercell, probe: &Vec3) -> f64 {
    let lattice = supercell.lattice(cell);
    let centre = cell.to_cartesian(&(probe + supercell.centre_offset()));
    let rows: [Vec3; 3] = [
        lattice.row(0).transpose(),
        lattice.row(1).transpose(),
        lattice.row(2).transpose(),
    ];

    let mut shortest = f64::INFINITY;
    for k in 0..3 {
        let spanning = (rows[(k + 1) % 3], rows[(k + 2) % 3]);
        let normal = spanning.0.cross(&spanning.1).normalize();
        // face through the origin and the opposite face shifted by the third vector
        shortest = shortest
            .min(normal.dot(&centre).abs())
            .min(normal.dot(&(centre - rows[k])).abs());
    }
    shortest
}
