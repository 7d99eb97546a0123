// Constants

use serde::{Deserialize, Serialize};

// Tolerances
pub const HELIX_TOLERANCE: f64 = 1e-6; // Equal norm / orthogonality of helix vectors, contact rank matching
pub const SINGULARITY_TOLERANCE: f64 = 1e-12; // Relative determinant below which a cell is rejected
pub const MAGNETIC_MOMENT_TOLERANCE: f64 = 1e-8; // Fourier parts at or below this are treated as zero

// Contact hyperfine field
pub const CONTACT_SCALING_POWER: i32 = 3; // Neighbours are ranked and weighted by distance^3
pub const MAX_CONTACT_NEIGHBOURS: usize = 200;

/// Conversion factors from Bohr magnetons and Angstrom to tesla.
///
/// Every engine takes the same instance so that the three field types can
/// never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalConstants {
    /// (μ0/4π)·μB in T·Å³. One Bohr magneton at 1 Å gives 0.927 T.
    pub dipolar: f64,
    /// μ0·μB in T·Å³, used for the Lorentz sphere (μ0/3)·M.
    pub lorentz: f64,
    /// (2μ0/3)·μB in T·Å³, the Fermi contact prefactor.
    pub contact: f64,
}

impl PhysicalConstants {
    /// Lorentz field per unit summed moment inside a sphere of `radius` Å.
    pub fn lorentz_prefactor(&self, radius: f64) -> f64 {
        (self.lorentz / 3.0) * (3.0 / (4.0 * std::f64::consts::PI * radius.powi(3)))
    }
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            dipolar: 0.9274009,
            lorentz: 11.654064,
            contact: 7.769376,
        }
    }
}
