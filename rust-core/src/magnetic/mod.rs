// Magnetic module: per-atom Fourier components, phases and the propagation vector
// This module also provides the helix decomposition used by the incommensurate sums.

// ======================== MODULE DECLARATIONS ========================
pub mod helix;
pub mod structure;


// ======================== STRUCTURE ========================
pub use structure::{
    fourier_component, // fn(real: &Vec3, imaginary: &Vec3) -> FourierComponent - combine sk and isk
    FourierComponent,  // type - Vector3<Complex64>, real part sk, imaginary part isk
    MagneticAtom,      // struct - fractional position, Fourier component, phase
    MagneticStructure, // struct - propagation vector K and the magnetic atoms of the cell
};
// MagneticAtom impl methods:
//   collinear(position, moment) -> Self             - real Fourier component, zero phase
//   real / imaginary(&self) -> Vec3                  - sk and isk
//   is_magnetic(&self) -> bool                       - any non-zero Fourier coefficient
//   moment_at(&self, propagation, image) -> Vec3     - cos(2π(K·R + φ))·sk + sin(2π(K·R + φ))·isk
// MagneticStructure impl methods:
//   from_flat(propagation, positions, fourier, phases) -> Result<Self> - checked flat buffers
//   positions(&self) -> Vec<Vec3>
//   retain_magnetic(&mut self) -> usize              - drop atoms with zero Fourier component

// ======================== HELIX ========================
pub use helix::{
    helix_decomposition, // fn(structure, domain) -> Report<Vec<HelixAtom>>
    HelixAtom,           // struct - staggered moment, unit vectors a and b, central-cell reference
};
