use nalgebra::Matrix3;

use crate::algebra::{Mat3, Vec3};

/// Field of a point dipole `m` seen along the unit vector `u`, without prefactor.
#[inline]
pub fn dipolar_kernel(m: &Vec3, u: &Vec3, inv_cube: f64) -> Vec3 {
    (u * (3.0 * m.dot(u)) - m) * inv_cube
}

/// Point-dipole interaction tensor for displacement `r` of length `n`.
///
/// See Yaouanc & Dalmas de Réotier, *Muon Spin Rotation, Relaxation, and
/// Resonance*, p. 81.
#[inline]
pub fn dipolar_kernel_tensor(r: &Vec3, n: f64) -> Mat3 {
    let inv_cube = 1.0 / n.powi(3);
    let inv_fifth = 1.0 / n.powi(5);
    (r * r.transpose()) * (3.0 * inv_fifth) - Matrix3::identity() * inv_cube
}
