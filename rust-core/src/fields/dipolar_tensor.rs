use crate::algebra::{dipolar_kernel_tensor, Mat3, Vec3};
use crate::lattice::SummationDomain;

/// Dipolar tensor `Σ (3 r⊗r/n⁵ − I/n³)` over every atom image within the domain radius (Å⁻³).
///
/// Moments are not consulted; contracting the result with a moment and the
/// dipolar constant gives the dipolar field of a ferromagnetic arrangement.
pub fn dipolar_tensor(domain: &SummationDomain, positions: &[Vec3]) -> Mat3 {
    domain.scan(
        positions,
        Mat3::zeros,
        |tensor, site| *tensor += dipolar_kernel_tensor(&site.displacement, site.distance),
        |left, right| left + right,
    )
}
