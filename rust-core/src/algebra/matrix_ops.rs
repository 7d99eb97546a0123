use nalgebra::{Matrix3, Vector3};

use crate::algebra::{Mat3, Vec3};
use crate::config::SINGULARITY_TOLERANCE;
use crate::error::FieldError;

/// Build a matrix whose rows are the given vectors.
pub fn from_rows(rows: &[[f64; 3]; 3]) -> Mat3 {
    Matrix3::new(
        rows[0][0], rows[0][1], rows[0][2],
        rows[1][0], rows[1][1], rows[1][2],
        rows[2][0], rows[2][1], rows[2][2],
    )
}

pub fn to_rows(m: &Mat3) -> [[f64; 3]; 3] {
    [
        [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
        [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
        [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
    ]
}

pub fn diag(a: f64, b: f64, c: f64) -> Mat3 {
    Matrix3::from_diagonal(&Vector3::new(a, b, c))
}

/// Row vector times matrix, `v·M`.
///
/// With lattice vectors stored as rows this maps fractional coordinates to
/// cartesian ones: `v.x·a + v.y·b + v.z·c`.
pub fn row_times(v: &Vec3, m: &Mat3) -> Vec3 {
    m.tr_mul(v)
}

pub fn determinant(m: &Mat3) -> f64 {
    m[(0, 0)] * (m[(1, 1)] * m[(2, 2)] - m[(2, 1)] * m[(1, 2)])
        - m[(0, 1)] * (m[(1, 0)] * m[(2, 2)] - m[(1, 2)] * m[(2, 0)])
        + m[(0, 2)] * (m[(1, 0)] * m[(2, 1)] - m[(1, 1)] * m[(2, 0)])
}

/// Inverse through the adjugate.
///
/// The determinant is compared with the product of the row norms, so the
/// check does not depend on the length unit of the cell.
pub fn inverse(m: &Mat3) -> Result<Mat3, FieldError> {
    let det = determinant(m);
    let scale = m.row(0).norm() * m.row(1).norm() * m.row(2).norm();
    if !det.is_finite() || det.abs() <= SINGULARITY_TOLERANCE * scale {
        return Err(FieldError::SingularCell { determinant: det });
    }

    let inv_det = 1.0 / det;
    let adjugate = Matrix3::new(
        m[(1, 1)] * m[(2, 2)] - m[(2, 1)] * m[(1, 2)],
        m[(0, 2)] * m[(2, 1)] - m[(0, 1)] * m[(2, 2)],
        m[(0, 1)] * m[(1, 2)] - m[(0, 2)] * m[(1, 1)],
        m[(1, 2)] * m[(2, 0)] - m[(1, 0)] * m[(2, 2)],
        m[(0, 0)] * m[(2, 2)] - m[(0, 2)] * m[(2, 0)],
        m[(1, 0)] * m[(0, 2)] - m[(0, 0)] * m[(1, 2)],
        m[(1, 0)] * m[(2, 1)] - m[(2, 0)] * m[(1, 1)],
        m[(2, 0)] * m[(0, 1)] - m[(0, 0)] * m[(2, 1)],
        m[(0, 0)] * m[(1, 1)] - m[(1, 0)] * m[(0, 1)],
    );
    Ok(adjugate * inv_det)
}

/// Counter-clockwise rotation by `angle` radians about `axis` (Rodrigues).
///
/// `axis` is used as given; a non-unit axis yields a matrix that is not a
/// rotation.
pub fn axis_angle(axis: &Vec3, angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    Matrix3::identity() * c + (axis * axis.transpose()) * (1.0 - c) + axis.cross_matrix() * s
}
