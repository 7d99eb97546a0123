// Algebra module: 3-vectors and 3x3 matrices used by the lattice sums
// Storage and the generic operations (add, sub, scale, dot, norm, products) come from nalgebra;
// this module adds the crystallographic conventions and kernels the engines share.

// ======================== MODULE DECLARATIONS ========================
pub mod kernels;
pub mod matrix_ops;


// ======================== TYPE ALIASES ========================
pub type Vec3 = nalgebra::Vector3<f64>;
pub type Mat3 = nalgebra::Matrix3<f64>;

// ======================== MATRIX OPERATIONS ========================
pub use matrix_ops::{
    axis_angle,     // fn(axis: &Vec3, angle: f64) -> Mat3 - Rodrigues rotation, axis must already be unit length
    determinant,    // fn(m: &Mat3) -> f64 - closed-form 3x3 determinant
    diag,           // fn(a: f64, b: f64, c: f64) -> Mat3 - diagonal matrix
    from_rows,      // fn(rows: &[[f64; 3]; 3]) -> Mat3 - rows become lattice vectors
    inverse,        // fn(m: &Mat3) -> Result<Mat3> - adjugate inverse, rejects singular matrices
    row_times,      // fn(v: &Vec3, m: &Mat3) -> Vec3 - row vector times matrix (v·M)
    to_rows,        // fn(m: &Mat3) -> [[f64; 3]; 3] - inverse of from_rows
};

// ======================== DIPOLAR KERNELS ========================
pub use kernels::{
    dipolar_kernel,        // fn(m: &Vec3, u: &Vec3, inv_cube: f64) -> Vec3 - (3(m·u)u - m)/r³
    dipolar_kernel_tensor, // fn(r: &Vec3, n: f64) -> Mat3 - -I/r³ + 3 r⊗r/r⁵
};
