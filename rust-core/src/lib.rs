//! Local magnetic fields at a muon site
//!
//! This library sums the dipolar, Lorentz and contact fields produced at a probe site by a
//! periodic lattice of magnetic moments, for commensurate, rigidly rotated and incommensurate
//! (helical) magnetic structures, and builds the bare dipolar tensor.

pub mod algebra;
pub mod config;
pub mod error;
pub mod fields;
pub mod interfaces;
pub mod lattice;
pub mod magnetic;
pub mod pile;
pub mod request;

pub use config::PhysicalConstants;
pub use error::{Diagnostic, FieldError, Report};
pub use fields::{
    commensurate_fields, dipolar_tensor, incommensurate_fields, rotated_fields, ContactSettings,
    FieldComponents, LocalFields, RotationAxis, RotationSweep,
};
pub use interfaces::CalculationType;
pub use lattice::{largest_inscribed_sphere, Supercell, SummationDomain, UnitCell};
pub use magnetic::{MagneticAtom, MagneticStructure};
pub use request::{FieldOutput, FieldRequest};

/// Common result type used throughout the library
pub type Result<T> = std::result::Result<T, FieldError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
