// Fields module: the lattice sums producing contact, dipolar and Lorentz fields at the probe
// Every engine shares one parallel scan over the summation domain (see lattice::SummationDomain::scan).

// ======================== MODULE DECLARATIONS ========================
pub mod commensurate;
pub mod components;
pub mod contact;
pub mod dipolar_tensor;
pub mod incommensurate;
pub mod rotated;

mod _tests_helical;

// ======================== RESULTS ========================
pub use components::{
    flatten,         // fn(sweep: &[FieldComponents]) -> Vec<f64> - 9 values per angle
    FieldComponents, // struct - contact, dipolar and Lorentz field (T)
    LocalFields,     // struct - sweep plus contact coupling, total() = L + D + A·C
};

// ======================== CONTACT ========================
pub use contact::{
    weighted_average, // fn(pile: &Pile<Vec3>) -> Vec3 - Σ value / Σ 1/rank over positive ranks
    ContactSettings,  // struct - neighbour count and cutoff radius
    PairedContact,    // struct - slot-matched cosine and sine piles of the helical engine
};

// ======================== ENGINES ========================
pub use commensurate::commensurate_fields; // fn(domain, structure, contact, constants) -> Result<FieldComponents>
pub use dipolar_tensor::dipolar_tensor; // fn(domain, positions) -> Mat3
pub use incommensurate::incommensurate_fields; // fn(domain, structure, contact, angles, constants) -> Result<Report<Vec<FieldComponents>>>
pub use rotated::{
    rotated_fields, // fn(domain, structure, contact, sweep, constants) -> Result<Vec<FieldComponents>>
    RotationAxis,   // struct - normalised, non-zero axis
    RotationSweep,  // struct - axis and number of angles 2πn/N
};
