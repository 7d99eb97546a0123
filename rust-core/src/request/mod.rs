// Request module: JSON-friendly job description, validation and dispatch to the engines

// ======================== MODULE DECLARATIONS ========================
pub mod field_request;


// ======================== REQUEST ========================
pub use field_request::{
    FieldOutput,      // enum - Single(FieldComponents) or Sweep(Vec<FieldComponents>)
    FieldRequest,     // struct - serde job: calculation, cell, supercell, probe/probes, radii, structure, axis, angles
    StructureInput,   // enum - per-atom structure or flat checked buffers
    ValidatedRequest, // struct - typed engine inputs (one domain per site) plus advisory diagnostics
};
// FieldRequest impl methods:
//   sites(&self) -> Vec<Vec3>                             - probe then probes, in order
//   validate(&self) -> Result<ValidatedRequest>          - all configuration checks, no allocation of sums
//   evaluate(&self) -> Result<Vec<Report<FieldOutput>>>   - validate + evaluate
// ValidatedRequest impl methods:
//   evaluate(&self) -> Result<Vec<Report<FieldOutput>>>   - one report per site
//   evaluate_site(&self, domain) -> Result<Report<..>>    - dispatch on the calculation type
//   retain_magnetic(&mut self) -> usize                   - drop atoms without a moment
//   dipolar_tensors(&self) -> Vec<Mat3>                   - tensor of the structure's positions per site
//   inscribed_radii(&self) -> Vec<f64>                    - largest inscribed sphere per site
//   local_fields(&self, output) -> LocalFields            - attach the contact coupling
