// Field request: the typed boundary between job files / callers and the lattice sums.
// Everything that can be wrong with the input is rejected here, before any buffer is acquired.

use serde::{Deserialize, Serialize};

use crate::algebra::{Mat3, Vec3};
use crate::config::{PhysicalConstants, MAX_CONTACT_NEIGHBOURS};
use crate::error::{record, Diagnostic, FieldError, RadiusKind, Report};
use crate::fields::{
    commensurate_fields, dipolar_tensor, incommensurate_fields, rotated_fields, ContactSettings,
    FieldComponents, LocalFields, RotationAxis, RotationSweep,
};
use crate::interfaces::CalculationType;
use crate::lattice::{Supercell, SummationDomain, UnitCell};
use crate::magnetic::MagneticStructure;

/// Magnetic structure either per atom or as flat buffers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StructureInput {
    Atoms(MagneticStructure),
    Flat {
        propagation: Vec3,
        /// 3 fractional coordinates per atom.
        positions: Vec<f64>,
        /// Real x, y, z then imaginary x, y, z per atom.
        fourier: Vec<f64>,
        phases: Vec<f64>,
    },
}

impl StructureInput {
    pub fn to_structure(&self) -> Result<MagneticStructure, FieldError> {
        match self {
            StructureInput::Atoms(structure) => Ok(structure.clone()),
            StructureInput::Flat {
                propagation,
                positions,
                fourier,
                phases,
            } => MagneticStructure::from_flat(*propagation, positions, fourier, phases),
        }
    }
}

/// A complete job: geometry, magnetic structure and the calculation to run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRequest {
    pub calculation: CalculationType,
    /// Lattice vectors as rows (Å).
    pub cell: [[f64; 3]; 3],
    pub supercell: [usize; 3],
    /// Single probe site, fractional coordinates.
    #[serde(default)]
    pub probe: Option<Vec3>,
    /// Further probe sites, evaluated after `probe` in the given order.
    #[serde(default)]
    pub probes: Vec<Vec3>,
    /// Radius of the summation sphere (Å).
    pub radius: f64,
    pub structure: StructureInput,
    /// Number of nearest neighbours entering the contact field.
    #[serde(default)]
    pub contact_neighbours: usize,
    #[serde(default)]
    pub contact_radius: f64,
    /// Rotation axis, required by the rotate calculation.
    #[serde(default)]
    pub axis: Option<Vec3>,
    /// Number of angles, required by rotate and incommensurate.
    #[serde(default)]
    pub angles: Option<usize>,
    /// Contact coupling of the probe (Å⁻³), used for the total field.
    #[serde(default)]
    pub contact_coupling: f64,
    #[serde(default)]
    pub constants: PhysicalConstants,
}

/// Either one field triple or one per angle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldOutput {
    Single(FieldComponents),
    Sweep(Vec<FieldComponents>),
}

impl FieldOutput {
    pub fn components(&self) -> &[FieldComponents] {
        match self {
            FieldOutput::Single(fields) => std::slice::from_ref(fields),
            FieldOutput::Sweep(sweep) => sweep,
        }
    }
}

/// A request that passed every check, ready to evaluate.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub calculation: CalculationType,
    /// One summation domain per probe site.
    pub domains: Vec<SummationDomain>,
    pub structure: MagneticStructure,
    pub contact: ContactSettings,
    pub sweep: Option<RotationSweep>,
    pub angles: usize,
    pub contact_coupling: f64,
    pub constants: PhysicalConstants,
    /// Advisory findings of the validation itself.
    pub advisories: Vec<Diagnostic>,
}

impl FieldRequest {
    /// Probe sites in evaluation order: `probe` first, then `probes`.
    pub fn sites(&self) -> Vec<Vec3> {
        self.probe.iter().chain(&self.probes).copied().collect()
    }

    /// Check the request and build the typed inputs of the engines.
    pub fn validate(&self) -> Result<ValidatedRequest, FieldError> {
        if self.contact_neighbours > MAX_CONTACT_NEIGHBOURS {
            return Err(FieldError::TooManyNeighbours {
                requested: self.contact_neighbours,
                max: MAX_CONTACT_NEIGHBOURS,
            });
        }

        let angles = match self.calculation {
            CalculationType::Sum => 1,
            CalculationType::Rotate | CalculationType::Incommensurate => {
                let angles = self.angles.ok_or(FieldError::MissingParameter("angles"))?;
                if angles == 0 {
                    return Err(FieldError::InvalidAngleCount);
                }
                angles
            }
        };
        let sweep = match self.calculation {
            CalculationType::Rotate => {
                let axis = self.axis.ok_or(FieldError::MissingParameter("axis"))?;
                Some(RotationSweep::new(RotationAxis::new(axis)?, angles)?)
            }
            _ => None,
        };

        let sites = self.sites();
        if sites.is_empty() {
            return Err(FieldError::MissingParameter("probe"));
        }

        let supercell = Supercell::new(self.supercell)?;
        let structure = self.structure.to_structure()?;
        let cell = UnitCell::from_rows(&self.cell)?;

        let mut advisories = Vec::new();
        if self.radius <= 0.0 {
            record(
                &mut advisories,
                Diagnostic::NonPositiveRadius {
                    kind: RadiusKind::Sum,
                    value: self.radius,
                },
            );
        }
        if self.contact_neighbours > 0 && self.contact_radius <= 0.0 {
            record(
                &mut advisories,
                Diagnostic::NonPositiveRadius {
                    kind: RadiusKind::Contact,
                    value: self.contact_radius,
                },
            );
        }

        Ok(ValidatedRequest {
            calculation: self.calculation,
            domains: sites
                .into_iter()
                .map(|site| SummationDomain::new(cell, supercell, site, self.radius))
                .collect(),
            structure,
            contact: ContactSettings::new(self.contact_neighbours, self.contact_radius),
            sweep,
            angles,
            contact_coupling: self.contact_coupling,
            constants: self.constants,
            advisories,
        })
    }

    /// Validate and evaluate every site in one go.
    pub fn evaluate(&self) -> Result<Vec<Report<FieldOutput>>, FieldError> {
        self.validate()?.evaluate()
    }
}

impl ValidatedRequest {
    /// Run the requested lattice sum at every probe site, one report per site.
    pub fn evaluate(&self) -> Result<Vec<Report<FieldOutput>>, FieldError> {
        self.domains.iter().map(|domain| self.evaluate_site(domain)).collect()
    }

    /// Run the requested lattice sum for one summation domain.
    pub fn evaluate_site(&self, domain: &SummationDomain) -> Result<Report<FieldOutput>, FieldError> {
        log::debug!(
            "Evaluating {} for {} atoms at site {:?}",
            self.calculation,
            self.structure.len(),
            domain.probe.as_slice()
        );
        let report = match (self.calculation, &self.sweep) {
            (CalculationType::Sum, _) => Report::new(FieldOutput::Single(commensurate_fields(
                domain,
                &self.structure,
                &self.contact,
                &self.constants,
            )?)),
            (CalculationType::Rotate, Some(sweep)) => Report::new(FieldOutput::Sweep(rotated_fields(
                domain,
                &self.structure,
                &self.contact,
                sweep,
                &self.constants,
            )?)),
            (CalculationType::Rotate, None) => return Err(FieldError::MissingParameter("axis")),
            (CalculationType::Incommensurate, _) => incommensurate_fields(
                domain,
                &self.structure,
                &self.contact,
                self.angles,
                &self.constants,
            )?
            .map(FieldOutput::Sweep),
        };
        Ok(report.prepend(self.advisories.clone()))
    }

    /// Drop atoms without a moment from the structure. Returns how many were removed.
    pub fn retain_magnetic(&mut self) -> usize {
        self.structure.retain_magnetic()
    }

    /// Dipolar tensor of the structure's positions at every site, independent of the calculation type.
    pub fn dipolar_tensors(&self) -> Vec<Mat3> {
        let positions = self.structure.positions();
        self.domains.iter().map(|domain| dipolar_tensor(domain, &positions)).collect()
    }

    /// Largest sphere around each site that fits in the supercell (Å).
    pub fn inscribed_radii(&self) -> Vec<f64> {
        self.domains.iter().map(SummationDomain::inscribed_radius).collect()
    }

    /// Pair an evaluated output with the probe's contact coupling.
    pub fn local_fields(&self, output: &FieldOutput) -> LocalFields {
        LocalFields::new(output.components().to_vec()).with_contact_coupling(self.contact_coupling)
    }
}
