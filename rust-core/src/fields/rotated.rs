// Rotated sum: the commensurate moments are rigidly rotated about one axis through
// N equally spaced angles and the three fields are evaluated for each angle.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::algebra::{axis_angle, dipolar_kernel, Mat3, Vec3};
use crate::config::PhysicalConstants;
use crate::error::FieldError;
use crate::fields::components::FieldComponents;
use crate::fields::contact::{weighted_average, ContactSettings};
use crate::lattice::SummationDomain;
use crate::magnetic::MagneticStructure;
use crate::pile::Pile;

/// Unit rotation axis. Normalised on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 3]", into = "[f64; 3]")]
pub struct RotationAxis(Vec3);

impl RotationAxis {
    pub fn new(axis: Vec3) -> Result<Self, FieldError> {
        let norm = axis.norm();
        if !(norm > 0.0 && norm.is_finite()) {
            return Err(FieldError::ZeroRotationAxis);
        }
        Ok(Self(axis / norm))
    }

    pub fn unit(&self) -> &Vec3 {
        &self.0
    }
}

impl TryFrom<[f64; 3]> for RotationAxis {
    type Error = FieldError;

    fn try_from(axis: [f64; 3]) -> Result<Self, Self::Error> {
        RotationAxis::new(Vec3::from(axis))
    }
}

impl From<RotationAxis> for [f64; 3] {
    fn from(axis: RotationAxis) -> Self {
        axis.0.into()
    }
}

/// Axis plus number of equally spaced angles `θ_n = 2πn/N`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationSweep {
    pub axis: RotationAxis,
    pub angles: usize,
}

impl RotationSweep {
    pub fn new(axis: RotationAxis, angles: usize) -> Result<Self, FieldError> {
        if angles == 0 {
            return Err(FieldError::InvalidAngleCount);
        }
        Ok(Self { axis, angles })
    }

    pub fn angle(&self, index: usize) -> f64 {
        2.0 * PI * index as f64 / self.angles as f64
    }

    /// Counter-clockwise rotation matrices for every angle of the sweep.
    pub fn rotations(&self) -> Result<Vec<Mat3>, FieldError> {
        let mut rotations = Vec::new();
        rotations
            .try_reserve_exact(self.angles)
            .map_err(|source| FieldError::Allocation {
                what: "rotation matrices",
                source,
            })?;
        rotations.extend((0..self.angles).map(|n| axis_angle(self.axis.unit(), self.angle(n))));
        Ok(rotations)
    }
}

#[derive(Debug, Clone)]
struct AngleTotals {
    lorentz: Vec<Vec3>,
    dipolar: Vec<Vec3>,
    contact: Vec<Pile<Vec3>>,
}

fn zeroed(len: usize, what: &'static str) -> Result<Vec<Vec3>, FieldError> {
    let mut totals = Vec::new();
    totals
        .try_reserve_exact(len)
        .map_err(|source| FieldError::Allocation { what, source })?;
    totals.resize(len, Vec3::zeros());
    Ok(totals)
}

impl AngleTotals {
    fn try_new(angles: usize, contact: &ContactSettings) -> Result<Self, FieldError> {
        let mut piles = Vec::new();
        piles
            .try_reserve_exact(angles)
            .map_err(|source| FieldError::Allocation {
                what: "per-angle contact piles",
                source,
            })?;
        for _ in 0..angles {
            piles.push(contact.pile()?);
        }
        Ok(Self {
            lorentz: zeroed(angles, "per-angle Lorentz totals")?,
            dipolar: zeroed(angles, "per-angle dipolar totals")?,
            contact: piles,
        })
    }

    fn merge(mut self, other: AngleTotals) -> AngleTotals {
        for (total, part) in self.lorentz.iter_mut().zip(other.lorentz) {
            *total += part;
        }
        for (total, part) in self.dipolar.iter_mut().zip(other.dipolar) {
            *total += part;
        }
        for (pile, part) in self.contact.iter_mut().zip(other.contact) {
            pile.merge(part);
        }
        self
    }
}

/// Contact, dipolar and Lorentz fields for every angle of `sweep`.
///
/// Angle 0 is the identity rotation and reproduces [`commensurate_fields`](super::commensurate_fields).
pub fn rotated_fields(
    domain: &SummationDomain,
    structure: &MagneticStructure,
    contact: &ContactSettings,
    sweep: &RotationSweep,
    constants: &PhysicalConstants,
) -> Result<Vec<FieldComponents>, FieldError> {
    let rotations = sweep.rotations()?;
    let template = AngleTotals::try_new(sweep.angles, contact)?;
    let positions = structure.positions();
    log::debug!(
        "Rotating moments about {:?} through {} angles",
        sweep.axis.unit().as_slice(),
        sweep.angles
    );

    let totals = domain.scan(
        &positions,
        || template.clone(),
        |acc, site| {
            let moment = structure.atoms[site.atom].moment_at(&structure.propagation, &site.image);
            let direction = site.direction();
            let inv_cube = site.inv_cube();
            let in_contact = contact.within(site.distance);
            let rank = ContactSettings::rank(site.distance);

            for (n, rotation) in rotations.iter().enumerate() {
                let rotated = rotation * moment;
                acc.lorentz[n] += rotated;
                if in_contact {
                    acc.contact[n].insert(rank, rotated * inv_cube);
                }
                acc.dipolar[n] += dipolar_kernel(&rotated, &direction, inv_cube);
            }
        },
        AngleTotals::merge,
    );

    let lorentz_prefactor = constants.lorentz_prefactor(domain.radius);
    let fields = totals
        .contact
        .iter()
        .zip(totals.dipolar.iter().zip(&totals.lorentz))
        .map(|(pile, (dipolar, lorentz))| {
            FieldComponents::new(
                weighted_average(pile) * constants.contact,
                dipolar * constants.dipolar,
                lorentz * lorentz_prefactor,
            )
        })
        .collect();
    Ok(fields)
}
