// Incommensurate sum: each atom describes a helix m0·(cos θ·a + sin θ·b) with θ = 2π(K·r + φ).
// The scan accumulates cosine and sine parts per atom once; every angle of the sweep is then a
// linear combination of them, so the lattice is visited a single time regardless of N.

use std::f64::consts::PI;

use crate::algebra::{dipolar_kernel, row_times, Vec3};
use crate::config::PhysicalConstants;
use crate::error::{FieldError, Report};
use crate::fields::components::FieldComponents;
use crate::fields::contact::{ContactSettings, PairedContact};
use crate::lattice::SummationDomain;
use crate::magnetic::{helix_decomposition, HelixAtom, MagneticStructure};
use crate::pile::Pile;

/// Cosine and sine parts of one atom's contribution.
#[derive(Debug, Clone, Copy, PartialEq)]
struct HelixSums {
    cos_dipolar: Vec3,
    sin_dipolar: Vec3,
    cos_lorentz: Vec3,
    sin_lorentz: Vec3,
}

impl HelixSums {
    fn zero() -> Self {
        Self {
            cos_dipolar: Vec3::zeros(),
            sin_dipolar: Vec3::zeros(),
            cos_lorentz: Vec3::zeros(),
            sin_lorentz: Vec3::zeros(),
        }
    }

    fn add(&mut self, other: &HelixSums) {
        self.cos_dipolar += other.cos_dipolar;
        self.sin_dipolar += other.sin_dipolar;
        self.cos_lorentz += other.cos_lorentz;
        self.sin_lorentz += other.sin_lorentz;
    }
}

#[derive(Debug, Clone)]
struct HelixTotals {
    atoms: Vec<HelixSums>,
    cosine_contact: Pile<Vec3>,
    sine_contact: Pile<Vec3>,
}

impl HelixTotals {
    fn try_new(atoms: usize, contact: &ContactSettings) -> Result<Self, FieldError> {
        let mut sums = Vec::new();
        sums.try_reserve_exact(atoms)
            .map_err(|source| FieldError::Allocation {
                what: "per-atom helix sums",
                source,
            })?;
        sums.resize(atoms, HelixSums::zero());
        Ok(Self {
            atoms: sums,
            cosine_contact: contact.pile()?,
            sine_contact: contact.pile()?,
        })
    }

    fn merge(mut self, other: HelixTotals) -> HelixTotals {
        for (total, part) in self.atoms.iter_mut().zip(&other.atoms) {
            total.add(part);
        }
        self.cosine_contact.merge(other.cosine_contact);
        self.sine_contact.merge(other.sine_contact);
        self
    }
}

fn angle(index: usize, count: usize) -> f64 {
    2.0 * PI * index as f64 / count as f64
}

/// Contact, dipolar and Lorentz fields for `angles` equally spaced helix phases.
///
/// Inconsistent helices (unequal norms, non-orthogonal parts, non-zero phase)
/// and disagreeing contact piles are reported next to the result.
pub fn incommensurate_fields(
    domain: &SummationDomain,
    structure: &MagneticStructure,
    contact: &ContactSettings,
    angles: usize,
    constants: &PhysicalConstants,
) -> Result<Report<Vec<FieldComponents>>, FieldError> {
    if angles == 0 {
        return Err(FieldError::InvalidAngleCount);
    }
    let (helices, mut diagnostics) = helix_decomposition(structure, domain).into_parts();
    let template = HelixTotals::try_new(helices.len(), contact)?;
    let positions = structure.positions();
    let probe = domain.probe_cartesian();
    let inverse = *domain.cell.inverse();
    let propagation = structure.propagation;
    log::debug!("Incommensurate sweep over {} angles, K = {:?}", angles, propagation.as_slice());

    let totals = domain.scan(
        &positions,
        || template.clone(),
        |acc, site| {
            let helix: &HelixAtom = &helices[site.atom];
            let crystal = row_times(&(site.position - probe - helix.reference), &inverse);
            let (s, c) = (2.0 * PI * (propagation.dot(&crystal) + helix.phase)).sin_cos();

            let direction = site.direction();
            let inv_cube = site.inv_cube();
            let dip_a = dipolar_kernel(&helix.a, &direction, inv_cube);
            let dip_b = dipolar_kernel(&helix.b, &direction, inv_cube);

            acc.atoms[site.atom].add(&HelixSums {
                cos_dipolar: dip_a * c + dip_b * s,
                sin_dipolar: dip_a * s - dip_b * c,
                cos_lorentz: helix.a * c + helix.b * s,
                sin_lorentz: helix.a * s - helix.b * c,
            });

            if contact.within(site.distance) {
                let rank = ContactSettings::rank(site.distance);
                acc.cosine_contact
                    .insert(rank, (helix.a * c + helix.b * s) * helix.moment);
                acc.sine_contact
                    .insert(rank, (helix.a * s - helix.b * c) * helix.moment);
            }
        },
        HelixTotals::merge,
    );

    let lorentz_prefactor = constants.lorentz_prefactor(domain.radius);
    let (bulk, (paired, contact_diagnostics)) = rayon::join(
        || {
            (0..angles)
                .map(|n| {
                    let (s, c) = angle(n, angles).sin_cos();
                    helices.iter().zip(&totals.atoms).fold(
                        (Vec3::zeros(), Vec3::zeros()),
                        |(dipolar, lorentz), (helix, sums)| {
                            (
                                dipolar + (sums.cos_dipolar * c - sums.sin_dipolar * s) * helix.moment,
                                lorentz + (sums.cos_lorentz * c - sums.sin_lorentz * s) * helix.moment,
                            )
                        },
                    )
                })
                .collect::<Vec<_>>()
        },
        || {
            let mut found = Vec::new();
            let paired = PairedContact::collect(&totals.cosine_contact, &totals.sine_contact, &mut found);
            (paired, found)
        },
    );
    diagnostics.extend(contact_diagnostics);

    let fields = bulk
        .into_iter()
        .enumerate()
        .map(|(n, (dipolar, lorentz))| {
            FieldComponents::new(
                paired.at_angle(angle(n, angles)) * constants.contact,
                dipolar * constants.dipolar,
                lorentz * lorentz_prefactor,
            )
        })
        .collect();
    Ok(Report::with_diagnostics(fields, diagnostics))
}
