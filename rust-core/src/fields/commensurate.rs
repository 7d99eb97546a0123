// Commensurate sum: every atom carries the moment cos(2π(K·R + φ))·sk + sin(2π(K·R + φ))·isk.

use crate::algebra::{dipolar_kernel, Vec3};
use crate::config::PhysicalConstants;
use crate::error::FieldError;
use crate::fields::components::FieldComponents;
use crate::fields::contact::{weighted_average, ContactSettings};
use crate::lattice::SummationDomain;
use crate::magnetic::MagneticStructure;
use crate::pile::Pile;

/// Private accumulator of one worker.
#[derive(Debug, Clone)]
struct Totals {
    lorentz: Vec3,
    dipolar: Vec3,
    contact: Pile<Vec3>,
}

impl Totals {
    fn merge(mut self, other: Totals) -> Totals {
        self.lorentz += other.lorentz;
        self.dipolar += other.dipolar;
        self.contact.merge(other.contact);
        self
    }
}

/// Contact, dipolar and Lorentz fields at the probe for a commensurate structure.
pub fn commensurate_fields(
    domain: &SummationDomain,
    structure: &MagneticStructure,
    contact: &ContactSettings,
    constants: &PhysicalConstants,
) -> Result<FieldComponents, FieldError> {
    let template = Totals {
        lorentz: Vec3::zeros(),
        dipolar: Vec3::zeros(),
        contact: contact.pile()?,
    };
    let positions = structure.positions();

    let totals = domain.scan(
        &positions,
        || template.clone(),
        |acc, site| {
            let moment = structure.atoms[site.atom].moment_at(&structure.propagation, &site.image);
            acc.lorentz += moment;
            let inv_cube = site.inv_cube();
            if contact.within(site.distance) {
                acc.contact
                    .insert(ContactSettings::rank(site.distance), moment * inv_cube);
            }
            acc.dipolar += dipolar_kernel(&moment, &site.direction(), inv_cube);
        },
        Totals::merge,
    );

    log::debug!("Contact pile holds {} of {} neighbours", totals.contact.len(), contact.neighbours);

    Ok(FieldComponents::new(
        weighted_average(&totals.contact) * constants.contact,
        totals.dipolar * constants.dipolar,
        totals.lorentz * constants.lorentz_prefactor(domain.radius),
    ))
}
