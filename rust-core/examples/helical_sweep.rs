/// Example: field sweep of a simple helix compared with the rigidly rotated moment
///
/// A single moment in a cubic cell, its real part along z and imaginary part along y.
/// The incommensurate sweep walks the helix, the rotated sweep turns the real part about x.
use nalgebra::Vector3;
use local_fields::fields::{incommensurate_fields, rotated_fields, ContactSettings, RotationAxis, RotationSweep};
use local_fields::lattice::{Supercell, SummationDomain, UnitCell};
use local_fields::magnetic::{fourier_component, MagneticAtom, MagneticStructure};
use local_fields::PhysicalConstants;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let domain = SummationDomain::new(
        UnitCell::cubic(2.0)?,
        Supercell::new([11, 11, 11])?,
        Vector3::new(0.5, 0.0, 0.0),
        10.0,
    );
    println!("Largest inscribed sphere: {:.3} Å", domain.inscribed_radius());

    let structure = MagneticStructure::new(
        Vector3::zeros(),
        vec![MagneticAtom::new(
            Vector3::zeros(),
            fourier_component(&Vector3::new(0.0, 0.0, 1.0), &Vector3::new(0.0, 1.0, 0.0)),
            0.0,
        )],
    );
    let contact = ContactSettings::new(1, 3.0);
    let constants = PhysicalConstants::default();

    let helical = incommensurate_fields(&domain, &structure, &contact, 8, &constants)?;
    for diagnostic in &helical.diagnostics {
        println!("warning: {}", diagnostic);
    }
    let sweep = RotationSweep::new(RotationAxis::new(Vector3::new(1.0, 0.0, 0.0))?, 8)?;
    let rotated = rotated_fields(&domain, &structure, &contact, &sweep, &constants)?;

    println!("{:>5} {:>36} {:>36}", "angle", "B_dip helix (T)", "B_dip rotated (T)");
    for (n, (h, r)) in helical.value.iter().zip(&rotated).enumerate() {
        println!(
            "{:>5} {:>11.5} {:>11.5} {:>11.5}  {:>11.5} {:>11.5} {:>11.5}",
            n, h.dipolar.x, h.dipolar.y, h.dipolar.z, r.dipolar.x, r.dipolar.y, r.dipolar.z
        );
    }
    Ok(())
}
