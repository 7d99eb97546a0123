#[cfg(test)]
mod tests_helical {
    use super::super::*;
    use crate::algebra::{Mat3, Vec3};
    use crate::config::PhysicalConstants;
    use crate::error::{Diagnostic, FieldError};
    use crate::lattice::{Supercell, SummationDomain, UnitCell};
    use crate::magnetic::{fourier_component, MagneticAtom, MagneticStructure};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use nalgebra::{Rotation3, Unit, Vector3};
    use std::f64::consts::PI;

    const TOL: f64 = 1e-9;
    const FIELD: f64 = 0.92740095;

    fn domain(cell: UnitCell, repeats: usize, probe: Vec3, radius: f64) -> SummationDomain {
        SummationDomain::new(cell, Supercell::new([repeats; 3]).unwrap(), probe, radius)
    }

    fn skewed_cell() -> UnitCell {
        UnitCell::from_rows(&[[3.1, 0.0, 0.0], [0.4, 2.9, 0.0], [0.3, -0.2, 3.3]]).unwrap()
    }

    /// Helix with real part along z and imaginary part along y.
    fn helix(propagation: Vec3, phase: f64) -> MagneticStructure {
        MagneticStructure::new(
            propagation,
            vec![MagneticAtom::new(
                Vector3::zeros(),
                fourier_component(&Vector3::new(0.0, 0.0, 1.0), &Vector3::new(0.0, 1.0, 0.0)),
                phase,
            )],
        )
    }

    fn assert_fields_eq(left: &FieldComponents, right: &FieldComponents, tol: f64) {
        assert_abs_diff_eq!(left.contact, right.contact, epsilon = tol);
        assert_abs_diff_eq!(left.dipolar, right.dipolar, epsilon = tol);
        assert_abs_diff_eq!(left.lorentz, right.lorentz, epsilon = tol);
    }

    #[test]
    fn test_zero_angles_rejected() {
        let d = domain(UnitCell::cubic(2.0).unwrap(), 1, Vector3::new(0.5, 0.0, 0.0), 10.0);
        let result = incommensurate_fields(
            &d,
            &helix(Vector3::zeros(), 0.0),
            &ContactSettings::disabled(),
            0,
            &PhysicalConstants::default(),
        );
        assert!(matches!(result, Err(FieldError::InvalidAngleCount)));
    }

    #[test]
    fn test_helix_sweep_turns_from_real_to_imaginary() {
        let d = domain(UnitCell::cubic(2.0).unwrap(), 1, Vector3::new(0.5, 0.0, 0.0), 10.0);
        let report = incommensurate_fields(
            &d,
            &helix(Vector3::zeros(), 0.0),
            &ContactSettings::new(1, 10.0),
            4,
            &PhysicalConstants::default(),
        )
        .unwrap();
        assert!(report.is_clean());
        let sweep = report.value;
        assert_eq!(sweep.len(), 4);

        let dipolar = [
            Vector3::new(0.0, 0.0, -FIELD),
            Vector3::new(0.0, -FIELD, 0.0),
            Vector3::new(0.0, 0.0, FIELD),
            Vector3::new(0.0, FIELD, 0.0),
        ];
        let lorentz = [
            Vector3::new(0.0, 0.0, FIELD * 1e-3),
            Vector3::new(0.0, FIELD * 1e-3, 0.0),
            Vector3::new(0.0, 0.0, -FIELD * 1e-3),
            Vector3::new(0.0, -FIELD * 1e-3, 0.0),
        ];
        for (n, fields) in sweep.iter().enumerate() {
            assert_abs_diff_eq!(fields.dipolar, dipolar[n], epsilon = 1e-7);
            assert_abs_diff_eq!(fields.lorentz, lorentz[n], epsilon = 1e-10);
            // a single neighbour: the contact field is the moment itself
            assert_abs_diff_eq!(fields.contact, lorentz[n] / (FIELD * 1e-3) * 7.769376, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_first_angle_is_cosine_average() {
        let constants = PhysicalConstants::default();
        let d = domain(UnitCell::cubic(4.0).unwrap(), 3, Vector3::new(0.5, 0.5, 0.5), 5.0);
        let report = incommensurate_fields(&d, &helix(Vector3::zeros(), 0.0), &ContactSettings::new(8, 5.0), 3, &constants)
            .unwrap();
        let first = report.value[0];
        assert_relative_eq!(first.contact, Vector3::new(0.0, 0.0, constants.contact), epsilon = TOL);
        assert_abs_diff_eq!(first.dipolar, Vector3::zeros(), epsilon = TOL);
        let lorentz = constants.lorentz * 8.0 / (4.0 * PI * 125.0);
        assert_relative_eq!(first.lorentz, Vector3::new(0.0, 0.0, lorentz), epsilon = TOL);
    }

    #[test]
    fn test_zero_propagation_first_angle_is_commensurate() {
        let d = domain(skewed_cell(), 4, Vector3::new(0.1, 0.2, 0.3), 6.0);
        let real = Vector3::new(0.2, 0.4, 1.0);
        let imaginary = real.cross(&Vector3::new(1.0, 0.0, 0.0)).normalize() * real.norm();
        let structure = MagneticStructure::new(
            Vector3::zeros(),
            vec![
                MagneticAtom::new(Vector3::zeros(), fourier_component(&real, &imaginary), 0.0),
                MagneticAtom::new(Vector3::new(0.5, 0.5, 0.0), fourier_component(&imaginary, &-real), 0.0),
            ],
        );
        let contact = ContactSettings::new(5, 6.0);
        let constants = PhysicalConstants::default();

        let report = incommensurate_fields(&d, &structure, &contact, 6, &constants).unwrap();
        assert!(report.is_clean());
        let sum = commensurate_fields(&d, &structure, &contact, &constants).unwrap();
        assert_fields_eq(&report.value[0], &sum, TOL);
    }

    #[test]
    fn test_phase_shifts_sweep() {
        let d = domain(skewed_cell(), 20, Vector3::new(0.5, 0.4, 0.1), 20.0);
        let contact = ContactSettings::new(1, 5.0);
        let constants = PhysicalConstants::default();
        let k = Vector3::new(0.1, 0.0, 0.0);

        let reference = incommensurate_fields(&d, &helix(k, 0.0), &contact, 8, &constants).unwrap();
        let shifted = incommensurate_fields(&d, &helix(k, 0.125), &contact, 8, &constants).unwrap();

        assert_eq!(shifted.diagnostics.len(), 1);
        assert!(matches!(shifted.diagnostics[0], Diagnostic::NonZeroPhase { atom: 0, .. }));
        for n in 0..8 {
            assert_fields_eq(&shifted.value[n], &reference.value[(n + 1) % 8], TOL);
        }
    }

    #[test]
    fn test_rigid_rotation_rotates_every_field() {
        let rotation: Mat3 = *Rotation3::from_axis_angle(&Unit::new_normalize(Vector3::new(3.0, 4.0, 5.0)), 1.86).matrix();
        let cell = skewed_cell();
        let turned_cell = UnitCell::new(cell.basis() * rotation.transpose()).unwrap();

        let real = Vector3::new(0.2, 0.4, 1.0);
        let imaginary = real.cross(&Vector3::new(1.0, 0.0, 0.0)).normalize() * real.norm();
        let probe = Vector3::new(0.1, 0.2, 0.3);
        let k = Vector3::new(0.2, 0.3, 0.4);
        let build = |re: Vec3, im: Vec3| {
            MagneticStructure::new(k, vec![MagneticAtom::new(Vector3::zeros(), fourier_component(&re, &im), 0.0)])
        };
        let structure = build(real, imaginary);
        let turned = build(rotation * real, rotation * imaginary);

        let d = domain(cell, 6, probe, 1e5);
        let turned_d = domain(turned_cell, 6, probe, 1e5);
        let contact = ContactSettings::new(4, 6.0);
        let constants = PhysicalConstants::default();
        let rotate = |f: &FieldComponents| {
            FieldComponents::new(rotation * f.contact, rotation * f.dipolar, rotation * f.lorentz)
        };

        let sum = commensurate_fields(&d, &structure, &contact, &constants).unwrap();
        let turned_sum = commensurate_fields(&turned_d, &turned, &contact, &constants).unwrap();
        assert_fields_eq(&rotate(&sum), &turned_sum, TOL);

        let axis = Vector3::new(0.0, 1.0, 1.0);
        let sweep = RotationSweep::new(RotationAxis::new(axis).unwrap(), 5).unwrap();
        let turned_sweep = RotationSweep::new(RotationAxis::new(rotation * axis).unwrap(), 5).unwrap();
        let rotated = rotated_fields(&d, &structure, &contact, &sweep, &constants).unwrap();
        let turned_rotated = rotated_fields(&turned_d, &turned, &contact, &turned_sweep, &constants).unwrap();
        for (r, t) in rotated.iter().zip(&turned_rotated) {
            assert_fields_eq(&rotate(r), t, TOL);
        }

        let helical = incommensurate_fields(&d, &structure, &contact, 4, &constants).unwrap();
        let turned_helical = incommensurate_fields(&turned_d, &turned, &contact, 4, &constants).unwrap();
        assert!(helical.is_clean());
        for (h, t) in helical.value.iter().zip(&turned_helical.value) {
            assert_fields_eq(&rotate(h), t, TOL);
        }

        let tensor = dipolar_tensor(&d, &structure.positions());
        let turned_tensor = dipolar_tensor(&turned_d, &turned.positions());
        assert_relative_eq!(rotation * tensor * rotation.transpose(), turned_tensor, epsilon = TOL);
    }

    #[test]
    fn test_inconsistent_helix_is_reported_not_rejected() {
        let d = domain(UnitCell::cubic(2.0).unwrap(), 3, Vector3::new(0.5, 0.0, 0.0), 5.0);
        let structure = MagneticStructure::new(
            Vector3::new(0.1, 0.0, 0.0),
            vec![MagneticAtom::new(
                Vector3::zeros(),
                fourier_component(&Vector3::new(0.0, 0.0, 1.0), &Vector3::new(0.0, 0.5, 0.5)),
                0.0,
            )],
        );
        let report = incommensurate_fields(
            &d,
            &structure,
            &ContactSettings::new(2, 3.0),
            4,
            &PhysicalConstants::default(),
        )
        .unwrap();
        assert_eq!(report.value.len(), 4);
        assert!(report
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::UnequalHelixNorms { .. })));
        assert!(report
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::NonOrthogonalHelix { .. })));
        assert!(matches!(report.into_strict(), Err(FieldError::Inconsistent(_))));
    }

    #[test]
    fn test_single_thread_matches_pool() {
        let d = domain(skewed_cell(), 6, Vector3::new(0.1, 0.2, 0.3), 8.0);
        let structure = helix(Vector3::new(0.2, 0.3, 0.4), 0.0);
        let contact = ContactSettings::new(6, 8.0);
        let constants = PhysicalConstants::default();

        let pool = rayon::ThreadPoolBuilder::new().num_threads(1).build().unwrap();
        let serial = pool
            .install(|| incommensurate_fields(&d, &structure, &contact, 5, &constants))
            .unwrap();
        let parallel = incommensurate_fields(&d, &structure, &contact, 5, &constants).unwrap();
        assert_eq!(serial.diagnostics, parallel.diagnostics);
        for (s, p) in serial.value.iter().zip(&parallel.value) {
            assert_fields_eq(s, p, 1e-12);
        }
    }
}
