#[cfg(test)]
mod tests_lattice {
    use super::super::*;
    use crate::error::FieldError;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    const TOL: f64 = 1e-12;

    fn cubic_domain(a: f64, n: usize, radius: f64) -> SummationDomain {
        SummationDomain::new(
            UnitCell::cubic(a).unwrap(),
            Supercell::new([n, n, n]).unwrap(),
            Vector3::new(0.5, 0.5, 0.5),
            radius,
        )
    }

    fn collect_sites(domain: &SummationDomain, positions: &[Vector3<f64>]) -> Vec<(usize, [i64; 3])> {
        domain.scan(
            positions,
            Vec::new,
            |acc: &mut Vec<(usize, [i64; 3])>, site| {
                acc.push((
                    site.atom,
                    [site.image.x as i64, site.image.y as i64, site.image.z as i64],
                ))
            },
            |mut left, right| {
                left.extend(right);
                left
            },
        )
    }

    // ======================== UNIT CELL ========================

    #[test]
    fn test_cell_round_trip() {
        let cell = UnitCell::from_rows(&[[4.0, 0.0, 0.0], [1.0, 3.0, 0.0], [0.5, 0.2, 5.0]]).unwrap();
        let frac = Vector3::new(0.1, 0.7, -0.3);
        let cart = cell.to_cartesian(&frac);
        assert_relative_eq!(cell.to_fractional(&cart), frac, epsilon = TOL);
        assert_relative_eq!(cell.volume(), 60.0, epsilon = 1e-10);
        assert_eq!(cell.rows()[1], [1.0, 3.0, 0.0]);
    }

    #[test]
    fn test_singular_cell_rejected() {
        let result = UnitCell::from_rows(&[[1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        assert!(matches!(result, Err(FieldError::SingularCell { .. })));
    }

    #[test]
    fn test_cell_serde_as_rows() {
        let cell = UnitCell::cubic(2.0).unwrap();
        let json = serde_json::to_string(&cell).unwrap();
        assert_eq!(json, "[[2.0,0.0,0.0],[0.0,2.0,0.0],[0.0,0.0,2.0]]");
        let back: UnitCell = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cell);
        assert!(serde_json::from_str::<UnitCell>("[[1,0,0],[1,0,0],[0,0,1]]").is_err());
    }

    // ======================== SUPERCELL ========================

    #[test]
    fn test_supercell_rejects_zero() {
        assert!(matches!(
            Supercell::new([2, 0, 1]),
            Err(FieldError::InvalidSupercell([2, 0, 1]))
        ));
        assert!(serde_json::from_str::<Supercell>("[1, 0, 1]").is_err());
    }

    #[test]
    fn test_image_indexing_last_axis_fastest() {
        let supercell = Supercell::new([2, 3, 4]).unwrap();
        assert_eq!(supercell.image_count(), 24);
        assert_eq!(supercell.image(0), Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(supercell.image(1), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(supercell.image(4), Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(supercell.image(12), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(supercell.image(23), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_centre_offset_uses_integer_half() {
        let supercell = Supercell::new([1, 4, 5]).unwrap();
        assert_eq!(supercell.centre_offset(), Vector3::new(0.0, 2.0, 2.0));
    }

    // ======================== PROBE PLACEMENT ========================

    #[test]
    fn test_probe_sits_in_central_cell() {
        let domain = cubic_domain(4.0, 3, 5.0);
        assert_relative_eq!(domain.probe_cartesian(), Vector3::new(6.0, 6.0, 6.0), epsilon = TOL);

        let single = cubic_domain(2.0, 1, 10.0);
        assert_relative_eq!(single.probe_cartesian(), Vector3::new(1.0, 1.0, 1.0), epsilon = TOL);
    }

    // ======================== SCAN ========================

    #[test]
    fn test_scan_finds_cube_corners() {
        let domain = cubic_domain(4.0, 3, 5.0);
        let positions = [Vector3::zeros()];
        let distances = domain.scan(
            &positions,
            Vec::new,
            |acc: &mut Vec<f64>, site| acc.push(site.distance),
            |mut left, right| {
                left.extend(right);
                left
            },
        );
        assert_eq!(distances.len(), 8);
        for distance in distances {
            assert_relative_eq!(distance, 12.0_f64.sqrt(), epsilon = TOL);
        }
    }

    #[test]
    fn test_scan_site_geometry() {
        let domain = cubic_domain(2.0, 1, 10.0);
        let positions = [Vector3::zeros()];
        let sites = domain.scan(
            &positions,
            Vec::new,
            |acc: &mut Vec<LatticeSite>, site| acc.push(*site),
            |mut left, right| {
                left.extend(right);
                left
            },
        );
        assert_eq!(sites.len(), 1);
        let site = sites[0];
        assert_relative_eq!(site.displacement, Vector3::new(-1.0, -1.0, -1.0), epsilon = TOL);
        assert_relative_eq!(site.direction().norm(), 1.0, epsilon = TOL);
        assert_relative_eq!(site.inv_cube(), 1.0 / 27.0_f64.sqrt(), epsilon = TOL);
    }

    #[test]
    fn test_scan_order_independent_of_thread_count() {
        let domain = cubic_domain(3.0, 5, 6.5);
        let positions = [Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.5, 0.5, 0.0)];

        let serial_pool = rayon::ThreadPoolBuilder::new().num_threads(1).build().unwrap();
        let serial = serial_pool.install(|| collect_sites(&domain, &positions));
        let parallel = collect_sites(&domain, &positions);

        assert!(!serial.is_empty());
        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_scan_respects_radius() {
        let domain = cubic_domain(4.0, 3, 3.0);
        let positions = [Vector3::zeros()];
        assert!(collect_sites(&domain, &positions).is_empty());
    }

    // ======================== INSCRIBED SPHERE ========================

    #[test]
    fn test_largest_sphere_single_cell() {
        let cell = UnitCell::cubic(3.0).unwrap();
        let supercell = Supercell::new([1, 1, 1]).unwrap();
        let centre = largest_inscribed_sphere(&cell, &supercell, &Vector3::new(0.5, 0.5, 0.5));
        assert_relative_eq!(centre, 1.5, epsilon = TOL);

        // probe at cartesian (1, 1, 1)
        let off_centre = largest_inscribed_sphere(&cell, &supercell, &Vector3::new(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0));
        assert_relative_eq!(off_centre, 1.0, epsilon = TOL);
    }

    #[test]
    fn test_largest_sphere_grows_with_supercell() {
        let domain = cubic_domain(4.0, 3, 5.0);
        assert_relative_eq!(domain.inscribed_radius(), 6.0, epsilon = TOL);
        let larger = cubic_domain(4.0, 5, 5.0);
        assert_relative_eq!(larger.inscribed_radius(), 10.0, epsilon = TOL);
    }
}
