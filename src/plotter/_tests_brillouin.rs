#[cfg(test)]
mod tests_brillouin_plots {
    use std::f64::consts::PI;

    use nalgebra::{Matrix3, Vector3};

    use super::super::brillouin::{
        plot_brillouin_zone, plot_brillouin_zone_from_kpath, plot_ellipsoid, plot_labels,
        plot_lattice_vectors, plot_path, plot_points, plot_wigner_seitz,
    };
    use crate::figure::Scene3;
    use crate::lattice::Lattice;
    use crate::symmetry::KPath;

    fn rec_lattice() -> Lattice {
        Lattice::cubic(1.0).reciprocal()
    }

    // ======================== BUILDING BLOCK TESTS ========================

    #[test]
    fn test_wigner_seitz_wireframe_edge_count() {
        let mut scene = Scene3::new();
        plot_wigner_seitz(&rec_lattice(), &mut scene);
        assert_eq!(scene.polylines.len(), 12, "a cubic zone has 12 edges");
    }

    #[test]
    fn test_lattice_vectors_start_at_origin() {
        let mut scene = Scene3::new();
        plot_lattice_vectors(&rec_lattice(), &mut scene);

        assert_eq!(scene.polylines.len(), 3);
        for polyline in &scene.polylines {
            assert_eq!(polyline.points[0], Vector3::zeros());
            assert!(
                (polyline.points[1].norm() - 2.0 * PI).abs() < 1e-12,
                "reciprocal vectors of the unit cube have length 2 pi"
            );
        }
    }

    #[test]
    fn test_path_converts_fractional_coordinates() {
        let lattice = rec_lattice();
        let mut scene = Scene3::new();
        let leg = [Vector3::zeros(), Vector3::new(0.5, 0.0, 0.0)];
        plot_path(&leg, Some(&lattice), false, &mut scene).unwrap();

        let end = scene.polylines[0].points[1];
        assert!((end.x - PI).abs() < 1e-12, "0.5 fractional maps to pi");

        let mut scene = Scene3::new();
        assert!(
            plot_path(&leg, None, false, &mut scene).is_err(),
            "fractional input needs a lattice"
        );
    }

    #[test]
    fn test_labels_are_texified_and_offset() {
        let lattice = rec_lattice();
        let mut scene = Scene3::new();
        let labels = vec![("\\Gamma".to_string(), Vector3::zeros())];
        plot_labels(&labels, Some(&lattice), false, &mut scene).unwrap();

        let label = &scene.labels[0];
        assert_eq!(label.text, "$\\Gamma$");
        assert!(
            (label.position - Vector3::new(0.01, 0.01, 0.01)).norm() < 1e-12,
            "labels are nudged off the anchor"
        );
    }

    #[test]
    fn test_points_fold_into_first_zone() {
        let lattice = rec_lattice();
        let mut scene = Scene3::new();
        // 0.75 fractional folds to -0.25
        plot_points(
            &[Vector3::new(0.75, 0.0, 0.0)],
            Some(&lattice),
            false,
            true,
            &mut scene,
        )
        .unwrap();

        let p = scene.points[0].position;
        assert!((p.x - (-0.5 * PI)).abs() < 1e-9, "folded x, got {}", p.x);

        let mut scene = Scene3::new();
        assert!(
            plot_points(&[Vector3::zeros()], None, false, true, &mut scene).is_err(),
            "folding needs a lattice"
        );
    }

    // ======================== FULL SCENE TESTS ========================

    #[test]
    fn test_brillouin_zone_scene_framing() {
        let lattice = rec_lattice();
        let lines = vec![[Vector3::zeros(), Vector3::new(0.5, 0.0, 0.0)]];
        let labels = vec![
            ("\\Gamma".to_string(), Vector3::zeros()),
            ("X".to_string(), Vector3::new(0.5, 0.0, 0.0)),
        ];

        let scene = plot_brillouin_zone(&lattice, &lines, &labels, &[], false).unwrap();
        assert!(!scene.axes_visible);
        assert!(scene.equal_aspect);
        assert_eq!(
            scene.limits.unwrap(),
            (Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0))
        );
        assert_eq!(scene.labels.len(), 2);
        assert_eq!(scene.polylines.len(), 12 + 1, "wireframe plus one path leg");
    }

    #[test]
    fn test_brillouin_zone_from_kpath_draws_every_leg() {
        let kpath = KPath::cubic();
        let lattice = rec_lattice();
        let scene = plot_brillouin_zone_from_kpath(&kpath, &lattice).unwrap();

        let legs: usize = kpath.segments.iter().map(|s| s.len() - 1).sum();
        assert_eq!(scene.polylines.len(), 12 + legs);
        assert_eq!(scene.labels.len(), kpath.points.len());
    }

    // ======================== ELLIPSOID TESTS ========================

    #[test]
    fn test_ellipsoid_wireframe_counts_and_radii() {
        let lattice = rec_lattice();
        let mut scene = Scene3::new();
        let hessian = Matrix3::identity() * 4.0;
        plot_ellipsoid(&hessian, Vector3::zeros(), Some(&lattice), 1.0, &mut scene).unwrap();

        assert_eq!(scene.polylines.len(), 50, "25 meridians plus 25 parallels");

        // s = 4 everywhere, so every surface point sits at radius 1/2
        for polyline in &scene.polylines {
            for p in &polyline.points {
                assert!(
                    (p.norm() - 0.5).abs() < 1e-9,
                    "isotropic Hessian gives a sphere, got radius {}",
                    p.norm()
                );
            }
        }
    }

    #[test]
    fn test_ellipsoid_requires_lattice() {
        let mut scene = Scene3::new();
        let result = plot_ellipsoid(
            &Matrix3::identity(),
            Vector3::zeros(),
            None,
            1.0,
            &mut scene,
        );
        assert!(result.is_err());
    }
}
