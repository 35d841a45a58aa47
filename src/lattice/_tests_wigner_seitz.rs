#[cfg(test)]
mod tests_wigner_seitz {
    use super::super::cell::Lattice;
    use super::super::wigner_seitz::*;
    use nalgebra::{Matrix3, Vector3};
    use std::f64::consts::PI;

    const TEST_TOLERANCE: f64 = 1e-10;

    // ======================== LATTICE POINT GENERATION TESTS ========================

    #[test]
    fn test_generate_lattice_points_shell_counts() {
        let basis = Matrix3::identity();

        // Shell 1: 3^3 - 1 = 26 points, shell 2: 5^3 - 1 = 124 points
        let shell1 = generate_lattice_points_by_shell(&basis, 1);
        assert_eq!(shell1.len(), 26, "Shell 1 should contain 26 points");

        let shell2 = generate_lattice_points_by_shell(&basis, 2);
        assert_eq!(shell2.len(), 124, "Shell 2 should contain 124 points");

        // Origin must be excluded
        for point in &shell1 {
            assert!(
                point.norm() > TEST_TOLERANCE,
                "Origin should never appear among neighbor points"
            );
        }
    }

    #[test]
    fn test_generate_lattice_points_nearest_distance() {
        let basis = Matrix3::from_diagonal(&Vector3::new(2.0, 2.0, 2.0));
        let points = generate_lattice_points_by_shell(&basis, 1);

        let nearest = points
            .iter()
            .map(|p| p.norm())
            .fold(f64::INFINITY, f64::min);
        assert!(
            (nearest - 2.0).abs() < TEST_TOLERANCE,
            "Nearest neighbor of a cubic lattice with a=2 sits at distance 2"
        );
    }

    // ======================== WIGNER-SEITZ CELL TESTS ========================

    #[test]
    fn test_wigner_seitz_cell_simple_cubic() {
        let basis = Matrix3::identity();
        let ws_cell = compute_wigner_seitz_cell(&basis, TEST_TOLERANCE);

        if ws_cell.vertices.len() != 8 || (ws_cell.measure - 1.0).abs() > 0.01 {
            eprintln!(
                "DEBUG: Cubic WS cell has {} vertices, volume = {}",
                ws_cell.vertices.len(),
                ws_cell.measure
            );
            eprintln!("DEBUG: Vertices: {:?}", ws_cell.vertices);
        }

        // Simple cubic lattice: the cell is a cube with 8 vertices, 12 edges, 6 faces
        assert_eq!(
            ws_cell.vertices.len(),
            8,
            "Cubic WS cell should have 8 vertices"
        );
        assert_eq!(
            ws_cell.edges.len(),
            12,
            "Cubic WS cell should have 12 edges"
        );
        assert_eq!(ws_cell.faces.len(), 6, "Cubic WS cell should have 6 faces");
        assert!(
            (ws_cell.measure - 1.0).abs() < 0.01,
            "Cubic WS cell volume should equal the unit cell volume"
        );

        // Vertices at (±0.5, ±0.5, ±0.5)
        for vertex in &ws_cell.vertices {
            assert!(
                (vertex.x.abs() - 0.5).abs() < 0.01,
                "x coordinates should be ±0.5"
            );
            assert!(
                (vertex.y.abs() - 0.5).abs() < 0.01,
                "y coordinates should be ±0.5"
            );
            assert!(
                (vertex.z.abs() - 0.5).abs() < 0.01,
                "z coordinates should be ±0.5"
            );
        }
    }

    #[test]
    fn test_wigner_seitz_cell_fcc_is_rhombic_dodecahedron() {
        // FCC primitive vectors with conventional parameter a = 1
        let a1 = Vector3::new(0.0, 0.5, 0.5);
        let a2 = Vector3::new(0.5, 0.0, 0.5);
        let a3 = Vector3::new(0.5, 0.5, 0.0);
        let basis = Matrix3::from_columns(&[a1, a2, a3]);

        let ws_cell = compute_wigner_seitz_cell(&basis, TEST_TOLERANCE);

        if ws_cell.faces.len() != 12 {
            eprintln!(
                "DEBUG: FCC WS cell has {} faces (expected 12), {} vertices, volume = {}",
                ws_cell.faces.len(),
                ws_cell.vertices.len(),
                ws_cell.measure
            );
        }

        // Rhombic dodecahedron: 12 faces, 14 vertices, 24 edges
        assert_eq!(
            ws_cell.faces.len(),
            12,
            "FCC WS cell should be a rhombic dodecahedron with 12 faces"
        );
        assert_eq!(
            ws_cell.vertices.len(),
            14,
            "Rhombic dodecahedron has 14 vertices"
        );
        assert_eq!(ws_cell.edges.len(), 24, "Rhombic dodecahedron has 24 edges");

        let cell_volume = basis.determinant().abs();
        assert!(
            (ws_cell.measure - cell_volume).abs() < 0.01,
            "WS cell volume should equal the primitive cell volume"
        );
    }

    #[test]
    fn test_wigner_seitz_cell_bcc_is_truncated_octahedron() {
        // BCC primitive vectors with conventional parameter a = 1
        let a1 = Vector3::new(-0.5, 0.5, 0.5);
        let a2 = Vector3::new(0.5, -0.5, 0.5);
        let a3 = Vector3::new(0.5, 0.5, -0.5);
        let basis = Matrix3::from_columns(&[a1, a2, a3]);

        let ws_cell = compute_wigner_seitz_cell(&basis, TEST_TOLERANCE);

        // Truncated octahedron: 14 faces (8 hexagons + 6 squares), 24 vertices, 36 edges
        assert_eq!(
            ws_cell.faces.len(),
            14,
            "BCC WS cell should be a truncated octahedron with 14 faces"
        );
        assert_eq!(
            ws_cell.vertices.len(),
            24,
            "Truncated octahedron has 24 vertices"
        );
        assert_eq!(
            ws_cell.edges.len(),
            36,
            "Truncated octahedron has 36 edges"
        );

        let cell_volume = basis.determinant().abs();
        assert!(
            (ws_cell.measure - cell_volume).abs() < 0.01,
            "WS cell volume should equal the primitive cell volume"
        );
    }

    #[test]
    fn test_wigner_seitz_cell_contains_origin() {
        let basis = Matrix3::from_diagonal(&Vector3::new(1.0, 1.3, 0.8));
        let ws_cell = compute_wigner_seitz_cell(&basis, TEST_TOLERANCE);

        assert!(
            ws_cell.contains(Vector3::zeros()),
            "The origin must lie inside its own Wigner-Seitz cell"
        );
        assert!(
            !ws_cell.contains(Vector3::new(1.0, 1.3, 0.8)),
            "A full lattice translation must lie outside the cell"
        );
    }

    // ======================== BRILLOUIN ZONE TESTS ========================

    #[test]
    fn test_brillouin_zone_volume_cubic() {
        let a = 2.0;
        let lattice = Lattice::cubic(a);
        let reciprocal = lattice.reciprocal();

        let bz = compute_brillouin_zone(&reciprocal.basis, TEST_TOLERANCE);

        // BZ volume = (2π)³ / V_cell
        let expected = (2.0 * PI).powi(3) / lattice.volume();
        assert!(
            (bz.measure - expected).abs() / expected < 0.01,
            "BZ volume should be (2π)³/V: got {}, expected {}",
            bz.measure,
            expected
        );
    }

    #[test]
    fn test_brillouin_zone_fcc_direct_is_bcc_reciprocal() {
        // The reciprocal of FCC is BCC, so the BZ is a truncated octahedron
        let a1 = Vector3::new(0.0, 0.5, 0.5);
        let a2 = Vector3::new(0.5, 0.0, 0.5);
        let a3 = Vector3::new(0.5, 0.5, 0.0);
        let lattice = Lattice::from_vectors(a1, a2, a3);
        let reciprocal = lattice.reciprocal();

        let bz = compute_brillouin_zone(&reciprocal.basis, TEST_TOLERANCE);

        assert_eq!(
            bz.faces.len(),
            14,
            "FCC Brillouin zone should be a truncated octahedron"
        );
    }

    // ======================== WIREFRAME TESTS ========================

    #[test]
    fn test_wireframe_edge_lengths_cubic() {
        let basis = Matrix3::identity();
        let ws_cell = compute_wigner_seitz_cell(&basis, TEST_TOLERANCE);

        let wireframe = ws_cell.wireframe();
        assert_eq!(wireframe.len(), 12, "Cube wireframe has 12 segments");

        for (start, end) in &wireframe {
            let length = (end - start).norm();
            assert!(
                (length - 1.0).abs() < 0.01,
                "All cube edges should have length 1, got {}",
                length
            );
        }
    }
}
