#[cfg(test)]
mod tests_bandstructure {
    use super::super::bandstructure::{BandStructure, Projections};
    use super::super::core::{OrbitalType, Spin};
    use crate::lattice::Lattice;
    use nalgebra::Vector3;
    use std::collections::HashMap;

    fn label(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    /// Gamma -> X -> M path on a cubic reciprocal lattice, 3 points per leg.
    fn kpath() -> Vec<(Vector3<f64>, Option<String>)> {
        vec![
            (Vector3::new(0.0, 0.0, 0.0), label("\\Gamma")),
            (Vector3::new(0.25, 0.0, 0.0), None),
            (Vector3::new(0.5, 0.0, 0.0), label("X")),
            (Vector3::new(0.5, 0.25, 0.0), None),
            (Vector3::new(0.5, 0.5, 0.0), label("M")),
        ]
    }

    fn insulator_bands() -> HashMap<Spin, Vec<Vec<f64>>> {
        let mut bands = HashMap::new();
        // One valence band below and one conduction band above efermi = 0
        bands.insert(
            Spin::Up,
            vec![
                vec![-2.0, -1.5, -1.0, -1.5, -2.0],
                vec![2.0, 2.5, 1.0, 2.5, 2.0],
            ],
        );
        bands
    }

    fn insulator() -> BandStructure {
        BandStructure::new(
            Lattice::cubic(1.0).reciprocal(),
            kpath(),
            insulator_bands(),
            0.0,
            Projections::new(),
        )
        .unwrap()
    }

    // ======================== CONSTRUCTION TESTS ========================

    #[test]
    fn test_new_rejects_band_length_mismatch() {
        let mut bands = HashMap::new();
        bands.insert(Spin::Up, vec![vec![0.0; 4]]);
        let result = BandStructure::new(
            Lattice::cubic(1.0).reciprocal(),
            kpath(),
            bands,
            0.0,
            Projections::new(),
        );
        assert!(result.is_err(), "bands must have one energy per k-point");
    }

    #[test]
    fn test_new_rejects_unlabeled_endpoints() {
        let mut path = kpath();
        path[0].1 = None;
        let result = BandStructure::new(
            Lattice::cubic(1.0).reciprocal(),
            path,
            insulator_bands(),
            0.0,
            Projections::new(),
        );
        assert!(
            result.is_err(),
            "a symmetry-line path must start and end on labeled points"
        );
    }

    #[test]
    fn test_branches_split_at_labeled_pairs() {
        // X repeated at the join marks the branch boundary
        let path = vec![
            (Vector3::new(0.0, 0.0, 0.0), label("\\Gamma")),
            (Vector3::new(0.25, 0.0, 0.0), None),
            (Vector3::new(0.5, 0.0, 0.0), label("X")),
            (Vector3::new(0.5, 0.0, 0.0), label("X")),
            (Vector3::new(0.5, 0.25, 0.0), None),
            (Vector3::new(0.5, 0.5, 0.0), label("M")),
        ];
        let mut bands = HashMap::new();
        bands.insert(Spin::Up, vec![vec![-1.0; 6]]);
        let bs = BandStructure::new(
            Lattice::cubic(1.0).reciprocal(),
            path,
            bands,
            0.0,
            Projections::new(),
        )
        .unwrap();

        assert_eq!(bs.branches.len(), 2, "Gamma-X and X-M");
        assert_eq!(bs.branches[0].name, "\\Gamma-X");
        assert_eq!(bs.branches[1].name, "X-M");
        assert_eq!(bs.branches[0].start_index, 0);
        assert_eq!(bs.branches[0].end_index, 2);
        assert_eq!(bs.branches[1].start_index, 3);
        assert_eq!(bs.branches[1].end_index, 5);
    }

    #[test]
    fn test_interior_label_without_duplicate_keeps_one_branch() {
        // A labeled point between unlabeled neighbors is a waypoint, not a join
        let bs = insulator();
        assert_eq!(bs.branches.len(), 1);
        assert_eq!(bs.branches[0].name, "\\Gamma-M");
        assert_eq!(bs.branches[0].start_index, 0);
        assert_eq!(bs.branches[0].end_index, 4);
    }

    #[test]
    fn test_distance_is_monotonic_arc_length() {
        let bs = insulator();
        assert!((bs.distance[0]).abs() < 1e-12);
        for pair in bs.distance.windows(2) {
            assert!(pair[1] >= pair[0], "distance must never decrease");
        }
        // Cubic a=1: |b| = 2π, so Gamma->X covers π and X->M another π
        let total = bs.distance.last().copied().unwrap();
        assert!(
            (total - 2.0 * std::f64::consts::PI).abs() < 1e-9,
            "total path length should be 2π, got {total}"
        );
    }

    #[test]
    fn test_distance_zero_step_at_discontinuous_join() {
        // X immediately followed by labeled M: a jump, not a segment
        let path = vec![
            (Vector3::new(0.0, 0.0, 0.0), label("\\Gamma")),
            (Vector3::new(0.5, 0.0, 0.0), label("X")),
            (Vector3::new(0.5, 0.5, 0.0), label("M")),
            (Vector3::new(0.0, 0.0, 0.0), label("\\Gamma")),
        ];
        let mut bands = HashMap::new();
        bands.insert(Spin::Up, vec![vec![-1.0; 4]]);
        let bs = BandStructure::new(
            Lattice::cubic(1.0).reciprocal(),
            path,
            bands,
            0.0,
            Projections::new(),
        )
        .unwrap();

        assert!(
            (bs.distance[2] - bs.distance[1]).abs() < 1e-12,
            "consecutive labeled points contribute a zero step"
        );
        assert!(
            (bs.distance[3] - bs.distance[2]).abs() < 1e-12,
            "every step between labeled neighbors is zero"
        );
    }

    // ======================== METAL / EDGE TESTS ========================

    #[test]
    fn test_is_metal_band_crossing() {
        let mut bands = HashMap::new();
        bands.insert(Spin::Up, vec![vec![-1.0, -0.2, 0.3, -0.2, -1.0]]);
        let bs = BandStructure::new(
            Lattice::cubic(1.0).reciprocal(),
            kpath(),
            bands,
            0.0,
            Projections::new(),
        )
        .unwrap();

        assert!(bs.is_metal(), "a band straddling the Fermi level is metallic");
        assert!(bs.vbm().is_none(), "metals have no VBM");
        assert!(bs.cbm().is_none(), "metals have no CBM");
        assert!((bs.band_gap().energy).abs() < 1e-12);
    }

    #[test]
    fn test_vbm_cbm_and_gap() {
        let bs = insulator();
        assert!(!bs.is_metal());

        let vbm = bs.vbm().unwrap();
        assert!((vbm.energy - (-1.0)).abs() < 1e-12, "VBM at -1.0 eV");
        assert_eq!(vbm.kpoint_indices, vec![2], "VBM attained at X");
        assert_eq!(vbm.label.as_deref(), Some("X"));

        let cbm = bs.cbm().unwrap();
        assert!((cbm.energy - 1.0).abs() < 1e-12, "CBM at +1.0 eV");
        assert_eq!(cbm.kpoint_indices, vec![2]);

        let gap = bs.band_gap();
        assert!((gap.energy - 2.0).abs() < 1e-12);
        assert!(gap.direct, "both edges at X make the gap direct");
        assert_eq!(gap.transition, "X-X");
    }

    #[test]
    fn test_indirect_gap_transition_name() {
        let mut bands = HashMap::new();
        bands.insert(
            Spin::Up,
            vec![
                vec![-1.0, -1.5, -2.0, -1.5, -2.0], // VBM at Gamma
                vec![3.0, 2.5, 2.0, 2.5, 1.0],      // CBM at M
            ],
        );
        let bs = BandStructure::new(
            Lattice::cubic(1.0).reciprocal(),
            kpath(),
            bands,
            0.0,
            Projections::new(),
        )
        .unwrap();

        let gap = bs.band_gap();
        assert!(!gap.direct);
        assert_eq!(gap.transition, "\\Gamma-M");
        assert!((gap.energy - 2.0).abs() < 1e-12);
    }

    // ======================== PROJECTION TESTS ========================

    fn projected_band_structure() -> BandStructure {
        let weights = |cu_d: f64, o_p: f64| {
            let mut by_element = HashMap::new();
            let mut cu = HashMap::new();
            cu.insert(OrbitalType::D, cu_d);
            cu.insert(OrbitalType::S, 0.1);
            by_element.insert("Cu".to_string(), cu);
            let mut o = HashMap::new();
            o.insert(OrbitalType::P, o_p);
            by_element.insert("O".to_string(), o);
            by_element
        };

        let mut projections = Projections::new();
        projections.insert(
            Spin::Up,
            vec![
                vec![weights(0.5, 0.4); 5],
                vec![weights(0.2, 0.7); 5],
            ],
        );

        BandStructure::new(
            Lattice::cubic(1.0).reciprocal(),
            kpath(),
            insulator_bands(),
            0.0,
            projections,
        )
        .unwrap()
    }

    #[test]
    fn test_projection_on_elements_sums_orbitals() {
        let bs = projected_band_structure();
        let by_element = bs.projection_on_elements();
        let first = &by_element[&Spin::Up][0][0];
        assert!(
            (first["Cu"] - 0.6).abs() < 1e-12,
            "Cu weight sums d + s = 0.5 + 0.1"
        );
        assert!((first["O"] - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_projections_selection_fills_missing_with_zero() {
        let bs = projected_band_structure();
        let selection = vec![
            ("Cu".to_string(), vec![OrbitalType::D, OrbitalType::P]),
        ];
        let filtered = bs.projections_on_elements_and_orbitals(&selection);
        let first = &filtered[&Spin::Up][0][0];
        let cu = &first["Cu"];
        assert!((cu[&OrbitalType::D] - 0.5).abs() < 1e-12);
        assert!(
            cu[&OrbitalType::P].abs() < 1e-12,
            "an orbital the calculation lacks contributes zero weight"
        );
    }

    #[test]
    fn test_projected_elements_sorted() {
        let bs = projected_band_structure();
        assert_eq!(bs.projected_elements(), vec!["Cu", "O"]);
        assert!(bs.has_projections());
        assert!(!insulator().has_projections());
    }
}
