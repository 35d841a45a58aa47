#[cfg(test)]
mod tests_bands_plotter {
    use super::super::bands::BandsPlotter;
    use crate::config::SPLINE_RESOLUTION;
    use crate::electronic_structure::{BandStructure, Projections, Spin};
    use crate::figure::PlotElement;
    use crate::lattice::Lattice;
    use nalgebra::Vector3;
    use std::collections::HashMap;

    fn label(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    /// Gamma -> X, then a jump to M -> Gamma, with a discontinuous join.
    fn jump_path() -> Vec<(Vector3<f64>, Option<String>)> {
        vec![
            (Vector3::new(0.0, 0.0, 0.0), label("\\Gamma")),
            (Vector3::new(0.25, 0.0, 0.0), None),
            (Vector3::new(0.5, 0.0, 0.0), label("X")),
            (Vector3::new(0.5, 0.5, 0.0), label("M")),
            (Vector3::new(0.25, 0.25, 0.0), None),
            (Vector3::new(0.0, 0.0, 0.0), label("\\Gamma")),
        ]
    }

    fn insulator() -> BandStructure {
        let mut bands = HashMap::new();
        bands.insert(
            Spin::Up,
            vec![
                vec![-2.0, -1.5, -1.0, -1.2, -1.6, -2.0],
                vec![2.0, 1.5, 1.0, 1.3, 1.7, 2.0],
            ],
        );
        BandStructure::new(
            Lattice::cubic(1.0).reciprocal(),
            jump_path(),
            bands,
            0.0,
            Projections::new(),
        )
        .unwrap()
    }

    fn metal() -> BandStructure {
        let mut bands = HashMap::new();
        bands.insert(Spin::Up, vec![vec![-1.0, -0.3, 0.4, 0.2, -0.5, -1.0]]);
        BandStructure::new(
            Lattice::cubic(1.0).reciprocal(),
            jump_path(),
            bands,
            0.0,
            Projections::new(),
        )
        .unwrap()
    }

    // ======================== PLOT DATA TESTS ========================

    #[test]
    fn test_bs_plot_data_shifts_to_vbm() {
        let bs = insulator();
        let data = BandsPlotter::new(&bs).bs_plot_data(true);

        assert!(!data.is_metal);
        assert!((data.zero_energy - (-1.0)).abs() < 1e-12, "zero at the VBM");
        assert_eq!(data.distances.len(), 2, "one distance array per branch");
        assert_eq!(data.distances[0].len(), 3);

        // VBM at X, shifted to zero
        assert_eq!(data.vbm.len(), 1);
        assert!(data.vbm[0].1.abs() < 1e-12);
        assert!((data.cbm[0].1 - 2.0).abs() < 1e-12);
        assert!(data.band_gap.contains("Direct"));
        assert!(data.band_gap.contains("2.0000 eV"));
    }

    #[test]
    fn test_bs_plot_data_metal_uses_efermi() {
        let bs = metal();
        let data = BandsPlotter::new(&bs).bs_plot_data(true);
        assert!(data.is_metal);
        assert!(data.zero_energy.abs() < 1e-12);
        assert!(data.vbm.is_empty());
        assert!(data.band_gap.is_empty());
    }

    #[test]
    fn test_unshifted_data_keeps_absolute_energies() {
        let bs = insulator();
        let data = BandsPlotter::new(&bs).bs_plot_data(false);
        assert!(data.zero_energy.abs() < 1e-12);
        assert!((data.energies[0][&Spin::Up][0][0] - (-2.0)).abs() < 1e-12);
    }

    // ======================== TICK TESTS ========================

    #[test]
    fn test_ticks_merge_discontinuous_join() {
        let bs = insulator();
        let ticks = BandsPlotter::new(&bs).get_ticks();

        assert_eq!(ticks.labels, vec!["$\\Gamma$", "X|M", "$\\Gamma$"]);
        assert_eq!(ticks.positions.len(), 3);
        // The merged tick sits at the join distance
        assert!((ticks.positions[1] - bs.distance[3]).abs() < 1e-12);
    }

    #[test]
    fn test_plot_dedups_repeated_tick_labels() {
        // A continuous path whose join repeats the shared vertex
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

        let figure = BandsPlotter::new(&bs).get_plot(true, None, false, false, None);
        let ticks = figure.x_ticks.unwrap();
        assert_eq!(
            ticks.labels,
            vec!["$\\Gamma$", "X", "M"],
            "the repeated X collapses to one tick"
        );
    }

    // ======================== FIGURE TESTS ========================

    #[test]
    fn test_plot_line_counts_and_limits() {
        let bs = insulator();
        let figure = BandsPlotter::new(&bs).get_plot(true, None, false, false, None);

        let lines = figure
            .elements
            .iter()
            .filter(|e| matches!(e, PlotElement::Line(_)))
            .count();
        assert_eq!(lines, 4, "2 branches x 2 bands");

        let (y_min, y_max) = figure.y_limits.unwrap();
        assert!((y_min - (-4.0)).abs() < 1e-12, "VBM - 4 window floor");
        assert!((y_max - 6.0).abs() < 1e-12, "CBM + 4 window ceiling");
        assert_eq!(figure.x_limits.unwrap().0, 0.0);
    }

    #[test]
    fn test_plot_metal_window_and_fermi_line() {
        let bs = metal();
        let figure = BandsPlotter::new(&bs).get_plot(true, None, false, false, None);
        assert_eq!(figure.y_limits.unwrap(), (-10.0, 10.0));

        // Unshifted plots draw the Fermi level
        let figure = BandsPlotter::new(&bs).get_plot(false, None, false, false, None);
        let has_fermi = figure
            .elements
            .iter()
            .any(|e| matches!(e, PlotElement::HLine { y, .. } if y.abs() < 1e-12));
        assert!(has_fermi);
    }

    #[test]
    fn test_smooth_resamples_branches() {
        let bs = insulator();
        let figure = BandsPlotter::new(&bs).get_plot(true, None, true, false, None);

        let first_line = figure
            .elements
            .iter()
            .find_map(|e| match e {
                PlotElement::Line(l) => Some(l),
                _ => None,
            })
            .unwrap();
        assert_eq!(first_line.x.len(), SPLINE_RESOLUTION);
        assert!(first_line.y.iter().all(|y| y.is_finite()));
    }

    #[test]
    fn test_vbm_cbm_markers() {
        let bs = insulator();
        let figure = BandsPlotter::new(&bs).get_plot(true, None, false, true, None);
        let scatters = figure
            .elements
            .iter()
            .filter(|e| matches!(e, PlotElement::Scatter(_)))
            .count();
        assert_eq!(scatters, 2, "one marker set for the VBM, one for the CBM");
    }

    // ======================== COMPARISON & ZONE TESTS ========================

    #[test]
    fn test_plot_compare_requires_matching_branches() {
        let bs = insulator();
        let mut bands = HashMap::new();
        bands.insert(Spin::Up, vec![vec![-1.0, -0.8, -0.9]]);
        let other = BandStructure::new(
            Lattice::cubic(1.0).reciprocal(),
            vec![
                (Vector3::new(0.0, 0.0, 0.0), label("\\Gamma")),
                (Vector3::new(0.25, 0.0, 0.0), None),
                (Vector3::new(0.5, 0.0, 0.0), label("X")),
            ],
            bands,
            0.0,
            Projections::new(),
        )
        .unwrap();

        let result = BandsPlotter::new(&bs).plot_compare(&other, true);
        assert!(result.is_err(), "differing branch layouts cannot be overlaid");
    }

    #[test]
    fn test_plot_compare_adds_overlay_lines() {
        let bs = insulator();
        let other = insulator();
        let base_lines = BandsPlotter::new(&bs)
            .get_plot(true, None, false, false, None)
            .elements
            .iter()
            .filter(|e| matches!(e, PlotElement::Line(_)))
            .count();

        let figure = BandsPlotter::new(&bs).plot_compare(&other, true).unwrap();
        let lines = figure
            .elements
            .iter()
            .filter(|e| matches!(e, PlotElement::Line(_)))
            .count();
        assert_eq!(lines, 2 * base_lines, "overlay doubles the band traces");
    }

    #[test]
    fn test_plot_brillouin_scene() {
        let bs = insulator();
        let scene = BandsPlotter::new(&bs).plot_brillouin().unwrap();

        assert!(!scene.axes_visible);
        assert!(scene.equal_aspect);
        assert_eq!(scene.labels.len(), 3, "Gamma, X, M without duplicates");
        assert!(
            scene.polylines.len() > 2,
            "wireframe edges plus the two path legs"
        );
    }
}
