#[cfg(test)]
mod tests_figure {
    use super::super::color::{palette_color, Color, SET1};
    use super::super::figure::{Composite, Figure, SeriesKind};
    use super::super::scene::Scene3;
    use super::super::series::{AreaSeries, LineSeries, LineStyle, ScatterSeries};
    use nalgebra::Vector3;

    // ======================== COLOR TESTS ========================

    #[test]
    fn test_palette_cycles() {
        assert_eq!(palette_color(0), SET1[0]);
        assert_eq!(palette_color(9), SET1[0], "palette wraps after nine colors");
        assert_eq!(palette_color(11), SET1[2]);
    }

    #[test]
    fn test_color_rgb8_roundtrip() {
        let color = Color::from_rgb8(0xe4, 0x1a, 0x1c);
        assert_eq!(color.to_rgb8(), (0xe4, 0x1a, 0x1c));
    }

    #[test]
    fn test_color_average_is_midpoint() {
        let mid = Color::RED.average(Color::BLUE);
        assert!((mid.r - 0.5).abs() < 1e-12);
        assert!(mid.g.abs() < 1e-12);
        assert!((mid.b - 0.5).abs() < 1e-12);
    }

    // ======================== LEGEND & BOUNDS TESTS ========================

    #[test]
    fn test_labeled_series_register_legend_entries() {
        let mut figure = Figure::new();
        figure.add_line(
            LineSeries::new(vec![0.0, 1.0], vec![0.0, 1.0]).with_label("total"),
        );
        figure.add_line(LineSeries::new(vec![0.0, 1.0], vec![1.0, 0.0]));
        figure.add_area(AreaSeries::new(
            vec![0.0, 1.0],
            vec![0.5, 0.5],
            Color::GREEN,
        ));

        assert_eq!(figure.legend.len(), 1, "only labeled series enter the legend");
        assert_eq!(figure.legend[0].label, "total");
        assert_eq!(figure.legend[0].kind, SeriesKind::Line);
        assert_eq!(figure.elements.len(), 3);
    }

    #[test]
    fn test_data_bounds_cover_all_series() {
        let mut figure = Figure::new();
        figure.add_line(LineSeries::new(vec![-2.0, 3.0], vec![0.0, 1.0]));
        figure.add_scatter(ScatterSeries::new(
            vec![1.0],
            vec![-5.0],
            vec![2.0],
            Color::BLACK,
        ));
        figure.add_vline(100.0, Color::BLACK, 1.0, LineStyle::Dashed);

        let ((x_min, x_max), (y_min, y_max)) = figure.data_bounds().unwrap();
        assert!((x_min - (-2.0)).abs() < 1e-12);
        assert!((x_max - 3.0).abs() < 1e-12, "guide lines do not widen bounds");
        assert!((y_min - (-5.0)).abs() < 1e-12);
        assert!((y_max - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_y_range_within_window() {
        let mut figure = Figure::new();
        figure.add_line(LineSeries::new(
            vec![0.0, 1.0, 2.0, 3.0],
            vec![10.0, 1.0, 2.0, 50.0],
        ));

        let (y_min, y_max) = figure.y_range_within((0.5, 2.5)).unwrap();
        assert!((y_min - 1.0).abs() < 1e-12);
        assert!(
            (y_max - 2.0).abs() < 1e-12,
            "points outside the x-window are ignored"
        );
        assert!(figure.y_range_within((100.0, 200.0)).is_none());
    }

    #[test]
    fn test_resolved_limits_prefer_explicit() {
        let mut figure = Figure::new().with_x_limits((-4.0, 4.0));
        figure.add_line(LineSeries::new(vec![0.0, 1.0], vec![0.0, 1.0]));

        assert_eq!(figure.resolved_x_limits(), Some((-4.0, 4.0)));
        assert_eq!(figure.resolved_y_limits(), Some((0.0, 1.0)));
    }

    // ======================== COMPOSITE & SCENE TESTS ========================

    #[test]
    fn test_composite_keeps_panel_order() {
        let bands = Figure::new().with_title("bands");
        let dos = Figure::new().with_title("dos");
        let composite = Composite::new(vec![bands, dos], vec![2.0, 1.0]);

        assert_eq!(composite.panels.len(), 2);
        assert_eq!(composite.width_ratios, vec![2.0, 1.0]);
        assert_eq!(composite.panels[0].title.as_deref(), Some("bands"));
    }

    #[test]
    fn test_scene_bounds_ignore_labels() {
        let mut scene = Scene3::new();
        scene.add_polyline(
            vec![Vector3::new(-1.0, 0.0, 0.0), Vector3::new(1.0, 2.0, 0.0)],
            Color::BLACK,
            1.0,
        );
        scene.add_point(Vector3::new(0.0, 0.0, -3.0), Color::RED, 2.0);
        scene.add_label(Vector3::new(50.0, 50.0, 50.0), "\\Gamma", Color::BLUE, 25.0);

        let (min, max) = scene.data_bounds().unwrap();
        assert!((min.z - (-3.0)).abs() < 1e-12);
        assert!((max.x - 1.0).abs() < 1e-12, "labels do not widen bounds");
        assert!((max.y - 2.0).abs() < 1e-12);
    }
}
