// Export module: renders the renderer-independent figures and scenes to
// SVG or bitmap files through plotters. The output format follows the file
// extension; `.svg` gets the vector backend, everything else the bitmap one.

use std::path::Path;

use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::ranged1d::{Ranged, ValueFormatter};
use plotters::coord::Shift;
use plotters::element::DashedPathElement;
use plotters::prelude::*;

use crate::figure::{AxisScale, Color as FigureColor, Composite, Figure, LineStyle, PlotElement, Scene3};
use crate::EsPlotError;
use crate::Result;


// Dash pattern (segment length, gap) in pixels per stroke style
const DASH: (u32, u32) = (8, 4);
const DOT: (u32, u32) = (2, 4);

const DEFAULT_FONT_SIZE: f64 = 14.0;

// ======================== FILE RENDERING ========================

/// Render a 2D figure to a file, picking the backend from the extension.
pub fn render_figure<P: AsRef<Path>>(figure: &Figure, path: P, size: (u32, u32)) -> Result<()> {
    let path = path.as_ref();
    log::info!("rendering figure to {}", path.display());
    if is_svg(path) {
        let root = SVGBackend::new(path, size).into_drawing_area();
        render_figure_on(figure, &root)?;
        root.present().map_err(draw_err)
    } else {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        render_figure_on(figure, &root)?;
        root.present().map_err(draw_err)
    }
}

/// Render side-by-side panels to a file.
pub fn render_composite<P: AsRef<Path>>(
    composite: &Composite,
    path: P,
    size: (u32, u32),
) -> Result<()> {
    let path = path.as_ref();
    log::info!("rendering composite to {}", path.display());
    if is_svg(path) {
        let root = SVGBackend::new(path, size).into_drawing_area();
        render_composite_on(composite, &root)?;
        root.present().map_err(draw_err)
    } else {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        render_composite_on(composite, &root)?;
        root.present().map_err(draw_err)
    }
}

/// Render a 3D scene to a file.
pub fn render_scene<P: AsRef<Path>>(scene: &Scene3, path: P, size: (u32, u32)) -> Result<()> {
    let path = path.as_ref();
    log::info!("rendering scene to {}", path.display());
    if is_svg(path) {
        let root = SVGBackend::new(path, size).into_drawing_area();
        render_scene_on(scene, &root)?;
        root.present().map_err(draw_err)
    } else {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        render_scene_on(scene, &root)?;
        root.present().map_err(draw_err)
    }
}

// ======================== IN-MEMORY RENDERING ========================

/// Render a 2D figure into an SVG document string.
pub fn figure_to_svg(figure: &Figure, size: (u32, u32)) -> Result<String> {
    let mut buffer = String::new();
    {
        let root = SVGBackend::with_string(&mut buffer, size).into_drawing_area();
        render_figure_on(figure, &root)?;
        root.present().map_err(draw_err)?;
    }
    Ok(buffer)
}

/// Render side-by-side panels into an SVG document string.
pub fn composite_to_svg(composite: &Composite, size: (u32, u32)) -> Result<String> {
    let mut buffer = String::new();
    {
        let root = SVGBackend::with_string(&mut buffer, size).into_drawing_area();
        render_composite_on(composite, &root)?;
        root.present().map_err(draw_err)?;
    }
    Ok(buffer)
}

/// Render a 3D scene into an SVG document string.
pub fn scene_to_svg(scene: &Scene3, size: (u32, u32)) -> Result<String> {
    let mut buffer = String::new();
    {
        let root = SVGBackend::with_string(&mut buffer, size).into_drawing_area();
        render_scene_on(scene, &root)?;
        root.present().map_err(draw_err)?;
    }
    Ok(buffer)
}

// ======================== 2D FIGURES ========================

fn render_figure_on<DB: DrawingBackend>(
    figure: &Figure,
    root: &DrawingArea<DB, Shift>,
) -> Result<()> {
    root.fill(&WHITE).map_err(draw_err)?;

    let xlim = figure
        .resolved_x_limits()
        .ok_or(EsPlotError::EmptyData("figure has no drawable data"))?;
    let ylim = figure
        .resolved_y_limits()
        .ok_or(EsPlotError::EmptyData("figure has no drawable data"))?;

    let font = figure.font_size.unwrap_or(DEFAULT_FONT_SIZE);
    let mut builder = ChartBuilder::on(root);
    builder
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60);
    if let Some(title) = &figure.title {
        builder.caption(title, ("sans-serif", font + 6.0));
    }

    match (figure.x_scale, figure.y_scale) {
        (AxisScale::Linear, AxisScale::Linear) => {
            let mut chart = builder
                .build_cartesian_2d(xlim.0..xlim.1, ylim.0..ylim.1)
                .map_err(draw_err)?;
            draw_figure(figure, root, &mut chart, xlim, ylim, font)
        }
        (AxisScale::Linear, AxisScale::Log) => {
            let mut chart = builder
                .build_cartesian_2d(xlim.0..xlim.1, (ylim.0..ylim.1).log_scale())
                .map_err(draw_err)?;
            draw_figure(figure, root, &mut chart, xlim, ylim, font)
        }
        (AxisScale::Log, AxisScale::Linear) => {
            let mut chart = builder
                .build_cartesian_2d((xlim.0..xlim.1).log_scale(), ylim.0..ylim.1)
                .map_err(draw_err)?;
            draw_figure(figure, root, &mut chart, xlim, ylim, font)
        }
        (AxisScale::Log, AxisScale::Log) => {
            let mut chart = builder
                .build_cartesian_2d((xlim.0..xlim.1).log_scale(), (ylim.0..ylim.1).log_scale())
                .map_err(draw_err)?;
            draw_figure(figure, root, &mut chart, xlim, ylim, font)
        }
    }
}

/// Draw the mesh, every element in insertion order, the legend, and any
/// explicit tick labels onto a built chart.
fn draw_figure<'a, DB, X, Y>(
    figure: &Figure,
    root: &DrawingArea<DB, Shift>,
    chart: &mut ChartContext<'a, DB, Cartesian2d<X, Y>>,
    xlim: (f64, f64),
    ylim: (f64, f64),
    font: f64,
) -> Result<()>
where
    DB: DrawingBackend + 'a,
    X: Ranged<ValueType = f64> + ValueFormatter<f64>,
    Y: Ranged<ValueType = f64> + ValueFormatter<f64>,
{
    {
        let mut mesh = chart.configure_mesh();
        mesh.disable_mesh();
        mesh.label_style(("sans-serif", font));
        mesh.axis_desc_style(("sans-serif", font + 2.0));
        if let Some(label) = &figure.x_label {
            mesh.x_desc(label);
        }
        if let Some(label) = &figure.y_label {
            mesh.y_desc(label);
        }
        // Explicit ticks replace the automatic labels entirely
        if figure.x_ticks.is_some() {
            mesh.x_labels(0);
        }
        if figure.y_ticks.is_some() {
            mesh.y_labels(0);
        }
        mesh.draw().map_err(draw_err)?;
    }

    for element in &figure.elements {
        draw_element(element, chart, xlim, ylim)?;
    }

    if !figure.legend.is_empty() {
        for entry in &figure.legend {
            let color = to_rgb(entry.color);
            chart
                .draw_series(std::iter::empty::<PathElement<(f64, f64)>>())
                .map_err(draw_err)?
                .label(&entry.label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", font))
            .draw()
            .map_err(draw_err)?;
    }

    let tick_style = ("sans-serif", font).into_font().color(&BLACK);
    if let Some(ticks) = &figure.x_ticks {
        for (&pos, label) in ticks.positions.iter().zip(&ticks.labels) {
            let (px, py) = chart.backend_coord(&(pos, ylim.0));
            root.draw(&Text::new(display_label(label), (px - 6, py + 6), tick_style.clone()))
                .map_err(draw_err)?;
        }
    }
    if let Some(ticks) = &figure.y_ticks {
        for (&pos, label) in ticks.positions.iter().zip(&ticks.labels) {
            let (px, py) = chart.backend_coord(&(xlim.0, pos));
            root.draw(&Text::new(display_label(label), (px - 28, py - 6), tick_style.clone()))
                .map_err(draw_err)?;
        }
    }

    Ok(())
}

fn draw_element<'a, DB, X, Y>(
    element: &PlotElement,
    chart: &mut ChartContext<'a, DB, Cartesian2d<X, Y>>,
    xlim: (f64, f64),
    ylim: (f64, f64),
) -> Result<()>
where
    DB: DrawingBackend + 'a,
    X: Ranged<ValueType = f64> + ValueFormatter<f64>,
    Y: Ranged<ValueType = f64> + ValueFormatter<f64>,
{
    match element {
        PlotElement::Line(line) => {
            let points: Vec<(f64, f64)> =
                line.x.iter().zip(&line.y).map(|(&x, &y)| (x, y)).collect();
            let style = to_rgb(line.color).stroke_width(stroke(line.width));
            draw_styled_path(chart, points, line.style, style)?;
        }
        PlotElement::Area(area) => {
            let points: Vec<(f64, f64)> =
                area.x.iter().zip(&area.y).map(|(&x, &y)| (x, y)).collect();
            chart
                .draw_series(AreaSeries::new(points, 0.0, to_rgb(area.color).mix(0.4)))
                .map_err(draw_err)?;
        }
        PlotElement::Scatter(scatter) => {
            let color = to_rgb(scatter.color);
            chart
                .draw_series(
                    scatter
                        .x
                        .iter()
                        .zip(&scatter.y)
                        .zip(&scatter.sizes)
                        .filter(|&(_, &size)| size > 0.0)
                        .map(|((&x, &y), &size)| {
                            Circle::new((x, y), (0.5 * size).ceil() as i32, color.filled())
                        }),
                )
                .map_err(draw_err)?;
        }
        PlotElement::Segments(segments) => {
            let width = stroke(segments.width);
            match segments.style {
                LineStyle::Solid => {
                    chart
                        .draw_series(segments.segments.iter().zip(&segments.colors).map(
                            |(&(p0, p1), &color)| {
                                PathElement::new(vec![p0, p1], to_rgb(color).stroke_width(width))
                            },
                        ))
                        .map_err(draw_err)?;
                }
                style => {
                    let (size, spacing) = dash_pattern(style);
                    chart
                        .draw_series(segments.segments.iter().zip(&segments.colors).map(
                            |(&(p0, p1), &color)| {
                                DashedPathElement::new(
                                    vec![p0, p1],
                                    size,
                                    spacing,
                                    to_rgb(color).stroke_width(width),
                                )
                            },
                        ))
                        .map_err(draw_err)?;
                }
            }
        }
        PlotElement::Text(text) => {
            let style = ("sans-serif", text.size)
                .into_font()
                .color(&to_rgb(text.color));
            chart
                .draw_series(std::iter::once(Text::new(
                    display_label(&text.text),
                    (text.x, text.y),
                    style,
                )))
                .map_err(draw_err)?;
        }
        PlotElement::VLine {
            x,
            color,
            width,
            style,
        } => {
            let points = vec![(*x, ylim.0), (*x, ylim.1)];
            let shape = to_rgb(*color).stroke_width(stroke(*width));
            draw_styled_path(chart, points, *style, shape)?;
        }
        PlotElement::HLine {
            y,
            color,
            width,
            style,
        } => {
            let points = vec![(xlim.0, *y), (xlim.1, *y)];
            let shape = to_rgb(*color).stroke_width(stroke(*width));
            draw_styled_path(chart, points, *style, shape)?;
        }
    }
    Ok(())
}

fn draw_styled_path<'a, DB, X, Y>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<X, Y>>,
    points: Vec<(f64, f64)>,
    style: LineStyle,
    shape: ShapeStyle,
) -> Result<()>
where
    DB: DrawingBackend + 'a,
    X: Ranged<ValueType = f64> + ValueFormatter<f64>,
    Y: Ranged<ValueType = f64> + ValueFormatter<f64>,
{
    match style {
        LineStyle::Solid => {
            chart
                .draw_series(std::iter::once(PathElement::new(points, shape)))
                .map_err(draw_err)?;
        }
        _ => {
            let (size, spacing) = dash_pattern(style);
            chart
                .draw_series(std::iter::once(DashedPathElement::new(
                    points, size, spacing, shape,
                )))
                .map_err(draw_err)?;
        }
    }
    Ok(())
}

// ======================== COMPOSITES ========================

fn render_composite_on<DB: DrawingBackend>(
    composite: &Composite,
    root: &DrawingArea<DB, Shift>,
) -> Result<()> {
    if composite.panels.is_empty() {
        return Err(EsPlotError::EmptyData("composite has no panels"));
    }
    root.fill(&WHITE).map_err(draw_err)?;

    let area;
    let root = match &composite.title {
        Some(title) => {
            area = root.titled(title, ("sans-serif", 24)).map_err(draw_err)?;
            &area
        }
        None => root,
    };

    let (width, _) = root.dim_in_pixel();
    let total: f64 = composite.width_ratios.iter().sum();
    let mut acc = 0.0;
    let breakpoints: Vec<u32> = composite.width_ratios[..composite.width_ratios.len() - 1]
        .iter()
        .map(|ratio| {
            acc += ratio;
            (width as f64 * acc / total).round() as u32
        })
        .collect();

    let panels = root.split_by_breakpoints(breakpoints.as_slice(), &[] as &[u32]);
    for (figure, panel) in composite.panels.iter().zip(&panels) {
        render_figure_on(figure, panel)?;
    }
    Ok(())
}

// ======================== 3D SCENES ========================

fn render_scene_on<DB: DrawingBackend>(scene: &Scene3, root: &DrawingArea<DB, Shift>) -> Result<()> {
    root.fill(&WHITE).map_err(draw_err)?;

    let (min, max) = scene
        .resolved_limits()
        .ok_or(EsPlotError::EmptyData("scene has no geometry"))?;
    let [x_range, y_range, z_range] = scene_ranges(min, max, scene.equal_aspect);

    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .build_cartesian_3d(
            x_range.0..x_range.1,
            y_range.0..y_range.1,
            z_range.0..z_range.1,
        )
        .map_err(draw_err)?;

    if scene.axes_visible {
        chart.configure_axes().draw().map_err(draw_err)?;
    }

    for polyline in &scene.polylines {
        let style = to_rgb(polyline.color).stroke_width(stroke(polyline.width));
        chart
            .draw_series(LineSeries::new(
                polyline.points.iter().map(|p| (p.x, p.y, p.z)),
                style,
            ))
            .map_err(draw_err)?;
    }

    for point in &scene.points {
        chart
            .draw_series(std::iter::once(Circle::new(
                (point.position.x, point.position.y, point.position.z),
                (0.5 * point.size).ceil() as i32,
                to_rgb(point.color).filled(),
            )))
            .map_err(draw_err)?;
    }

    for label in &scene.labels {
        let style = ("sans-serif", label.size)
            .into_font()
            .color(&to_rgb(label.color));
        chart
            .draw_series(std::iter::once(Text::new(
                display_label(&label.text),
                (label.position.x, label.position.y, label.position.z),
                style,
            )))
            .map_err(draw_err)?;
    }

    Ok(())
}

/// Per-axis view ranges, widened to a shared half-span for equal aspect.
fn scene_ranges(
    min: nalgebra::Vector3<f64>,
    max: nalgebra::Vector3<f64>,
    equal_aspect: bool,
) -> [(f64, f64); 3] {
    if !equal_aspect {
        return [(min.x, max.x), (min.y, max.y), (min.z, max.z)];
    }
    let center = 0.5 * (min + max);
    let span = max - min;
    let half = 0.5 * span.max().max(1e-12);
    [
        (center.x - half, center.x + half),
        (center.y - half, center.y + half),
        (center.z - half, center.z + half),
    ]
}

// ======================== HELPERS ========================

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

fn to_rgb(color: FigureColor) -> RGBColor {
    let (r, g, b) = color.to_rgb8();
    RGBColor(r, g, b)
}

fn stroke(width: f64) -> u32 {
    width.round().max(1.0) as u32
}

fn dash_pattern(style: LineStyle) -> (u32, u32) {
    match style {
        LineStyle::Dashed => DASH,
        _ => DOT,
    }
}

/// TeX-wrapped tick labels rendered as plain text: the math delimiters are
/// dropped and the Greek macros mapped to their glyphs.
pub(crate) fn display_label(label: &str) -> String {
    const GREEK: [(&str, &str); 4] = [
        ("\\Gamma", "\u{0393}"),
        ("\\Delta", "\u{0394}"),
        ("\\Sigma", "\u{03a3}"),
        ("\\Lambda", "\u{039b}"),
    ];
    let mut out = label.replace('$', "");
    for (tex, glyph) in GREEK {
        out = out.replace(tex, glyph);
    }
    out
}

fn draw_err<E: std::error::Error>(err: E) -> EsPlotError {
    EsPlotError::Render(err.to_string())
}
