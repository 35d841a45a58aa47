use serde::{Deserialize, Serialize};

use crate::figure::axes::{AxisScale, TickSet};
use crate::figure::color::Color;
use crate::figure::series::{
    AreaSeries, LineSeries, LineStyle, PlotElement, ScatterSeries, SegmentSeries, TextAnnotation,
};

/// Legend marker shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesKind {
    Line,
    Area,
    Scatter,
}

/// One legend row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
    pub kind: SeriesKind,
}

/// A renderer-independent 2D figure: drawable elements plus axis settings.
///
/// Adapters build figures; the export module maps them onto a drawing
/// backend. Elements render in insertion order, later ones on top.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Figure {
    pub elements: Vec<PlotElement>,
    pub legend: Vec<LegendEntry>,

    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,

    /// Axis limits (None = derive from the data)
    pub x_limits: Option<(f64, f64)>,
    pub y_limits: Option<(f64, f64)>,

    pub x_scale: AxisScale,
    pub y_scale: AxisScale,

    /// Explicit x ticks (high-symmetry labels); None = automatic ticking
    pub x_ticks: Option<TickSet>,
    /// Explicit y ticks (energy grid); None = automatic ticking
    pub y_ticks: Option<TickSet>,

    /// Base font size in points; None = backend default
    pub font_size: Option<f64>,
}

impl Figure {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            legend: Vec::new(),
            title: None,
            x_label: None,
            y_label: None,
            x_limits: None,
            y_limits: None,
            x_scale: AxisScale::Linear,
            y_scale: AxisScale::Linear,
            x_ticks: None,
            y_ticks: None,
            font_size: None,
        }
    }

    // ======================== BUILDERS ========================

    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_labels<S: Into<String>>(mut self, x_label: S, y_label: S) -> Self {
        self.x_label = Some(x_label.into());
        self.y_label = Some(y_label.into());
        self
    }

    pub fn with_x_limits(mut self, limits: (f64, f64)) -> Self {
        self.x_limits = Some(limits);
        self
    }

    pub fn with_y_limits(mut self, limits: (f64, f64)) -> Self {
        self.y_limits = Some(limits);
        self
    }

    pub fn with_y_scale(mut self, scale: AxisScale) -> Self {
        self.y_scale = scale;
        self
    }

    pub fn with_x_ticks(mut self, ticks: TickSet) -> Self {
        self.x_ticks = Some(ticks);
        self
    }

    pub fn with_y_ticks(mut self, ticks: TickSet) -> Self {
        self.y_ticks = Some(ticks);
        self
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    // ======================== ELEMENTS ========================

    /// Add a line trace, registering a legend entry when it has a label.
    pub fn add_line(&mut self, line: LineSeries) {
        if let Some(label) = &line.label {
            self.legend.push(LegendEntry {
                label: label.clone(),
                color: line.color,
                kind: SeriesKind::Line,
            });
        }
        self.elements.push(PlotElement::Line(line));
    }

    pub fn add_area(&mut self, area: AreaSeries) {
        if let Some(label) = &area.label {
            self.legend.push(LegendEntry {
                label: label.clone(),
                color: area.color,
                kind: SeriesKind::Area,
            });
        }
        self.elements.push(PlotElement::Area(area));
    }

    pub fn add_scatter(&mut self, scatter: ScatterSeries) {
        if let Some(label) = &scatter.label {
            self.legend.push(LegendEntry {
                label: label.clone(),
                color: scatter.color,
                kind: SeriesKind::Scatter,
            });
        }
        self.elements.push(PlotElement::Scatter(scatter));
    }

    pub fn add_segments(&mut self, segments: SegmentSeries) {
        self.elements.push(PlotElement::Segments(segments));
    }

    pub fn add_text(&mut self, text: TextAnnotation) {
        self.elements.push(PlotElement::Text(text));
    }

    pub fn add_vline(&mut self, x: f64, color: Color, width: f64, style: LineStyle) {
        self.elements.push(PlotElement::VLine {
            x,
            color,
            width,
            style,
        });
    }

    pub fn add_hline(&mut self, y: f64, color: Color, width: f64, style: LineStyle) {
        self.elements.push(PlotElement::HLine {
            y,
            color,
            width,
            style,
        });
    }

    // ======================== BOUNDS ========================

    /// Data bounds over all point-bearing elements. Guide lines and text do
    /// not contribute.
    pub fn data_bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let mut bounds: Option<((f64, f64), (f64, f64))> = None;
        self.for_each_point(|x, y| {
            let ((x_min, x_max), (y_min, y_max)) =
                bounds.get_or_insert(((x, x), (y, y)));
            *x_min = x_min.min(x);
            *x_max = x_max.max(x);
            *y_min = y_min.min(y);
            *y_max = y_max.max(y);
        });
        bounds
    }

    /// y-range of the data falling inside an x-window, for axis autoscaling
    /// when the x-limits are fixed.
    pub fn y_range_within(&self, x_window: (f64, f64)) -> Option<(f64, f64)> {
        let mut range: Option<(f64, f64)> = None;
        self.for_each_point(|x, y| {
            if x_window.0 <= x && x <= x_window.1 {
                let (y_min, y_max) = range.get_or_insert((y, y));
                *y_min = y_min.min(y);
                *y_max = y_max.max(y);
            }
        });
        range
    }

    /// Effective x-limits: the explicit setting, else the data bounds.
    pub fn resolved_x_limits(&self) -> Option<(f64, f64)> {
        self.x_limits.or_else(|| self.data_bounds().map(|(x, _)| x))
    }

    /// Effective y-limits: the explicit setting, else the data bounds.
    pub fn resolved_y_limits(&self) -> Option<(f64, f64)> {
        self.y_limits.or_else(|| self.data_bounds().map(|(_, y)| y))
    }

    fn for_each_point(&self, mut visit: impl FnMut(f64, f64)) {
        for element in &self.elements {
            match element {
                PlotElement::Line(LineSeries { x, y, .. })
                | PlotElement::Area(AreaSeries { x, y, .. })
                | PlotElement::Scatter(ScatterSeries { x, y, .. }) => {
                    for (&xi, &yi) in x.iter().zip(y) {
                        visit(xi, yi);
                    }
                }
                PlotElement::Segments(SegmentSeries { segments, .. }) => {
                    for &((x0, y0), (x1, y1)) in segments {
                        visit(x0, y0);
                        visit(x1, y1);
                    }
                }
                PlotElement::Text(TextAnnotation { .. })
                | PlotElement::VLine { .. }
                | PlotElement::HLine { .. } => {}
            }
        }
    }
}

impl Default for Figure {
    fn default() -> Self {
        Self::new()
    }
}

/// Side-by-side panels sharing one canvas, e.g. bands next to a DOS.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Composite {
    pub panels: Vec<Figure>,
    /// Horizontal space per panel, normalized by their sum
    pub width_ratios: Vec<f64>,
    pub title: Option<String>,
}

impl Composite {
    pub fn new(panels: Vec<Figure>, width_ratios: Vec<f64>) -> Self {
        debug_assert_eq!(panels.len(), width_ratios.len());
        Self {
            panels,
            width_ratios,
            title: None,
        }
    }

    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }
}
