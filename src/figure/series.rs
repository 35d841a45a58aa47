use serde::{Deserialize, Serialize};

use crate::figure::color::Color;

/// Stroke style for lines and guide lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// A polyline trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub color: Color,
    pub width: f64,
    pub style: LineStyle,
    /// Legend label; unlabeled traces stay out of the legend
    pub label: Option<String>,
}

impl LineSeries {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            x,
            y,
            color: Color::BLACK,
            width: 1.0,
            style: LineStyle::Solid,
            label: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A filled region between a curve and the x-axis, for stacked DOS plots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub color: Color,
    pub label: Option<String>,
}

impl AreaSeries {
    pub fn new(x: Vec<f64>, y: Vec<f64>, color: Color) -> Self {
        Self {
            x,
            y,
            color,
            label: None,
        }
    }

    pub fn with_label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A marker cloud with per-point sizes, for projection-weighted band dots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScatterSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Marker diameter per point
    pub sizes: Vec<f64>,
    pub color: Color,
    pub label: Option<String>,
}

impl ScatterSeries {
    pub fn new(x: Vec<f64>, y: Vec<f64>, sizes: Vec<f64>, color: Color) -> Self {
        Self {
            x,
            y,
            sizes,
            color,
            label: None,
        }
    }

    pub fn with_label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Individually colored line segments, for bands painted by projection color.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentSeries {
    /// Segment endpoints ((x0, y0), (x1, y1))
    pub segments: Vec<((f64, f64), (f64, f64))>,
    /// One color per segment
    pub colors: Vec<Color>,
    pub width: f64,
    pub style: LineStyle,
}

impl SegmentSeries {
    pub fn new(segments: Vec<((f64, f64), (f64, f64))>, colors: Vec<Color>, width: f64) -> Self {
        Self {
            segments,
            colors,
            width,
            style: LineStyle::Solid,
        }
    }

    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }
}

/// A text annotation in data coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextAnnotation {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub color: Color,
    /// Font size in points
    pub size: f64,
}

/// Any drawable element of a 2D figure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PlotElement {
    Line(LineSeries),
    Area(AreaSeries),
    Scatter(ScatterSeries),
    Segments(SegmentSeries),
    Text(TextAnnotation),
    /// Vertical guide line spanning the y-range
    VLine {
        x: f64,
        color: Color,
        width: f64,
        style: LineStyle,
    },
    /// Horizontal guide line spanning the x-range
    HLine {
        y: f64,
        color: Color,
        width: f64,
        style: LineStyle,
    },
}
