use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::figure::color::Color;

/// A polyline in 3D space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polyline3 {
    pub points: Vec<Vector3<f64>>,
    pub color: Color,
    pub width: f64,
}

/// A single marker in 3D space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Point3 {
    pub position: Vector3<f64>,
    pub color: Color,
    /// Marker diameter
    pub size: f64,
}

/// A text label anchored at a 3D position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label3 {
    pub position: Vector3<f64>,
    pub text: String,
    pub color: Color,
    /// Font size in points
    pub size: f64,
}

/// A renderer-independent 3D scene for Brillouin-zone geometry: wireframes,
/// path polylines, markers, and labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene3 {
    pub polylines: Vec<Polyline3>,
    pub points: Vec<Point3>,
    pub labels: Vec<Label3>,
    /// Symmetric view limits (None = derive from the data)
    pub limits: Option<(Vector3<f64>, Vector3<f64>)>,
    /// Zone plots hide the coordinate axes
    pub axes_visible: bool,
    pub equal_aspect: bool,
}

impl Scene3 {
    pub fn new() -> Self {
        Self {
            polylines: Vec::new(),
            points: Vec::new(),
            labels: Vec::new(),
            limits: None,
            axes_visible: true,
            equal_aspect: false,
        }
    }

    pub fn with_axes_visible(mut self, visible: bool) -> Self {
        self.axes_visible = visible;
        self
    }

    pub fn with_equal_aspect(mut self, equal: bool) -> Self {
        self.equal_aspect = equal;
        self
    }

    pub fn add_polyline(&mut self, points: Vec<Vector3<f64>>, color: Color, width: f64) {
        self.polylines.push(Polyline3 {
            points,
            color,
            width,
        });
    }

    pub fn add_point(&mut self, position: Vector3<f64>, color: Color, size: f64) {
        self.points.push(Point3 {
            position,
            color,
            size,
        });
    }

    pub fn add_label<S: Into<String>>(
        &mut self,
        position: Vector3<f64>,
        text: S,
        color: Color,
        size: f64,
    ) {
        self.labels.push(Label3 {
            position,
            text: text.into(),
            color,
            size,
        });
    }

    /// Axis-aligned bounds over all geometry (labels excluded).
    pub fn data_bounds(&self) -> Option<(Vector3<f64>, Vector3<f64>)> {
        let mut bounds: Option<(Vector3<f64>, Vector3<f64>)> = None;
        let mut visit = |p: &Vector3<f64>| {
            let (min, max) = bounds.get_or_insert((*p, *p));
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        };
        for polyline in &self.polylines {
            for p in &polyline.points {
                visit(p);
            }
        }
        for point in &self.points {
            visit(&point.position);
        }
        bounds
    }

    /// Effective view limits: the explicit setting, else the data bounds.
    pub fn resolved_limits(&self) -> Option<(Vector3<f64>, Vector3<f64>)> {
        self.limits.or_else(|| self.data_bounds())
    }
}

impl Default for Scene3 {
    fn default() -> Self {
        Self::new()
    }
}
