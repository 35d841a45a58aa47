use serde::{Deserialize, Serialize};

/// Axis scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisScale {
    #[default]
    Linear,
    Log,
}

/// Explicit tick positions and labels for one axis, replacing automatic
/// ticking. Band plots use this for the high-symmetry labels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickSet {
    pub positions: Vec<f64>,
    pub labels: Vec<String>,
}

impl TickSet {
    pub fn new(positions: Vec<f64>, labels: Vec<String>) -> Self {
        Self { positions, labels }
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
