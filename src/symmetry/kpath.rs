use std::collections::HashMap;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::EsPlotError;
use crate::Result;

/// A high-symmetry k-path through the Brillouin zone.
///
/// `points` maps labels to fractional coordinates of the reciprocal lattice;
/// `segments` lists continuous runs of labels. A break between two segments
/// is a discontinuous jump in the path (drawn as "A|B" on band-plot axes).
///
/// Labels use the plotting convention: raw TeX like "\\Gamma" for Greek
/// letters, plain letters otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KPath {
    pub points: HashMap<String, Vector3<f64>>,
    pub segments: Vec<Vec<String>>,
}

impl KPath {
    pub fn new(points: HashMap<String, Vector3<f64>>, segments: Vec<Vec<String>>) -> Self {
        Self { points, segments }
    }

    /// Simple cubic: Γ → X → M → Γ → R → X, then M → R.
    pub fn cubic() -> Self {
        let points = label_map(&[
            ("\\Gamma", [0.0, 0.0, 0.0]),
            ("X", [0.5, 0.0, 0.0]),
            ("M", [0.5, 0.5, 0.0]),
            ("R", [0.5, 0.5, 0.5]),
        ]);
        let segments = vec![
            labels(&["\\Gamma", "X", "M", "\\Gamma", "R", "X"]),
            labels(&["M", "R"]),
        ];
        Self::new(points, segments)
    }

    /// Face-centered cubic: Γ → X → W → K → Γ → L → U → W → L → K, then U → X.
    pub fn fcc() -> Self {
        let points = label_map(&[
            ("\\Gamma", [0.0, 0.0, 0.0]),
            ("X", [0.5, 0.0, 0.5]),
            ("W", [0.5, 0.25, 0.75]),
            ("K", [0.375, 0.375, 0.75]),
            ("L", [0.5, 0.5, 0.5]),
            ("U", [0.625, 0.25, 0.625]),
        ]);
        let segments = vec![
            labels(&[
                "\\Gamma", "X", "W", "K", "\\Gamma", "L", "U", "W", "L", "K",
            ]),
            labels(&["U", "X"]),
        ];
        Self::new(points, segments)
    }

    /// Body-centered cubic: Γ → H → N → Γ → P → H, then P → N.
    pub fn bcc() -> Self {
        let points = label_map(&[
            ("\\Gamma", [0.0, 0.0, 0.0]),
            ("H", [0.5, -0.5, 0.5]),
            ("N", [0.0, 0.0, 0.5]),
            ("P", [0.25, 0.25, 0.25]),
        ]);
        let segments = vec![
            labels(&["\\Gamma", "H", "N", "\\Gamma", "P", "H"]),
            labels(&["P", "N"]),
        ];
        Self::new(points, segments)
    }

    /// Simple tetragonal: Γ → X → M → Γ → Z → R → A → Z.
    pub fn tetragonal() -> Self {
        let points = label_map(&[
            ("\\Gamma", [0.0, 0.0, 0.0]),
            ("X", [0.5, 0.0, 0.0]),
            ("M", [0.5, 0.5, 0.0]),
            ("Z", [0.0, 0.0, 0.5]),
            ("R", [0.5, 0.0, 0.5]),
            ("A", [0.5, 0.5, 0.5]),
        ]);
        let segments = vec![labels(&[
            "\\Gamma", "X", "M", "\\Gamma", "Z", "R", "A", "Z",
        ])];
        Self::new(points, segments)
    }

    /// Hexagonal: Γ → M → K → Γ → A → L → H → A, then L → M and K → H.
    pub fn hexagonal() -> Self {
        let points = label_map(&[
            ("\\Gamma", [0.0, 0.0, 0.0]),
            ("M", [0.5, 0.0, 0.0]),
            ("K", [1.0 / 3.0, 1.0 / 3.0, 0.0]),
            ("A", [0.0, 0.0, 0.5]),
            ("L", [0.5, 0.0, 0.5]),
            ("H", [1.0 / 3.0, 1.0 / 3.0, 0.5]),
        ]);
        let segments = vec![
            labels(&["\\Gamma", "M", "K", "\\Gamma", "A", "L", "H", "A"]),
            labels(&["L", "M"]),
            labels(&["K", "H"]),
        ];
        Self::new(points, segments)
    }

    /// Fractional coordinates of a labeled point.
    pub fn point(&self, label: &str) -> Option<Vector3<f64>> {
        self.points.get(label).copied()
    }

    /// All labeled vertices visited by the path, in path order without
    /// consecutive repeats.
    pub fn path_labels(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for segment in &self.segments {
            for label in segment {
                if out.last() != Some(&label.as_str()) {
                    out.push(label);
                }
            }
        }
        out
    }

    /// Interpolate the path with `n_per_leg` intervals per leg.
    ///
    /// Output pairs (fractional coordinates, label) feed straight into a
    /// band-structure constructor. Every leg emits both of its labeled
    /// endpoints, so a shared vertex appears twice at a leg join just like
    /// in band-structure files; each leg then becomes one branch.
    ///
    /// Errors if a segment names a label missing from `points`.
    pub fn interpolate(&self, n_per_leg: usize) -> Result<Vec<(Vector3<f64>, Option<String>)>> {
        let n_per_leg = n_per_leg.max(1);
        let mut kpoints = Vec::new();

        for segment in &self.segments {
            for leg in segment.windows(2) {
                let start = self.coords(&leg[0])?;
                let end = self.coords(&leg[1])?;
                kpoints.push((start, Some(leg[0].clone())));
                for j in 1..n_per_leg {
                    let t = j as f64 / n_per_leg as f64;
                    kpoints.push((start + t * (end - start), None));
                }
                kpoints.push((end, Some(leg[1].clone())));
            }
        }
        Ok(kpoints)
    }

    fn coords(&self, label: &str) -> Result<Vector3<f64>> {
        self.point(label)
            .ok_or_else(|| EsPlotError::UnknownLabel(label.to_string()))
    }
}

fn label_map(entries: &[(&str, [f64; 3])]) -> HashMap<String, Vector3<f64>> {
    entries
        .iter()
        .map(|(label, [x, y, z])| (label.to_string(), Vector3::new(*x, *y, *z)))
        .collect()
}

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
