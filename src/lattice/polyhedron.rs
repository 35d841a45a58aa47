use std::collections::HashSet;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// ε that controls the numerical tolerance (works for unit-cell sized data;
/// scale if the polyhedron spans many orders of magnitude).
const EPS: f64 = 1.0e-10;

/// A convex polyhedron representing a Wigner-Seitz cell or Brillouin zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polyhedron {
    /// Vertices (in direct or reciprocal cartesian coordinates)
    pub vertices: Vec<Vector3<f64>>,
    /// Edges as pairs of vertex indices, each shared by exactly two faces
    pub edges: Vec<(usize, usize)>,
    /// Faces as lists of vertex indices
    pub faces: Vec<Vec<usize>>,
    /// Enclosed volume
    pub measure: f64,
}

impl Polyhedron {
    /// Create a new empty polyhedron
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            faces: Vec::new(),
            measure: 0.0,
        }
    }

    /// Return `true` if `point` lies inside — or on the boundary of — the
    /// convex polyhedron. Works for any face ordering/orientation.
    pub fn contains(&self, point: Vector3<f64>) -> bool {
        if self.faces.is_empty() {
            return false;
        }

        // Cheap approximate interior point: the arithmetic mean of all vertices.
        let centroid =
            self.vertices.iter().fold(Vector3::zeros(), |acc, v| acc + v) / self.vertices.len() as f64;

        for face in &self.faces {
            if face.len() < 3 {
                continue; // degenerate face - skip
            }

            let v0 = self.vertices[face[0]];
            let v1 = self.vertices[face[1]];
            let v2 = self.vertices[face[2]];

            let mut normal = (v1 - v0).cross(&(v2 - v0)); // un-normalised

            // Ensure the normal points outward.
            if normal.dot(&(centroid - v0)) > 0.0 {
                normal = -normal;
            }

            if normal.dot(&(point - v0)) > EPS {
                return false;
            }
        }
        true
    }

    /// The wireframe as vertex-coordinate pairs, one per unique edge.
    pub fn wireframe(&self) -> Vec<(Vector3<f64>, Vector3<f64>)> {
        self.edges
            .iter()
            .map(|&(i, j)| (self.vertices[i], self.vertices[j]))
            .collect()
    }

    pub fn measure(&self) -> f64 {
        self.measure
    }

    pub fn vertices(&self) -> &Vec<Vector3<f64>> {
        &self.vertices
    }

    pub fn edges(&self) -> &Vec<(usize, usize)> {
        &self.edges
    }

    pub fn faces(&self) -> &Vec<Vec<usize>> {
        &self.faces
    }
}

impl Default for Polyhedron {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract unique edges from face definitions.
pub(crate) fn extract_edges_from_faces(faces: &[Vec<usize>]) -> Vec<(usize, usize)> {
    let mut unique_edges: HashSet<(usize, usize)> = HashSet::new();

    for face in faces {
        for window in face.windows(2) {
            add_normalized_edge(&mut unique_edges, window[0], window[1]);
        }
        // Close the face by connecting last to first
        if let (Some(&first), Some(&last)) = (face.first(), face.last()) {
            add_normalized_edge(&mut unique_edges, last, first);
        }
    }

    let mut edges: Vec<_> = unique_edges.into_iter().collect();
    edges.sort_unstable();
    edges
}

// Add edge with normalized ordering (smaller index first)
fn add_normalized_edge(edges: &mut HashSet<(usize, usize)>, i: usize, j: usize) {
    if i < j {
        edges.insert((i, j));
    } else {
        edges.insert((j, i));
    }
}
