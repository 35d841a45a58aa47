// Wigner-Seitz cell and Brillouin zone construction by half-space clipping
//
// The cell is built as the region closer to the origin than to any other
// lattice point: a bounding cube is clipped against the perpendicular
// bisector plane of every relevant neighbor.

// ======================== IMPORTS ========================
use nalgebra::{Matrix3, Vector3};

use crate::config::VERTEX_MERGE_TOLERANCE;
use crate::lattice::polyhedron::{extract_edges_from_faces, Polyhedron};

// ======================== CONSTANTS ========================
const PLANE_TOLERANCE: f64 = 1.0e-9; // A vertex this close to a cut plane lies on it
const NEIGHBOR_CUTOFF_FACTOR: f64 = 2.5; // Keep neighbors up to this multiple of the nearest distance

// ======================== WIGNER-SEITZ CELL ========================

/// Compute the Wigner-Seitz cell of a lattice centered at the origin.
///
/// Parameters:
/// - `basis`: Columns are the primitive vectors a₁, a₂, a₃
/// - `tolerance`: Numerical tolerance for vertex comparisons
pub fn compute_wigner_seitz_cell(basis: &Matrix3<f64>, tolerance: f64) -> Polyhedron {
    // Include up to second-nearest neighbor shells; bisectors further out
    // than 2.5x the nearest distance can never touch the cell.
    let all_neighbors = generate_lattice_points_by_shell(basis, 2);

    let nearest_distance = all_neighbors
        .iter()
        .map(|v| v.norm())
        .min_by(|a, b| a.partial_cmp(b).unwrap())
        .unwrap_or(1.0);

    let cutoff_distance = nearest_distance * NEIGHBOR_CUTOFF_FACTOR;
    let mut relevant_neighbors: Vec<_> = all_neighbors
        .into_iter()
        .filter(|v| v.norm() <= cutoff_distance)
        .collect();
    // Clip against close planes first; later planes then trim less geometry.
    relevant_neighbors.sort_by(|a, b| a.norm().partial_cmp(&b.norm()).unwrap());

    // Start with a bounding cube that certainly contains the cell
    let bound = 2.0 * nearest_distance;
    let mut faces = cube_faces(bound);

    for neighbor in &relevant_neighbors {
        let normal = neighbor.normalize();
        let distance = 0.5 * neighbor.norm();
        faces = clip_faces_by_halfspace(&faces, &normal, distance);
        if faces.is_empty() {
            break; // Degenerate case
        }
    }

    index_faces(&faces, tolerance.max(VERTEX_MERGE_TOLERANCE))
}

/// Compute the first Brillouin zone (Wigner-Seitz cell of the reciprocal lattice).
pub fn compute_brillouin_zone(reciprocal_basis: &Matrix3<f64>, tolerance: f64) -> Polyhedron {
    compute_wigner_seitz_cell(reciprocal_basis, tolerance)
}

// ======================== LATTICE POINT GENERATION ========================

/// Generate lattice points within the given shell index.
///
/// Returns all integer linear combinations n·a₁ + m·a₂ + l·a₃ where
/// |n|, |m|, |l| ≤ max_shell (excluding the origin).
pub fn generate_lattice_points_by_shell(
    basis: &Matrix3<f64>,
    max_shell: usize,
) -> Vec<Vector3<f64>> {
    let vector_a1 = basis.column(0);
    let vector_a2 = basis.column(1);
    let vector_a3 = basis.column(2);
    let shell_limit = max_shell as i32;

    let mut lattice_points = Vec::new();
    for n in -shell_limit..=shell_limit {
        for m in -shell_limit..=shell_limit {
            for l in -shell_limit..=shell_limit {
                if n == 0 && m == 0 && l == 0 {
                    continue; // Skip origin
                }
                let point =
                    (n as f64) * vector_a1 + (m as f64) * vector_a2 + (l as f64) * vector_a3;
                lattice_points.push(point.into());
            }
        }
    }
    lattice_points
}

// ======================== HALF-SPACE CLIPPING ========================

// A face is a closed polygon of cartesian vertices.
type FacePolygon = Vec<Vector3<f64>>;

fn cube_faces(half_size: f64) -> Vec<FacePolygon> {
    let s = half_size;
    let v = |x: f64, y: f64, z: f64| Vector3::new(x, y, z);
    vec![
        vec![v(-s, -s, -s), v(s, -s, -s), v(s, s, -s), v(-s, s, -s)], // z = -s
        vec![v(-s, -s, s), v(s, -s, s), v(s, s, s), v(-s, s, s)],     // z = +s
        vec![v(-s, -s, -s), v(s, -s, -s), v(s, -s, s), v(-s, -s, s)], // y = -s
        vec![v(-s, s, -s), v(s, s, -s), v(s, s, s), v(-s, s, s)],     // y = +s
        vec![v(-s, -s, -s), v(-s, s, -s), v(-s, s, s), v(-s, -s, s)], // x = -s
        vec![v(s, -s, -s), v(s, s, -s), v(s, s, s), v(s, -s, s)],     // x = +s
    ]
}

/// Clip every face against the half-space n·x ≤ d and close the cut with a
/// new cap face built from the intersection points.
fn clip_faces_by_halfspace(
    faces: &[FacePolygon],
    normal: &Vector3<f64>,
    distance: f64,
) -> Vec<FacePolygon> {
    let mut clipped_faces = Vec::with_capacity(faces.len() + 1);
    let mut cap_points: Vec<Vector3<f64>> = Vec::new();

    for face in faces {
        let clipped = clip_polygon_by_halfspace(face, normal, distance);
        if clipped.len() >= 3 {
            // Vertices sitting on the cut plane bound the new cap face
            for vertex in &clipped {
                if (normal.dot(vertex) - distance).abs() < PLANE_TOLERANCE {
                    push_unique_point(&mut cap_points, *vertex);
                }
            }
            clipped_faces.push(clipped);
        }
    }

    if cap_points.len() >= 3 {
        clipped_faces.push(order_coplanar_polygon(cap_points, normal));
    }

    clipped_faces
}

// Sutherland-Hodgman polygon clipping against a half-space, in 3D
fn clip_polygon_by_halfspace(
    polygon: &[Vector3<f64>],
    normal: &Vector3<f64>,
    distance: f64,
) -> FacePolygon {
    if polygon.is_empty() {
        return Vec::new();
    }

    let mut clipped_polygon = Vec::with_capacity(polygon.len());
    let mut previous_vertex = *polygon.last().unwrap();
    let mut previous_inside = normal.dot(&previous_vertex) - distance <= PLANE_TOLERANCE;

    for &current_vertex in polygon {
        let current_inside = normal.dot(&current_vertex) - distance <= PLANE_TOLERANCE;

        // Edge crosses the boundary
        if current_inside != previous_inside {
            let denom = normal.dot(&(current_vertex - previous_vertex));
            if denom.abs() > f64::EPSILON {
                let t = (distance - normal.dot(&previous_vertex)) / denom;
                let intersection = previous_vertex + (current_vertex - previous_vertex) * t;
                clipped_polygon.push(intersection);
            }
        }

        if current_inside {
            clipped_polygon.push(current_vertex);
        }

        previous_vertex = current_vertex;
        previous_inside = current_inside;
    }

    clipped_polygon
}

fn push_unique_point(points: &mut Vec<Vector3<f64>>, candidate: Vector3<f64>) {
    let is_duplicate = points
        .iter()
        .any(|existing| (existing - candidate).norm() < VERTEX_MERGE_TOLERANCE);
    if !is_duplicate {
        points.push(candidate);
    }
}

/// Order points lying in a common plane into a simple polygon, by angle
/// around their centroid within the plane spanned by two axes ⟂ `normal`.
fn order_coplanar_polygon(points: Vec<Vector3<f64>>, normal: &Vector3<f64>) -> FacePolygon {
    let centroid = points.iter().fold(Vector3::zeros(), |acc, p| acc + p) / points.len() as f64;

    // Any vector not parallel to the normal seeds the in-plane basis
    let seed = if normal.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let u = (seed - normal * seed.dot(normal)).normalize();
    let v = normal.cross(&u);

    let mut ordered = points;
    ordered.sort_by(|a, b| {
        let pa = a - centroid;
        let pb = b - centroid;
        let angle_a = pa.dot(&v).atan2(pa.dot(&u));
        let angle_b = pb.dot(&v).atan2(pb.dot(&u));
        angle_a.partial_cmp(&angle_b).unwrap()
    });
    ordered
}

// ======================== INDEXING & VOLUME ========================

/// Convert face polygons to the indexed Polyhedron representation, merging
/// vertices within tolerance and dropping degenerate faces.
fn index_faces(faces: &[FacePolygon], tolerance: f64) -> Polyhedron {
    let mut polyhedron = Polyhedron::new();

    for face in faces {
        let mut index_face = Vec::with_capacity(face.len());
        for vertex in face {
            let index = match polyhedron
                .vertices
                .iter()
                .position(|existing| (existing - vertex).norm() < tolerance)
            {
                Some(i) => i,
                None => {
                    polyhedron.vertices.push(*vertex);
                    polyhedron.vertices.len() - 1
                }
            };
            // Merged vertices can collapse consecutive polygon corners
            if index_face.last() != Some(&index) {
                index_face.push(index);
            }
        }
        if index_face.first() == index_face.last() && index_face.len() > 1 {
            index_face.pop();
        }
        if index_face.len() >= 3 {
            polyhedron.faces.push(index_face);
        }
    }

    polyhedron.edges = extract_edges_from_faces(&polyhedron.faces);
    polyhedron.measure = enclosed_volume(&polyhedron);
    polyhedron
}

/// Volume of a convex polyhedron containing the origin: a pyramid per face,
/// V = Σ area · plane_distance / 3. Independent of face winding.
fn enclosed_volume(polyhedron: &Polyhedron) -> f64 {
    let mut volume = 0.0;
    for face in &polyhedron.faces {
        if face.len() < 3 {
            continue;
        }
        // Newell's method gives the face normal scaled by twice the area
        let mut newell = Vector3::zeros();
        for i in 0..face.len() {
            let a = polyhedron.vertices[face[i]];
            let b = polyhedron.vertices[face[(i + 1) % face.len()]];
            newell += a.cross(&b);
        }
        let area = 0.5 * newell.norm();
        if area < f64::EPSILON {
            continue;
        }
        let unit_normal = newell.normalize();
        let plane_distance = unit_normal.dot(&polyhedron.vertices[face[0]]).abs();
        volume += area * plane_distance / 3.0;
    }
    volume
}
