// Lattice module: reciprocal-space geometry backing the Brillouin-zone plots
// Provides the lattice basis, Wigner-Seitz cell construction, and point folding.

// ======================== MODULE DECLARATIONS ========================
pub mod cell;
pub mod polyhedron;
pub mod wigner_seitz;

mod _tests_wigner_seitz;

// ======================== LATTICE BASIS ========================
pub use cell::Lattice; // struct - 3D lattice basis (columns), frac<->cart conversion, reciprocal lattice, point folding

// ======================== GEOMETRIC POLYHEDRONS ========================
pub use polyhedron::Polyhedron; // struct - convex polyhedron for Wigner-Seitz cells and Brillouin zones

// ======================== WIGNER-SEITZ CONSTRUCTION ========================
pub use wigner_seitz::{
    compute_brillouin_zone,    // fn(reciprocal_basis: &Matrix3<f64>, tolerance: f64) -> Polyhedron - first Brillouin zone
    compute_wigner_seitz_cell, // fn(basis: &Matrix3<f64>, tolerance: f64) -> Polyhedron - Wigner-Seitz cell by half-space clipping
    generate_lattice_points_by_shell, // fn(basis: &Matrix3<f64>, max_shell: usize) -> Vec<Vector3<f64>> - neighbor lattice points
};
