// Constants

// Tolerances
pub const LATTICE_TOLERANCE: f64 = 1e-10; // For most lattice/geometry operations
pub const VERTEX_MERGE_TOLERANCE: f64 = 1e-7; // For deduplicating polyhedron vertices

// Plot defaults
pub const BAND_LINEWIDTH: f64 = 1.0; // Band structure traces
pub const DOS_LINEWIDTH: f64 = 3.0; // Density-of-states traces
pub const TRANSPORT_LINEWIDTH: f64 = 3.0; // Transport curves
pub const FERMI_LINEWIDTH: f64 = 2.0; // Fermi-level guide lines
pub const SYMMETRY_LINEWIDTH: f64 = 2.0; // Vertical lines at high-symmetry ticks
pub const PROJECTION_MARKER_SCALE: f64 = 15.0; // Marker size per unit projection weight

// Energy windows around the band edges (eV)
pub const INSULATOR_ENERGY_WINDOW: (f64, f64) = (-4.0, 4.0);
pub const METAL_ENERGY_WINDOW: (f64, f64) = (-10.0, 10.0);

// Smooth band interpolation resolution (points per branch)
pub const SPLINE_RESOLUTION: usize = 1000;
