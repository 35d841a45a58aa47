// Symmetry module: high-symmetry k-paths for band-structure and
// Brillouin-zone plots.

// ======================== MODULE DECLARATIONS ========================
pub mod kpath;


// ======================== K-PATHS ========================
pub use kpath::KPath; // struct - labeled high-symmetry points plus path segments, with standard paths per lattice type
