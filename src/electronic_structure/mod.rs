// Electronic structure module: data structures the plotters consume
// All genuine electronic-structure computation (energies, projections, transport
// integrals) happens upstream; these types only carry and reshape its results.

// ======================== MODULE DECLARATIONS ========================
pub mod bandstructure;
pub mod core;
pub mod dos;
pub mod transport;

// Test modules
mod _tests_bandstructure;

// ======================== SPIN & ORBITAL CHANNELS ========================
pub use core::{
    Spin,        // enum - spin channel (Up, Down) with sign convention +1/-1
    OrbitalType, // enum - orbital angular momentum character (S, P, D, F)
};

// ======================== DENSITY OF STATES ========================
pub use dos::{
    Dos,         // struct - total DOS: efermi, energy grid, per-spin densities
    CompleteDos, // struct - total DOS plus per-element, per-orbital projections
};

// ======================== BAND STRUCTURE (SYMMETRY-LINE MODE) ========================
pub use bandstructure::{
    BandEdge,      // struct - VBM/CBM: energy plus the k-point indices attaining it
    BandGap,       // struct - gap energy, transition label, direct/indirect flag
    BandStructure, // struct - k-points, branches, arc-length distances, bands, projections
    Branch,        // struct - contiguous k-path segment between labeled points
    Kpoint,        // struct - fractional + cartesian coordinates and optional label
    Projections,   // type - per-spin element/orbital projection weights
};

// ======================== BOLTZMANN TRANSPORT RESULTS ========================
pub use transport::{
    DopingSide,    // enum - carrier type for doping levels (N, P)
    TransportData, // struct - chemical-potential grids and per-temperature transport curves
};
