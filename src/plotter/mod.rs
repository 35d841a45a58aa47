// Plotter module: adapters that turn electronic-structure data into
// renderer-independent figures and scenes.

// ======================== MODULE DECLARATIONS ========================
pub mod bands;
pub mod bands_dos;
pub mod brillouin;
pub mod dos;
pub mod projections;
pub mod spline;
pub mod transport;

// Test modules
mod _tests_bands;
mod _tests_brillouin;

// ======================== DOS PLOTS ========================
pub use dos::DosPlotter; // struct - stacked/line DOS figures from named densities

// ======================== BAND PLOTS ========================
pub use bands::{
    BandsPlotData, // struct - per-branch distances/energies plus edge markers
    BandsPlotter,  // struct - band diagrams, tick merging, comparisons
};
pub use projections::ProjectedBandsPlotter; // struct - projection dots and rgb-blended bands

// ======================== COMBINED PLOTS ========================
pub use bands_dos::{
    BandProjection, // enum - band panel color source
    BandsDosPlotter, // struct - aligned bands + DOS composite
    DosProjection,  // enum - DOS panel breakdown
};

// ======================== TRANSPORT PLOTS ========================
pub use transport::TransportPlotter; // struct - thermoelectric curves vs chemical potential

// ======================== BRILLOUIN-ZONE SCENES ========================
pub use brillouin::{
    plot_brillouin_zone, // fn - Wigner-Seitz wireframe with k-path overlay
    plot_brillouin_zone_from_kpath, // fn - zone plus a standard high-symmetry path
    plot_ellipsoid,      // fn - effective-mass tensor wireframe
    plot_labels,         // fn - TeX-wrapped text anchors
    plot_lattice_vectors, // fn - primitive vectors from the origin
    plot_path,           // fn - one k-path leg as a polyline
    plot_points,         // fn - point markers with optional zone folding
    plot_wigner_seitz,   // fn - cell wireframe
};
