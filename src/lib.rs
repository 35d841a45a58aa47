//! Electronic-structure plotting library
//!
//! This library turns computed materials-science data (densities of states,
//! band structures along high-symmetry k-paths, Boltzmann transport results)
//! into backend-agnostic plot primitives, and renders those primitives to
//! SVG/PNG files through `plotters`.

pub mod config;
pub mod electronic_structure;
pub mod error;
pub mod export;
pub mod figure;
pub mod lattice;
pub mod plotter;
pub mod symmetry;

pub use error::EsPlotError;

/// Common result type used throughout the library
pub type Result<T> = std::result::Result<T, EsPlotError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
