use thiserror::Error;

/// Errors produced while validating plot inputs.
///
/// All plotting entry points are pure functions of their inputs; the only
/// failure mode is data that cannot be plotted (shape mismatches, missing
/// collaborator data), never backend or I/O state.
#[derive(Debug, Error)]
pub enum EsPlotError {
    #[error("data length mismatch: {context} ({left} vs {right})")]
    LengthMismatch {
        context: &'static str,
        left: usize,
        right: usize,
    },

    #[error("empty data: {0}")]
    EmptyData(&'static str),

    #[error("band structure carries no projections")]
    MissingProjections,

    #[error("fractional coordinates require a lattice")]
    MissingLattice,

    #[error("RGB-blended projections support at most 3 elements, got {0}")]
    TooManyElements(usize),

    #[error("band structure is not defined along symmetry lines")]
    NotSymmLine,

    #[error("k-path segment references unknown label {0:?}")]
    UnknownLabel(String),

    #[error("no transport data at temperature {0} K")]
    MissingTemperature(u32),

    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
