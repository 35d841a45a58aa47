// Figure module: renderer-independent plot descriptions produced by the
// plotters and consumed by the export backends.

// ======================== MODULE DECLARATIONS ========================
pub mod axes;
pub mod color;
#[allow(clippy::module_inception)]
pub mod figure;
pub mod scene;
pub mod series;

// Test modules
mod _tests_figure;

// ======================== AXES ========================
pub use axes::{
    AxisScale, // enum - linear or logarithmic axis
    TickSet,   // struct - explicit tick positions and labels
};

// ======================== COLORS ========================
pub use color::{
    palette_color, // fn(index: usize) -> Color - cycling palette lookup
    Color,         // struct - RGB color in [0, 1]
    SET1,          // const - nine-color qualitative palette
};

// ======================== 2D FIGURES ========================
pub use figure::{
    Composite,   // struct - side-by-side panels with width ratios
    Figure,      // struct - drawable elements plus axis settings
    LegendEntry, // struct - one legend row
    SeriesKind,  // enum - legend marker shape
};
pub use series::{
    AreaSeries,     // struct - filled region between a curve and the x-axis
    LineSeries,     // struct - polyline trace
    LineStyle,      // enum - solid, dashed, dotted
    PlotElement,    // enum - any drawable 2D element
    ScatterSeries,  // struct - marker cloud with per-point sizes
    SegmentSeries,  // struct - individually colored line segments
    TextAnnotation, // struct - text in data coordinates
};

// ======================== 3D SCENES ========================
pub use scene::{
    Label3,    // struct - text anchored at a 3D position
    Point3,    // struct - 3D marker
    Polyline3, // struct - 3D polyline
    Scene3,    // struct - 3D scene for Brillouin-zone geometry
};
