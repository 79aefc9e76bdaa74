use thiserror::Error;

/// Why a single region was left out of a batch.
///
/// None of these abort the run; the batch driver records them next to the
/// region identifier and moves on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegionError {
    #[error("unsupported geometry type: {kind}")]
    UnsupportedGeometry { kind: &'static str },

    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("no metro markers defined")]
    MissingMarkerData,

    #[error("canvas {width}x{height} leaves no drawable area with padding {padding}")]
    CanvasTooSmall {
        width: f64,
        height: f64,
        padding: f64,
    },
}
