use thiserror::Error;

/// Contract violations raised by the geometry pipeline.
///
/// Bad real-world data (short tracks, broken footprints, odd tags) never ends up
/// here; it is skipped instead. These variants mean the caller handed in values
/// that cannot describe a scene at all.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error(
        "degenerate bounds: north {north} / south {south}, east {east} / west {west} \
         (need north > south and east > west)"
    )]
    DegenerateBounds {
        north: f64,
        south: f64,
        east: f64,
        west: f64,
    },

    #[error("model dimensions must be positive and finite, got {width} x {depth}")]
    InvalidDimensions { width: f64, depth: f64 },

    #[error("invalid height range [{min}, {max}]")]
    InvalidHeightRange { min: f64, max: f64 },

    #[error("invalid scene style: {0}")]
    InvalidStyle(String),

    #[error("invalid mesh buffers: {0}")]
    InvalidMesh(String),

    #[error("merged mesh has {0} vertices, more than a u32 index can address")]
    IndexOverflow(usize),
}
