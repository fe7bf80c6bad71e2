// Error types for the spatial core

use thiserror::Error;

/// Failures raised by region map construction and grid accessors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegionError {
    #[error("tile ({x}, {y}) on plane {plane} is outside the 104x104 region")]
    OutOfRange { plane: i32, x: i32, y: i32 },

    #[error("plane {0} is outside 0..3")]
    PlaneOutOfRange(i32),

    #[error("clipping masks are {columns}x{rows}, at most 104x104 expected")]
    MaskDimensions { columns: usize, rows: usize },
}

/// Failure to read a tile from its "x,y[,z]" text form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileParseError {
    #[error("missing tile {0}")]
    Missing(&'static str),

    #[error("invalid tile {axis}: '{value}'")]
    Invalid { axis: &'static str, value: String },

    #[error("too many tile components in '{0}'")]
    TooMany(String),
}
