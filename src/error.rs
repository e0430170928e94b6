//! Errors rejected at the API boundary

use thiserror::Error;

/// Reasons a maze or its configuration cannot be built
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MazeError {
    /// A grid needs at least one row and one column
    #[error("invalid maze dimensions {rows}x{cols}: rows and columns must be at least 1")]
    InvalidDimension { rows: usize, cols: usize },
    /// The walk must begin inside the grid
    #[error("start cell ({row}, {col}) lies outside the grid")]
    StartOutOfBounds { row: usize, col: usize },
    /// Cells must have a positive, finite size
    #[error("invalid cell size {width}x{height}")]
    InvalidCellSize { width: f32, height: f32 },
}

/// Convenience alias for maze results
pub type MazeResult<T> = Result<T, MazeError>;
