use thiserror::Error;

use crate::grid::Coord;

pub type Result<T> = std::result::Result<T, MazeError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// A grid needs at least one row and one column.
    #[error("invalid grid dimensions {rows}x{cols}: both must be at least 1")]
    InvalidDimensions { rows: usize, cols: usize },

    /// Passages only join cells that share a wall.
    #[error("cells {from} and {to} are not adjacent")]
    NotAdjacent { from: Coord, to: Coord },

    #[error("cell {coord} is outside the grid")]
    CellNotInGrid { coord: Coord },

    #[error("image has no pixels")]
    EmptyImage,

    #[error("malformed image: {reason}")]
    MalformedImage { reason: String },

    #[error("cell size must be at least 1 pixel, got {0}")]
    InvalidCellSize(usize),

    #[error(
        "unknown maze algorithm '{0}' (expected binary-tree, sidewinder, aldous-broder, wilsons or dfs)"
    )]
    UnknownAlgorithm(String),
}
