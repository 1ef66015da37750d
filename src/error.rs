//! Error types for grid construction, editing and searching.
//!
//! Not finding a path is not an error, these only cover calls whose preconditions do not hold.
use crate::coordinate::Coordinate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("{0} lies outside of the grid")]
    OutOfBounds(Coordinate),

    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("unexpected symbol '{symbol}' at line {line}, column {column}")]
    Parse {
        line: usize,
        column: usize,
        symbol: char,
    },

    #[error("row {line} has {found} cells, expected {expected}")]
    RaggedRows {
        line: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("{0} lies outside of the grid")]
    OutOfBounds(Coordinate),

    #[error("pathfinder sized for {expected:?} cannot search a grid of {found:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Path(#[from] PathError),
}
