//! Error taxonomy shared by the grid constructors and both solvers.
//!
//! Every condition is reported to the immediate caller. Grids are fixed input,
//! so there is nothing transient to retry.

use thiserror::Error;

/// Errors produced while building a grid or solving it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipesError {
    /// The grid has zero rows or zero columns.
    #[error("grid must be non-empty, got {rows}x{columns}")]
    InvalidGrid { rows: usize, columns: usize },

    /// The exhaustive search cannot encode `steps` moves in a 64-bit mask.
    #[error("exhaustive search needs rows+columns-2 < 64, got {steps} steps")]
    UnsupportedSize { steps: usize },

    /// Every monotone path from start to goal leaves the grid or hits rock.
    #[error("no monotone path reaches the goal without crossing rock")]
    NoPathExists,

    /// A row passed to [`Grid::from_rows`](crate::Grid::from_rows) has the wrong width.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A flat cell buffer does not match `rows * columns`.
    #[error("expected {expected} cells, got {found}")]
    BadCellCount { expected: usize, found: usize },

    /// A character in the text form of a grid does not name a cell kind.
    #[error("unknown cell '{ch}' at row {row}, column {col}")]
    UnknownCell { ch: char, row: usize, col: usize },

    /// The random generator was asked to place more cells than fit.
    #[error("cannot place {requested} cells, only {available} are free")]
    TooManyCells { requested: usize, available: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PipesError>;
