//! Errors raised while building or inspecting a grid.

use thiserror::Error;

/// Everything that can go wrong in this crate.
///
/// Validation happens once, when a grid is built. Advancing or rendering a
/// generation never fails.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    /// The seed has no rows, no columns, or rows of differing lengths.
    #[error("invalid grid shape: {reason}")]
    InvalidShape { reason: String },
    /// A seed value other than 0 or 1.
    #[error("invalid cell value {value} at ({row}, {col}), expected 0 or 1")]
    InvalidCell { row: usize, col: usize, value: u8 },
    /// A coordinate outside the grid.
    #[error("cell ({row}, {col}) is outside a {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    /// A random soup density outside `0.0..=1.0`.
    #[error("density {0} is not a probability")]
    InvalidDensity(f64),
}

impl Error {
    pub(crate) fn shape(reason: impl Into<String>) -> Self {
        Error::InvalidShape {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
