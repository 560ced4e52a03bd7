//! The cell grid: a fixed-size, row-major buffer of cell states.

use std::fmt;

use crate::error::{Error, Result};

/// State of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    Alive,

    #[default]
    Dead,
}

impl Cell {
    /// Token printed for a living cell, followed by a space.
    pub const MARKER: char = '+';

    /// Converts a seed value, `0` for dead and `1` for alive.
    pub fn from_seed(value: u8) -> Option<Self> {
        match value {
            0 => Some(Cell::Dead),
            1 => Some(Cell::Alive),
            _ => None,
        }
    }

    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }
}

/// A rectangular generation of cells.
///
/// Dimensions are fixed at construction. Cells live in one flat buffer
/// indexed by `row * cols + col`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds a grid from rows of `0`/`1` values.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidShape`] if there are no rows, no columns, or the rows
    ///   differ in length.
    /// * [`Error::InvalidCell`] if a value is neither `0` nor `1`.
    pub fn from_seed<R>(seed: &[R]) -> Result<Self>
    where
        R: AsRef<[u8]>,
    {
        let rows = seed.len();
        let cols = seed.first().map_or(0, |row| row.as_ref().len());
        if rows == 0 || cols == 0 {
            return Err(Error::shape(format!("seed is {rows}x{cols}")));
        }

        let mut cells = Vec::with_capacity(rows * cols);
        for (row, values) in seed.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != cols {
                return Err(Error::shape(format!(
                    "row {row} has {} cells, row 0 has {cols}",
                    values.len()
                )));
            }
            for (col, &value) in values.iter().enumerate() {
                let cell = Cell::from_seed(value).ok_or(Error::InvalidCell { row, col, value })?;
                cells.push(cell);
            }
        }

        Ok(Self { rows, cols, cells })
    }

    /// Builds an all-dead grid.
    pub fn dead(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::shape(format!("grid is {rows}x{cols}")));
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::Dead; rows * cols],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Cell> {
        let index = self.index(row, col)?;
        Ok(self.cells[index])
    }

    /// Overwrites one cell. Only meant for editing a seed between generations.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<()> {
        let index = self.index(row, col)?;
        self.cells[index] = cell;
        Ok(())
    }

    /// Number of living cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols)
    }

    /// Writes the grid one line per row, two characters per cell.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols * 2 + 1));
        for row in self.iter_rows() {
            for &cell in row {
                if cell.is_alive() {
                    out.push(Cell::MARKER);
                    out.push(' ');
                } else {
                    out.push_str("  ");
                }
            }
            out.push('\n');
        }
        out
    }

    /// Unchecked read for loops bounded by the grid's own dimensions.
    pub(crate) fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_values_map_to_cells() {
        let grid = Grid::from_seed(&[[0u8, 1], [1, 0]]).unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 2);
        assert_eq!(grid.get(0, 0), Ok(Cell::Dead));
        assert_eq!(grid.get(0, 1), Ok(Cell::Alive));
        assert_eq!(grid.get(1, 0), Ok(Cell::Alive));
        assert_eq!(grid.population(), 2);
    }

    #[test]
    fn ragged_seed_is_rejected() {
        let seed = vec![vec![0u8, 0, 0], vec![0, 0]];
        assert!(matches!(
            Grid::from_seed(&seed),
            Err(Error::InvalidShape { .. })
        ));
    }

    #[test]
    fn empty_seeds_are_rejected() {
        let no_rows: Vec<Vec<u8>> = Vec::new();
        assert!(matches!(
            Grid::from_seed(&no_rows),
            Err(Error::InvalidShape { .. })
        ));

        let no_cols: Vec<Vec<u8>> = vec![Vec::new(), Vec::new()];
        assert!(matches!(
            Grid::from_seed(&no_cols),
            Err(Error::InvalidShape { .. })
        ));

        assert!(Grid::dead(0, 4).is_err());
        assert!(Grid::dead(4, 0).is_err());
    }

    #[test]
    fn non_binary_value_is_rejected() {
        assert_eq!(
            Grid::from_seed(&[[0u8, 0], [0, 2]]),
            Err(Error::InvalidCell {
                row: 1,
                col: 1,
                value: 2
            })
        );
    }

    #[test]
    fn out_of_bounds_access() {
        let mut grid = Grid::dead(2, 3).unwrap();
        assert_eq!(
            grid.get(2, 0),
            Err(Error::OutOfBounds {
                row: 2,
                col: 0,
                rows: 2,
                cols: 3
            })
        );
        assert!(grid.get(0, 3).is_err());
        assert!(grid.set(5, 5, Cell::Alive).is_err());
        assert!(grid.set(1, 2, Cell::Alive).is_ok());
        assert_eq!(grid.get(1, 2), Ok(Cell::Alive));
    }

    #[test]
    fn render_uses_two_characters_per_cell() {
        let grid = Grid::from_seed(&[[1u8, 0, 1], [0, 1, 0]]).unwrap();
        assert_eq!(grid.render(), "+   + \n  +   \n");
        assert_eq!(grid.to_string(), grid.render());
    }
}
