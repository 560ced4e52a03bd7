//! The simulation engine.

use std::{fmt, mem};

use tracing::{debug, trace};

use crate::{
    error::{Error, Result},
    grid::{Cell, Grid},
};

/// One of the eight positions adjacent to a cell.
///
/// Edges are hard: a direction that leaves the grid has no cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    BottomLeft,
    TopRight,
    BottomRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Left,
        Direction::Right,
        Direction::Top,
        Direction::Bottom,
        Direction::TopLeft,
        Direction::BottomLeft,
        Direction::TopRight,
        Direction::BottomRight,
    ];

    /// `(row, column)` offset of the neighbor.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Top => (-1, 0),
            Direction::Bottom => (1, 0),
            Direction::TopLeft => (-1, -1),
            Direction::BottomLeft => (1, -1),
            Direction::TopRight => (-1, 1),
            Direction::BottomRight => (1, 1),
        }
    }

    /// Coordinates of the neighbor, or `None` if it falls off the grid.
    fn step(self, grid: &Grid, row: usize, col: usize) -> Option<(usize, usize)> {
        let (dr, dc) = self.offset();
        let row = row.checked_add_signed(dr)?;
        let col = col.checked_add_signed(dc)?;
        (row < grid.rows() && col < grid.cols()).then_some((row, col))
    }
}

/// Counters collected across transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Number of transitions applied since the seed
    pub generation: u64,
    /// Dead cells that came alive, summed over all transitions
    pub births: u64,
    /// Living cells that died, summed over all transitions
    pub deaths: u64,
    /// Living cells in the current generation
    pub population: u64,
}

impl Stats {
    fn for_seed(grid: &Grid) -> Self {
        Stats {
            population: grid.population() as u64,
            ..Stats::default()
        }
    }

    pub fn birth_rate(&self) -> f64 {
        self.births as f64 / self.generation.max(1) as f64
    }

    pub fn death_rate(&self) -> f64 {
        self.deaths as f64 / self.generation.max(1) as f64
    }
}

/// Conway's Game of Life on a bounded grid.
///
/// Two buffers of equal size are kept: `current` is the visible generation
/// and `next` is scratch space that the following generation is written into
/// before the two are swapped. Neighbor counts therefore always read the
/// previous generation in full.
#[derive(Debug, Clone)]
pub struct Life {
    current: Grid,
    next: Grid,
    stats: Stats,
}

impl Life {
    pub fn new(seed: Grid) -> Self {
        debug!(
            rows = seed.rows(),
            cols = seed.cols(),
            population = seed.population(),
            "seeded life"
        );
        Life {
            next: seed.clone(),
            stats: Stats::for_seed(&seed),
            current: seed,
        }
    }

    /// Validates a `0`/`1` seed and starts a simulation from it.
    pub fn from_seed<R>(seed: &[R]) -> Result<Self>
    where
        R: AsRef<[u8]>,
    {
        Grid::from_seed(seed).map(Life::new)
    }

    pub fn grid(&self) -> &Grid {
        &self.current
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn rows(&self) -> usize {
        self.current.rows()
    }

    pub fn cols(&self) -> usize {
        self.current.cols()
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Cell> {
        self.current.get(row, col)
    }

    /// The cell one step away in `dir`, or `None` if that position is off
    /// the grid.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] if `(row, col)` itself is not on the grid.
    pub fn neighbor(&self, row: usize, col: usize, dir: Direction) -> Result<Option<Cell>> {
        self.current.get(row, col)?;
        Ok(dir
            .step(&self.current, row, col)
            .map(|(row, col)| self.current.cell(row, col)))
    }

    /// Counts living neighbors of `(row, col)`.
    ///
    /// Only in-bounds directions are examined, so edge cells have at most five
    /// neighbors and corner cells at most three.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] if the coordinate is not on the grid.
    pub fn neighbors(&self, row: usize, col: usize) -> Result<u8> {
        self.current.get(row, col)?;
        Ok(count_neighbors(&self.current, row, col))
    }

    /// Replaces the current generation with the next one.
    ///
    /// Every cell is recomputed from the previous generation:
    ///
    /// * fewer than two living neighbors: dies
    /// * more than three living neighbors: dies
    /// * dead with exactly three living neighbors: comes alive
    /// * otherwise the cell keeps its state
    pub fn transition(&mut self) {
        let mut births = 0;
        let mut deaths = 0;
        let mut population = 0;

        let current = &self.current;
        let cols = current.cols();
        for (index, next) in self.next.cells_mut().iter_mut().enumerate() {
            let (row, col) = (index / cols, index % cols);
            let cell = current.cell(row, col);
            let state = evolve(cell, count_neighbors(current, row, col));
            match (cell, state) {
                (Cell::Dead, Cell::Alive) => births += 1,
                (Cell::Alive, Cell::Dead) => deaths += 1,
                _ => {}
            }
            if state.is_alive() {
                population += 1;
            }
            *next = state;
        }

        mem::swap(&mut self.current, &mut self.next);

        self.stats.generation += 1;
        self.stats.births += births;
        self.stats.deaths += deaths;
        self.stats.population = population;
        trace!(
            generation = self.stats.generation,
            births,
            deaths,
            population,
            "transition"
        );
    }

    /// Text form of the current generation.
    pub fn render(&self) -> String {
        self.current.render()
    }

    /// Changes one cell of the current generation.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<()> {
        let before = self.current.get(row, col)?;
        self.current.set(row, col, cell)?;
        match (before, cell) {
            (Cell::Dead, Cell::Alive) => self.stats.population += 1,
            (Cell::Alive, Cell::Dead) => self.stats.population -= 1,
            _ => {}
        }
        Ok(())
    }

    /// Starts over from `seed`, clearing statistics.
    ///
    /// The new seed must have the same dimensions as the old one.
    pub fn reset(&mut self, seed: Grid) -> Result<()> {
        if seed.rows() != self.rows() || seed.cols() != self.cols() {
            return Err(Error::shape(format!(
                "seed is {}x{}, simulation is {}x{}",
                seed.rows(),
                seed.cols(),
                self.rows(),
                self.cols()
            )));
        }
        self.stats = Stats::for_seed(&seed);
        self.current = seed;
        Ok(())
    }
}

impl fmt::Display for Life {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.current, f)
    }
}

fn count_neighbors(grid: &Grid, row: usize, col: usize) -> u8 {
    Direction::ALL
        .iter()
        .filter_map(|dir| dir.step(grid, row, col))
        .filter(|&(r, c)| grid.cell(r, c).is_alive())
        .count() as u8
}

fn evolve(cell: Cell, alive_neighbors: u8) -> Cell {
    if alive_neighbors < 2 {
        Cell::Dead
    } else if alive_neighbors > 3 {
        Cell::Dead
    } else if cell == Cell::Dead && alive_neighbors == 3 {
        Cell::Alive
    } else {
        cell
    }
}
