//! Seed patterns.

use clap::ValueEnum;
use rand::Rng;

use crate::{
    error::{Error, Result},
    grid::{Cell, Grid},
};

/// The built-in seeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Pattern {
    /// Period 2 oscillator on a 5x5 grid
    Blinker,
    /// Period 2 oscillator on a 6x6 grid
    Toad,
    /// Period 3 oscillator on a 17x17 grid
    Pulsar,
    /// Period 15 oscillator on a 19x20 grid
    Pentadecathlon,
    /// Spaceship starting top-left on a 50x50 grid
    Glider,
}

const BLINKER: [[u8; 5]; 5] = [
    [0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0],
    [0, 1, 1, 1, 0],
    [0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0],
];

const TOAD: [[u8; 6]; 6] = [
    [0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0],
    [0, 0, 1, 1, 1, 0],
    [0, 1, 1, 1, 0, 0],
    [0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0],
];

const PULSAR: [[u8; 17]; 17] = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1, 0, 0],
    [0, 0, 1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1, 0, 0],
    [0, 0, 1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1, 0, 0],
    [0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0],
    [0, 0, 1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1, 0, 0],
    [0, 0, 1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1, 0, 0],
    [0, 0, 1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
];

const PENTADECATHLON_ROWS: usize = 19;
const PENTADECATHLON_COLS: usize = 20;
const PENTADECATHLON_CELLS: [(usize, usize); 12] = [
    (8, 7),
    (8, 12),
    (9, 5),
    (9, 6),
    (9, 8),
    (9, 9),
    (9, 10),
    (9, 11),
    (9, 13),
    (9, 14),
    (10, 7),
    (10, 12),
];

const GLIDER_SIZE: usize = 50;
const GLIDER_CELLS: [(usize, usize); 5] = [(3, 1), (4, 2), (2, 3), (3, 3), (4, 3)];

impl Pattern {
    pub const ALL: [Pattern; 5] = [
        Pattern::Blinker,
        Pattern::Toad,
        Pattern::Pulsar,
        Pattern::Pentadecathlon,
        Pattern::Glider,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Pattern::Blinker => "blinker",
            Pattern::Toad => "toad",
            Pattern::Pulsar => "pulsar",
            Pattern::Pentadecathlon => "pentadecathlon",
            Pattern::Glider => "glider",
        }
    }

    /// Number of transitions after which an oscillator repeats.
    ///
    /// `None` for the glider, which moves instead of repeating in place.
    pub fn period(self) -> Option<u64> {
        match self {
            Pattern::Blinker | Pattern::Toad => Some(2),
            Pattern::Pulsar => Some(3),
            Pattern::Pentadecathlon => Some(15),
            Pattern::Glider => None,
        }
    }

    pub fn seed(self) -> Grid {
        match self {
            Pattern::Blinker => literal(&BLINKER),
            Pattern::Toad => literal(&TOAD),
            Pattern::Pulsar => literal(&PULSAR),
            Pattern::Pentadecathlon => sparse(
                PENTADECATHLON_ROWS,
                PENTADECATHLON_COLS,
                &PENTADECATHLON_CELLS,
            ),
            Pattern::Glider => sparse(GLIDER_SIZE, GLIDER_SIZE, &GLIDER_CELLS),
        }
    }
}

// The tables above are rectangular 0/1 literals and the sparse coordinates lie
// inside their grids, so building them cannot fail.
fn literal<R: AsRef<[u8]>>(rows: &[R]) -> Grid {
    Grid::from_seed(rows).expect("built-in seed is well formed")
}

fn sparse(rows: usize, cols: usize, alive: &[(usize, usize)]) -> Grid {
    let mut grid = Grid::dead(rows, cols).expect("built-in seed has a size");
    for &(row, col) in alive {
        grid.set(row, col, Cell::Alive)
            .expect("built-in seed cell is on the grid");
    }
    grid
}

/// Fills a grid at random, each cell alive with probability `density`.
pub fn random_soup<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    density: f64,
    rng: &mut R,
) -> Result<Grid> {
    if !(0.0..=1.0).contains(&density) {
        return Err(Error::InvalidDensity(density));
    }
    let seed: Vec<Vec<u8>> = (0..rows)
        .map(|_| (0..cols).map(|_| u8::from(rng.gen_bool(density))).collect())
        .collect();
    Grid::from_seed(&seed)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn seed_sizes() {
        let sizes: Vec<_> = Pattern::ALL
            .iter()
            .map(|pattern| {
                let grid = pattern.seed();
                (grid.rows(), grid.cols())
            })
            .collect();
        assert_eq!(sizes, vec![(5, 5), (6, 6), (17, 17), (19, 20), (50, 50)]);
    }

    #[test]
    fn seed_populations() {
        let populations: Vec<_> = Pattern::ALL
            .iter()
            .map(|pattern| pattern.seed().population())
            .collect();
        assert_eq!(populations, vec![3, 6, 48, 12, 5]);
    }

    #[test]
    fn names_match_cli_values() {
        for pattern in Pattern::ALL {
            assert_eq!(Pattern::from_str(pattern.name(), false), Ok(pattern));
        }
    }

    #[test]
    fn soup_density_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let empty = random_soup(4, 6, 0.0, &mut rng).unwrap();
        assert_eq!(empty.population(), 0);
        let full = random_soup(4, 6, 1.0, &mut rng).unwrap();
        assert_eq!(full.population(), 24);
        assert_eq!(
            random_soup(4, 6, 1.5, &mut rng),
            Err(Error::InvalidDensity(1.5))
        );
        assert!(matches!(
            random_soup(0, 6, 0.3, &mut rng),
            Err(Error::InvalidShape { .. })
        ));
    }
}
