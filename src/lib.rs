//! # Game of Life
//!
//! Conway's Game of Life on a bounded grid.
//!
//! [`Life`] holds the current generation, counts neighbors and advances the
//! grid one generation at a time. Cells outside the grid count as dead; there
//! is no wrap-around.
//!
//! ```
//! use game_of_life::{Life, Pattern};
//!
//! let mut life = Life::new(Pattern::Blinker.seed());
//! let start = life.render();
//! life.transition();
//! life.transition();
//! assert_eq!(life.render(), start);
//! ```

pub mod error;
pub mod grid;
pub mod life;
pub mod patterns;
pub mod tui;

pub use error::{Error, Result};
pub use grid::{Cell, Grid};
pub use life::{Direction, Life, Stats};
pub use patterns::{random_soup, Pattern};
