//! The puzzle model: cells, clues, lines, the grid, parsing, and rendering.
//!
//! Everything the rule engine operates on lives here. The modules are
//! deliberately small; the interesting logic is in [`crate::rules`] and
//! [`crate::solver`].

pub mod cell;
pub mod clue;
pub mod grid;
pub mod line;
pub mod parse;
pub mod solution;

pub use cell::Cell;
pub use clue::Clue;
pub use grid::Grid;
pub use line::{Line, Orientation};
pub use parse::{ParseError, PuzzleFormat, parse_file, parse_puzzle};
pub use solution::Solution;
