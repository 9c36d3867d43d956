#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A nonogram (picross) solver built on rule-based line propagation with a
//! backtracking fallback.
//!
//! The solver works the way a human does: every row and column carries its
//! clue sequence together with a feasible placement range per clue, and a
//! pipeline of rules narrows the ranges and colors cells until nothing
//! changes. Grids that stall are finished by guessing single cells and
//! propagating each guess, discarding guesses that end in contradiction.
//!
//! The crate splits into:
//! - [`puzzle`]: the grid model, clue metadata, parsers, and renderers;
//! - [`rules`]: the line-solving rule pipeline;
//! - [`solver`]: the fixed-point propagator and the backtracking search;
//! - [`error`]: the [`error::Contradiction`] type both of them speak.

pub mod error;
pub mod puzzle;
pub mod rules;
pub mod solver;
