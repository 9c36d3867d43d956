//! Backtracking search for grids propagation alone cannot finish.
//!
//! Each guess clones the grid, colors one unknown cell, and re-runs
//! propagation. A contradiction discards the clone and moves on to the
//! next guess; the original grid is never touched, so there is nothing to
//! roll back.

use crate::puzzle::grid::Grid;
use crate::puzzle::solution::Solution;
use crate::solver::{SolveStats, propagate};
use tracing::debug;

/// Try guesses row by row, most promising row first, recursing while
/// `depth` allows.
///
/// `depth` counts how many further guess levels may be stacked below this
/// one; `None` never stops. Returns the first complete solution found, or
/// `None` when every branch was exhausted or cut off by the depth limit.
#[must_use]
pub fn bifurcate(grid: &Grid, depth: Option<usize>, stats: &mut SolveStats) -> Option<Solution> {
    for row in grid.rank_guess_rows() {
        for mut guess in grid.row_guesses(row) {
            stats.guesses += 1;

            match propagate(&mut guess, stats) {
                Err(contradiction) => {
                    stats.pruned_branches += 1;
                    debug!(row, %contradiction, "guess pruned");
                }
                Ok(Some(solution)) => return Some(solution),
                Ok(None) => {
                    if depth != Some(0) {
                        let below = depth.map(|d| d - 1);
                        if let Some(solution) = bifurcate(&guess, below, stats) {
                            return Some(solution);
                        }
                    }
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::cell::Cell;

    fn ambiguous() -> Grid {
        // two valid colorings; propagation alone cannot decide
        Grid::from_clues(2, 2, &[vec![1], vec![1]], &[vec![1], vec![1]])
    }

    #[test]
    fn finds_a_solution_where_propagation_stalls() {
        let grid = ambiguous();
        let mut stats = SolveStats::default();
        let solution = bifurcate(&grid, None, &mut stats).expect("a diagonal exists");

        let blacks: usize = solution
            .cells()
            .iter()
            .flatten()
            .filter(|&&cell| cell == Cell::Black)
            .count();
        assert_eq!(blacks, 2);
        assert!(stats.guesses >= 1);
    }

    #[test]
    fn single_level_search_suffices_here() {
        let grid = ambiguous();
        let mut stats = SolveStats::default();
        assert!(bifurcate(&grid, Some(0), &mut stats).is_some());
    }

    #[test]
    fn the_original_grid_is_untouched() {
        let grid = ambiguous();
        let mut stats = SolveStats::default();
        bifurcate(&grid, None, &mut stats).unwrap();
        assert!(!grid.is_solved());
        assert_eq!(grid.cell(0, 0), Cell::Unknown);
    }

    fn rooks() -> Grid {
        // one black cell per row and column, six valid colorings; every
        // first-level guess leaves a smaller ambiguous grid behind
        Grid::from_clues(
            3,
            3,
            &[vec![1], vec![1], vec![1]],
            &[vec![1], vec![1], vec![1]],
        )
    }

    #[test]
    fn depth_limit_cuts_the_search_off() {
        let mut stats = SolveStats::default();
        assert!(bifurcate(&rooks(), Some(0), &mut stats).is_none());
        assert!(stats.guesses > 0);
    }

    #[test]
    fn one_extra_level_finishes_the_rooks_grid() {
        let mut stats = SolveStats::default();
        assert!(bifurcate(&rooks(), Some(1), &mut stats).is_some());
        assert!(bifurcate(&rooks(), None, &mut stats).is_some());
    }
}
