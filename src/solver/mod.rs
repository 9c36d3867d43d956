//! The propagation engine: line validation, the rule pipeline, and the
//! row/column fixed-point sweep.
//!
//! [`propagate`] applies the rules line by line until a full sweep changes
//! nothing. Many puzzles are solved by propagation alone; the rest hand
//! over to [`search::bifurcate`].

pub mod search;

use crate::error::Contradiction;
use crate::puzzle::cell::{Cell, color_counts};
use crate::puzzle::grid::Grid;
use crate::puzzle::line::Line;
use crate::puzzle::solution::Solution;
use crate::rules::{RULES, black_runs};
use tracing::debug;

/// Counters accumulated over one solve, including any search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Full row-and-column sweeps performed.
    pub sweeps: usize,
    /// Lines the rule pipeline was run over, across all sweeps.
    pub lines_examined: usize,
    /// Cells colored by propagation.
    pub cells_colored: usize,
    /// Candidate grids tried during search.
    pub guesses: usize,
    /// Guesses discarded because propagation hit a contradiction.
    pub pruned_branches: usize,
}

/// Knobs for [`solve`].
#[derive(Clone, Copy, Debug)]
pub struct SolveOptions {
    /// Fall back to backtracking search when propagation stalls.
    pub bifurcation: bool,
    /// How many guesses deep the search may nest; `None` is unbounded.
    pub max_depth: Option<usize>,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            bifurcation: true,
            max_depth: None,
        }
    }
}

/// The outcome of [`solve`].
#[derive(Clone, Debug)]
pub struct SolveReport {
    /// The completed grid, if one was found.
    pub solution: Option<Solution>,
    /// Work counters.
    pub stats: SolveStats,
}

/// Check a line's invariants against its current cells.
///
/// # Errors
///
/// - [`Contradiction::ImpossibleRange`] if a clue's range left the line or
///   became too small for its run;
/// - [`Contradiction::TooManyBlack`] / [`Contradiction::TooManyWhite`] if
///   more cells are colored than the clues allow;
/// - [`Contradiction::RunCountMismatch`] if all required black cells are
///   placed but form the wrong number of runs.
pub fn validate_line(cells: &[Cell], line: &Line) -> Result<(), Contradiction> {
    for clue in &line.clues {
        if clue.slack() < 0 || clue.lo < 0 || clue.hi >= line.size_i() {
            return Err(Contradiction::ImpossibleRange {
                orientation: line.orientation,
                index: line.index,
                length: clue.length,
                lo: clue.lo,
                hi: clue.hi,
                size: line.size,
            });
        }
    }

    let (black, white) = color_counts(cells);
    if black > line.required_black {
        return Err(Contradiction::TooManyBlack {
            orientation: line.orientation,
            index: line.index,
            placed: black,
            required: line.required_black,
        });
    }
    if white > line.required_white {
        return Err(Contradiction::TooManyWhite {
            orientation: line.orientation,
            index: line.index,
            placed: white,
            required: line.required_white,
        });
    }

    if black == line.required_black {
        let runs = black_runs(cells).len();
        if runs != line.nonzero_clues() {
            return Err(Contradiction::RunCountMismatch {
                orientation: line.orientation,
                index: line.index,
                runs,
                clues: line.nonzero_clues(),
            });
        }
    }
    Ok(())
}

/// Run the whole rule pipeline over one line.
///
/// The line is validated before the first rule and after every rule, so a
/// grid that is inconsistent from the start is caught even when no rule
/// would fire. Once no unknown cell remains the rest of the pipeline is
/// skipped.
///
/// # Errors
///
/// Whatever [`validate_line`] or a rule reports.
pub fn apply_rules(cells: &mut [Cell], line: &mut Line) -> Result<(), Contradiction> {
    validate_line(cells, line)?;

    for &(name, rule) in RULES {
        if cells.iter().all(|cell| cell.is_known()) {
            break;
        }

        if tracing::enabled!(tracing::Level::DEBUG) {
            let cells_before = cells.to_vec();
            let line_before = line.clone();
            rule(cells, line)?;
            if cells_before.as_slice() != cells || line_before != *line {
                let glyphs: String = cells.iter().map(|cell| cell.glyph()).collect();
                debug!(rule = name, line = %line, mask = %glyphs, "rule narrowed the line");
            }
        } else {
            rule(cells, line)?;
        }

        validate_line(cells, line)?;
    }
    Ok(())
}

/// Sweep rows then columns until a full sweep changes neither a cell nor a
/// clue range.
///
/// Returns the solution if the grid is complete afterwards, `None` if
/// propagation stalled with unknown cells left.
///
/// # Errors
///
/// The first [`Contradiction`] any line reports. On the original grid that
/// means the puzzle is inconsistent; during search it prunes the guess.
pub fn propagate(grid: &mut Grid, stats: &mut SolveStats) -> Result<Option<Solution>, Contradiction> {
    let mut changed = true;
    while changed {
        changed = false;
        stats.sweeps += 1;

        for idx in 0..grid.height() {
            stats.lines_examined += 1;
            let mut cells = grid.row(idx);
            let mut line = grid.row_line(idx).clone();
            apply_rules(&mut cells, &mut line)?;

            if line != *grid.row_line(idx) {
                *grid.row_line_mut(idx) = line;
                changed = true;
            }
            let colored = grid.write_row(idx, &cells)?;
            stats.cells_colored += colored.len();
            changed |= !colored.is_empty();
        }

        for idx in 0..grid.width() {
            stats.lines_examined += 1;
            let mut cells = grid.col(idx);
            let mut line = grid.col_line(idx).clone();
            apply_rules(&mut cells, &mut line)?;

            if line != *grid.col_line(idx) {
                *grid.col_line_mut(idx) = line;
                changed = true;
            }
            let colored = grid.write_col(idx, &cells)?;
            stats.cells_colored += colored.len();
            changed |= !colored.is_empty();
        }
    }

    Ok(grid.is_solved().then(|| grid.solution()))
}

/// Solve the grid: propagation first, search if allowed and needed.
///
/// # Errors
///
/// [`Contradiction`] if the puzzle itself is inconsistent. A stalled but
/// consistent grid is not an error; the report simply carries no solution.
pub fn solve(grid: &mut Grid, options: &SolveOptions) -> Result<SolveReport, Contradiction> {
    let mut stats = SolveStats::default();

    if let Some(solution) = propagate(grid, &mut stats)? {
        return Ok(SolveReport {
            solution: Some(solution),
            stats,
        });
    }

    if !options.bifurcation {
        return Ok(SolveReport {
            solution: None,
            stats,
        });
    }

    debug!("propagation stalled, starting search");
    let solution = search::bifurcate(grid, options.max_depth, &mut stats);
    Ok(SolveReport { solution, stats })
}
