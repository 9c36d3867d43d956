//! Rules that deduce cell colors from the current clue ranges.

use crate::error::Contradiction;
use crate::puzzle::cell::Cell;
use crate::puzzle::line::Line;
use crate::rules::{black_runs, covering, covering_excluding};

/// Color the cells every feasible placement of a clue has in common.
///
/// A clue with slack `u` leaves only the middle `length - u` cells of its
/// range fixed; those are black under every placement.
#[allow(clippy::cast_sign_loss)]
pub fn fill_intersections(cells: &mut [Cell], line: &mut Line) -> Result<(), Contradiction> {
    for clue in &line.clues {
        let slack = clue.slack();
        let from = (clue.lo + slack).max(0);
        let to = (clue.hi - slack + 1).min(line.size_i());
        if from < to {
            cells[from as usize..to as usize].fill(Cell::Black);
        }
    }
    Ok(())
}

/// Whiten every cell no clue range covers.
///
/// A line whose clues are all zero-length has no runs at all and is
/// entirely white.
#[allow(clippy::cast_sign_loss)]
pub fn fill_gaps(cells: &mut [Cell], line: &mut Line) -> Result<(), Contradiction> {
    if line.nonzero_clues() == 0 {
        cells.fill(Cell::White);
        return Ok(());
    }

    let first = &line.clues[0];
    let last = &line.clues[line.clues.len() - 1];

    for cell in &mut cells[..first.lo.max(0) as usize] {
        *cell = Cell::White;
    }
    if last.hi + 1 >= 0 {
        let tail = ((last.hi + 1) as usize).min(cells.len());
        for cell in &mut cells[tail..] {
            *cell = Cell::White;
        }
    }
    for pair in line.clues.windows(2) {
        let (gap_from, gap_to) = (pair[0].hi + 1, pair[1].lo);
        for idx in gap_from.max(0)..gap_to.min(line.size_i()) {
            cells[idx as usize] = Cell::White;
        }
    }
    Ok(())
}

/// Whiten the cell just outside a range boundary that is black, when every
/// other clue reaching that boundary is a single cell.
///
/// If `cells[lo]` is black and all other clues covering `lo` have length
/// one, the black cell is a complete run for whichever clue owns it, so
/// `cells[lo - 1]` must be white. Symmetrically at `hi`.
#[allow(clippy::cast_sign_loss)]
pub fn whiten_bounding_cells(cells: &mut [Cell], line: &mut Line) -> Result<(), Contradiction> {
    for idx in 0..line.clues.len() {
        let clue = line.clues[idx];
        if clue.length == 0 {
            continue;
        }

        if cells[clue.lo as usize] == Cell::Black
            && clue.lo >= 1
            && cells[(clue.lo - 1) as usize] == Cell::Unknown
        {
            let others = covering_excluding(&line.clues, idx, clue.lo, clue.lo);
            if !others.is_empty() && others.iter().all(|other| other.length == 1) {
                cells[(clue.lo - 1) as usize] = Cell::White;
            }
        }

        if cells[clue.hi as usize] == Cell::Black
            && clue.hi + 1 < line.size_i()
            && cells[(clue.hi + 1) as usize] == Cell::Unknown
        {
            let others = covering_excluding(&line.clues, idx, clue.hi, clue.hi);
            if !others.is_empty() && others.iter().all(|other| other.length == 1) {
                cells[(clue.hi + 1) as usize] = Cell::White;
            }
        }
    }
    Ok(())
}

/// Whiten the single unknown cell between two black runs whose merged
/// length no covering clue could hold.
#[allow(clippy::cast_sign_loss)]
pub fn close_unknown_gaps(cells: &mut [Cell], line: &mut Line) -> Result<(), Contradiction> {
    let runs = black_runs(cells);
    for pair in runs.windows(2) {
        let (left, right) = (pair[0], pair[1]);
        if right.start - left.end != 2 || cells[(left.end + 1) as usize] != Cell::Unknown {
            continue;
        }

        let merged = left.len() + right.len() + 1;
        let covers = covering(&line.clues, left.end, right.start);
        if !covers.is_empty() && covers.iter().all(|clue| clue.length < merged) {
            cells[(left.end + 1) as usize] = Cell::White;
        }
    }
    Ok(())
}

/// Extend a black cell toward the nearest wall or white cell.
///
/// Let `min_len` be the shortest clue covering a black cell `c`. Whichever
/// run contains `c` is at least `min_len` long, so if a white cell or the
/// wall sits closer than `min_len` on one side, cells on the other side
/// must be black to make up the length.
#[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
pub fn extend_black_runs(cells: &mut [Cell], line: &mut Line) -> Result<(), Contradiction> {
    let size = line.size_i();

    for i in 1..size - 1 {
        let covers = covering(&line.clues, i, i);
        let min_len = covers.iter().map(|clue| clue.length).min().unwrap_or(0);
        if min_len == 0 || cells[i as usize] != Cell::Black {
            continue;
        }

        // extend to the right of a left-bounded black cell
        if cells[(i - 1) as usize] != Cell::Black {
            let mut found = false;
            let mut m = -1;
            let mut j = i - 1;
            while j > (i - min_len).max(-1) {
                m = j;
                if cells[j as usize] == Cell::White {
                    found = true;
                    break;
                }
                j -= 1;
            }

            let from = i + 1;
            let to = if found { m + min_len + 1 } else { min_len };
            if (found || m == 0) && from < to {
                cells[from as usize..(to.min(size)) as usize].fill(Cell::Black);
            }
        }

        // extend to the left of a right-bounded black cell
        if cells[(i + 1) as usize] != Cell::Black {
            let mut found = false;
            let mut n = -1;
            for j in i + 1..(i + min_len).min(size) {
                n = j;
                if cells[j as usize] == Cell::White {
                    found = true;
                    break;
                }
            }

            let from = if found { n - min_len } else { size - min_len };
            let to = i;
            if (found || n == size - 1) && from < to {
                cells[(from.max(0)) as usize..to as usize].fill(Cell::Black);
            }
        }
    }
    Ok(())
}

/// Whiten the boundary cells of a run every covering clue already matches
/// in length. Such a run is complete no matter which clue owns it.
#[allow(clippy::cast_sign_loss)]
pub fn close_finished_runs(cells: &mut [Cell], line: &mut Line) -> Result<(), Contradiction> {
    for run in black_runs(cells) {
        let covers = covering(&line.clues, run.start, run.end);
        if covers.is_empty() || covers.iter().any(|clue| clue.length != run.len()) {
            continue;
        }

        if run.start > 0 {
            cells[(run.start - 1) as usize] = Cell::White;
        }
        if run.end + 1 < line.size_i() {
            cells[(run.end + 1) as usize] = Cell::White;
        }
    }
    Ok(())
}
