//! Rules that narrow clue ranges from clue ordering and adjacent cells.

use crate::error::Contradiction;
use crate::puzzle::cell::Cell;
use crate::puzzle::line::Line;
use crate::rules::{black_runs, covered_by_any};

/// Enforce the ordering between consecutive clues.
///
/// A clue cannot start before its predecessor's run plus the separating
/// white cell, and cannot end after its successor leaves room likewise.
/// One forward pass over `lo` and one backward pass over `hi` suffice,
/// since each pass propagates its bound transitively.
pub fn order_clue_ranges(cells: &mut [Cell], line: &mut Line) -> Result<(), Contradiction> {
    let _ = cells;

    for j in 1..line.clues.len() {
        let earliest = line.clues[j - 1].lo + line.clues[j - 1].length + 1;
        if line.clues[j].lo < earliest {
            line.clues[j].lo = earliest;
        }
    }

    for j in (0..line.clues.len().saturating_sub(1)).rev() {
        let latest = line.clues[j + 1].hi - line.clues[j + 1].length - 1;
        if line.clues[j].hi > latest {
            line.clues[j].hi = latest;
        }
    }
    Ok(())
}

/// Pull a range boundary inward when the cell just outside it is black.
///
/// That black cell belongs to a neighbouring clue's run, and a run needs a
/// white cell between itself and this clue's run.
#[allow(clippy::cast_sign_loss)]
pub fn shrink_past_adjacent_black(cells: &mut [Cell], line: &mut Line) -> Result<(), Contradiction> {
    for clue in &mut line.clues {
        if clue.lo >= 1 && cells[(clue.lo - 1) as usize] == Cell::Black {
            clue.lo += 1;
        }
        if clue.hi + 1 < line.size as isize && cells[(clue.hi + 1) as usize] == Cell::Black {
            clue.hi -= 1;
        }
    }
    Ok(())
}

/// Push a range past black runs it cannot own.
///
/// A run longer than the clue inside the clue's range must belong to a
/// neighbour. If only earlier clues can hold it, this clue starts after it
/// (run end plus a separating white cell); if only later clues can, this
/// clue ends before it.
pub fn exclude_foreign_runs(cells: &mut [Cell], line: &mut Line) -> Result<(), Contradiction> {
    let runs = black_runs(cells);

    for idx in 0..line.clues.len() {
        let clue = line.clues[idx];
        let foreign: Vec<_> = runs
            .iter()
            .filter(|run| clue.lo <= run.start && run.end <= clue.hi && run.len() > clue.length)
            .copied()
            .collect();

        for run in foreign {
            if !covered_by_any(&line.clues[idx + 1..], run.start, run.end)
                && line.clues[idx].lo < run.end + 2
            {
                line.clues[idx].lo = run.end + 2;
            }

            if !covered_by_any(&line.clues[..idx], run.start, run.end)
                && run.start - 2 < line.clues[idx].hi
            {
                line.clues[idx].hi = run.start - 2;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testutil::{line, mask};

    #[test]
    fn order_clue_ranges_is_transitive() {
        let mut cells = mask("..........");
        let mut meta = line(10, &[(2, 0, 9), (3, 0, 9), (1, 0, 9)]);
        order_clue_ranges(&mut cells, &mut meta).unwrap();

        assert_eq!((meta.clues[0].lo, meta.clues[0].hi), (0, 3));
        assert_eq!((meta.clues[1].lo, meta.clues[1].hi), (3, 7));
        assert_eq!((meta.clues[2].lo, meta.clues[2].hi), (7, 9));
    }

    #[test]
    fn order_clue_ranges_leaves_consistent_ranges_alone() {
        let mut cells = mask("........");
        let mut meta = line(8, &[(2, 0, 3), (2, 5, 7)]);
        order_clue_ranges(&mut cells, &mut meta).unwrap();
        // clue 1 leaves room through index 4, so (0, 3) already satisfies it
        assert_eq!((meta.clues[0].lo, meta.clues[0].hi), (0, 3));
        assert_eq!((meta.clues[1].lo, meta.clues[1].hi), (5, 7));
    }

    #[test]
    fn shrink_past_adjacent_black_moves_both_bounds() {
        let mut cells = mask("X...X");
        let mut meta = line(5, &[(2, 1, 3)]);
        shrink_past_adjacent_black(&mut cells, &mut meta).unwrap();
        assert_eq!((meta.clues[0].lo, meta.clues[0].hi), (2, 2));
    }

    #[test]
    fn shrink_past_adjacent_black_ignores_white_and_unknown() {
        let mut cells = mask(" ... ");
        let mut meta = line(5, &[(2, 1, 3)]);
        shrink_past_adjacent_black(&mut cells, &mut meta).unwrap();
        assert_eq!((meta.clues[0].lo, meta.clues[0].hi), (1, 3));
    }

    #[test]
    fn exclude_foreign_runs_pushes_hi_before_a_later_clues_run() {
        let mut cells = mask("..XXX.....");
        let mut meta = line(10, &[(1, 0, 5), (3, 0, 9)]);
        exclude_foreign_runs(&mut cells, &mut meta).unwrap();

        // the 3-run can only belong to the second clue
        assert_eq!(meta.clues[0].hi, 0);
        assert_eq!((meta.clues[1].lo, meta.clues[1].hi), (0, 9));
    }

    #[test]
    fn exclude_foreign_runs_pushes_lo_past_an_earlier_clues_run() {
        let mut cells = mask(".XXX......");
        let mut meta = line(10, &[(3, 0, 9), (1, 0, 9)]);
        exclude_foreign_runs(&mut cells, &mut meta).unwrap();

        assert_eq!(meta.clues[1].lo, 5);
        assert_eq!((meta.clues[0].lo, meta.clues[0].hi), (0, 9));
    }

    #[test]
    fn exclude_foreign_runs_keeps_shared_runs() {
        let mut cells = mask("..XX..");
        let mut meta = line(6, &[(2, 0, 5), (2, 0, 5)]);
        exclude_foreign_runs(&mut cells, &mut meta).unwrap();
        assert_eq!((meta.clues[0].lo, meta.clues[0].hi), (0, 5));
        assert_eq!((meta.clues[1].lo, meta.clues[1].hi), (0, 5));
    }
}
