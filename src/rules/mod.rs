//! The rule pipeline of the line solver.
//!
//! Each rule is a pure function over one line: it reads and colors cells
//! in the mask and narrows the feasible ranges of the line's clues, and
//! nothing else. Rules never widen a range and never uncolor a cell, so
//! repeated application reaches a fixed point.
//!
//! The rules fall into three groups, kept in separate modules:
//! - [`filling`]: deduce cell colors from the current ranges;
//! - [`ranges`]: narrow ranges from clue ordering and adjacent cells;
//! - [`refinement`]: combined deductions from black runs and white
//!   segments within a range.
//!
//! [`RULES`] lists all of them in application order.

pub mod filling;
pub mod ranges;
pub mod refinement;

use crate::error::Contradiction;
use crate::puzzle::cell::Cell;
use crate::puzzle::clue::Clue;
use crate::puzzle::line::Line;

/// The signature every rule shares.
pub type RuleFn = fn(&mut [Cell], &mut Line) -> Result<(), Contradiction>;

/// Every rule, in application order, tagged with the name used in debug
/// traces.
pub const RULES: &[(&str, RuleFn)] = &[
    ("fill_intersections", filling::fill_intersections),
    ("fill_gaps", filling::fill_gaps),
    ("whiten_bounding_cells", filling::whiten_bounding_cells),
    ("close_unknown_gaps", filling::close_unknown_gaps),
    ("extend_black_runs", filling::extend_black_runs),
    ("close_finished_runs", filling::close_finished_runs),
    ("order_clue_ranges", ranges::order_clue_ranges),
    ("shrink_past_adjacent_black", ranges::shrink_past_adjacent_black),
    ("exclude_foreign_runs", ranges::exclude_foreign_runs),
    ("collapse_scattered_ranges", refinement::collapse_scattered_ranges),
    ("narrow_by_white_segments", refinement::narrow_by_white_segments),
    ("resolve_detached_runs", refinement::resolve_detached_runs),
];

/// A maximal run of same-colored (or non-white) cells, by inclusive
/// bounds.
///
/// Signed bounds keep the arithmetic uniform with [`Clue`] ranges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Span {
    pub start: isize,
    pub end: isize,
}

impl Span {
    pub(crate) const fn len(self) -> isize {
        self.end - self.start + 1
    }

    /// Length of the overlap between this span and `[start, end]`.
    pub(crate) fn overlap(self, start: isize, end: isize) -> isize {
        self.end.min(end) - self.start.max(start) + 1
    }
}

/// Maximal runs of black cells.
#[allow(clippy::cast_possible_wrap)]
pub(crate) fn black_runs(cells: &[Cell]) -> Vec<Span> {
    runs_of(cells, |cell| cell == Cell::Black)
}

/// Maximal runs of cells that are not white, i.e. the segments the white
/// cells partition the line into.
#[allow(clippy::cast_possible_wrap)]
pub(crate) fn non_white_segments(cells: &[Cell]) -> Vec<Span> {
    runs_of(cells, |cell| cell != Cell::White)
}

#[allow(clippy::cast_possible_wrap)]
fn runs_of(cells: &[Cell], keep: impl Fn(Cell) -> bool) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut start = None;

    for (idx, &cell) in cells.iter().enumerate() {
        match (keep(cell), start) {
            (true, None) => start = Some(idx as isize),
            (false, Some(s)) => {
                spans.push(Span {
                    start: s,
                    end: idx as isize - 1,
                });
                start = None;
            }
            _ => {}
        }
    }

    if let Some(s) = start {
        spans.push(Span {
            start: s,
            end: cells.len() as isize - 1,
        });
    }
    spans
}

/// Clues whose range covers all of `[start, end]`.
pub(crate) fn covering(clues: &[Clue], start: isize, end: isize) -> Vec<Clue> {
    clues
        .iter()
        .filter(|clue| clue.covers(start, end))
        .copied()
        .collect()
}

/// Like [`covering`], but ignoring the clue at `skip`.
pub(crate) fn covering_excluding(
    clues: &[Clue],
    skip: usize,
    start: isize,
    end: isize,
) -> Vec<Clue> {
    clues
        .iter()
        .enumerate()
        .filter(|&(idx, clue)| idx != skip && clue.covers(start, end))
        .map(|(_, clue)| *clue)
        .collect()
}

/// Whether any of `clues` covers all of `[start, end]`.
pub(crate) fn covered_by_any(clues: &[Clue], start: isize, end: isize) -> bool {
    clues.iter().any(|clue| clue.covers(start, end))
}


#[cfg(test)]
mod tests {
    use super::testutil::mask;
    use super::*;

    #[test]
    fn black_runs_are_maximal() {
        let cells = mask("XX. X  XXX");
        let runs = black_runs(&cells);
        assert_eq!(
            runs,
            vec![
                Span { start: 0, end: 1 },
                Span { start: 4, end: 4 },
                Span { start: 7, end: 9 },
            ]
        );
        assert_eq!(runs[2].len(), 3);
    }

    #[test]
    fn no_black_cells_no_runs() {
        assert!(black_runs(&mask("... ..")).is_empty());
        assert!(black_runs(&[]).is_empty());
    }

    #[test]
    fn segments_are_delimited_by_white() {
        let cells = mask(".X ..  X.");
        let segments = non_white_segments(&cells);
        assert_eq!(
            segments,
            vec![
                Span { start: 0, end: 1 },
                Span { start: 3, end: 4 },
                Span { start: 7, end: 8 },
            ]
        );
    }

    #[test]
    fn covering_is_inclusive_on_both_ends() {
        let clues = [
            Clue { length: 2, lo: 0, hi: 4 },
            Clue { length: 1, lo: 3, hi: 8 },
        ];
        assert_eq!(covering(&clues, 3, 4).len(), 2);
        assert_eq!(covering(&clues, 0, 0).len(), 1);
        assert!(covering(&clues, 2, 6).is_empty());
        assert!(covered_by_any(&clues, 5, 8));
        assert!(!covered_by_any(&clues, 2, 6));
    }

    #[test]
    fn covering_excluding_skips_the_named_clue() {
        let clues = [
            Clue { length: 2, lo: 0, hi: 4 },
            Clue { length: 1, lo: 0, hi: 8 },
        ];
        let found = covering_excluding(&clues, 0, 1, 2);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].length, 1);
    }

    #[test]
    fn overlap_clamps_to_the_section() {
        let span = Span { start: 2, end: 8 };
        assert_eq!(span.overlap(0, 10), 7);
        assert_eq!(span.overlap(4, 6), 3);
        assert_eq!(span.overlap(8, 12), 1);
    }

    #[test]
    fn rule_table_is_complete_and_ordered() {
        assert_eq!(RULES.len(), 12);
        assert_eq!(RULES[0].0, "fill_intersections");
        assert_eq!(RULES[6].0, "order_clue_ranges");
        assert_eq!(RULES[11].0, "resolve_detached_runs");
    }
}
