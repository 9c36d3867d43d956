//! Combined rules: deductions from black runs and white segments inside a
//! clue's range, refining ranges and coloring cells together.

use crate::error::Contradiction;
use crate::puzzle::cell::Cell;
use crate::puzzle::line::Line;
use crate::rules::{Span, black_runs, covering_excluding, non_white_segments};

/// Fill between the black runs a clue owns alone and clamp its range.
///
/// When every black run inside a clue's range is covered by no other clue,
/// the runs all belong to this clue; everything between the first and the
/// last must be black and the range shrinks to the residual slack on each
/// side.
#[allow(clippy::cast_sign_loss)]
pub fn collapse_scattered_ranges(cells: &mut [Cell], line: &mut Line) -> Result<(), Contradiction> {
    for idx in 0..line.clues.len() {
        let clue = line.clues[idx];
        let owned: Vec<Span> = black_runs(cells)
            .into_iter()
            .filter(|run| clue.lo <= run.start && run.end <= clue.hi)
            .collect();
        let Some((first, last)) = owned
            .first()
            .zip(owned.last())
            .map(|(head, tail)| (head.start, tail.end))
        else {
            continue;
        };

        if !covering_excluding(&line.clues, idx, first, first).is_empty()
            || !covering_excluding(&line.clues, idx, last, last).is_empty()
            || clue.length < last - first + 1
        {
            continue;
        }

        cells[first as usize..=last as usize].fill(Cell::Black);

        let residual = clue.length - (last - first + 1);
        if line.clues[idx].lo < first - residual {
            line.clues[idx].lo = first - residual;
        }
        if line.clues[idx].hi > last + residual {
            line.clues[idx].hi = last + residual;
        }
    }
    Ok(())
}

/// Narrow a clue's range to the white-delimited segments that can hold its
/// run, and whiten too-short segments the clue owns alone.
///
/// The white cells partition the line into segments. The clue's run fits
/// only in a segment at least as long as the run, so `lo` moves to the
/// start of the first fitting segment and `hi` to the end of the last. A
/// segment too short for the run and covered by no other clue can never be
/// black.
///
/// # Errors
///
/// [`Contradiction::WhiteSegmentConflict`] if a segment that must be
/// whitened already holds a black cell.
#[allow(clippy::cast_sign_loss)]
pub fn narrow_by_white_segments(cells: &mut [Cell], line: &mut Line) -> Result<(), Contradiction> {
    let segments = non_white_segments(cells);

    for idx in 0..line.clues.len() {
        let clue = line.clues[idx];
        let touched: Vec<Span> = segments
            .iter()
            .filter(|seg| clue.lo <= seg.end && seg.start <= clue.hi)
            .copied()
            .collect();

        for seg in &touched {
            let clue = line.clues[idx];
            let fits = seg.overlap(clue.lo, clue.hi) >= clue.length;
            if seg.start < clue.lo && fits {
                break;
            }
            if fits {
                line.clues[idx].lo = seg.start;
                break;
            }
        }

        for seg in touched.iter().rev() {
            let clue = line.clues[idx];
            let fits = seg.overlap(clue.lo, clue.hi) >= clue.length;
            if clue.hi < seg.end && fits {
                break;
            }
            if fits {
                line.clues[idx].hi = seg.end;
                break;
            }
        }

        for seg in &touched {
            let clue = line.clues[idx];
            if clue.lo <= seg.start
                && seg.end <= clue.hi
                && covering_excluding(&line.clues, idx, seg.start, seg.end).is_empty()
                && seg.overlap(clue.lo, clue.hi) < clue.length
            {
                for pos in seg.start..=seg.end {
                    if cells[pos as usize] == Cell::Black {
                        return Err(Contradiction::WhiteSegmentConflict {
                            orientation: line.orientation,
                            index: line.index,
                            start: seg.start,
                            end: seg.end,
                        });
                    }
                }
                for pos in seg.start..=seg.end {
                    cells[pos as usize] = Cell::White;
                }
            }
        }
    }
    Ok(())
}

/// Resolve clues whose range no longer overlaps a neighbour's range.
///
/// Such a clue competes with no neighbour for the runs in its range, which
/// allows much sharper deductions than the shared-range rules. Three
/// steps: anchor a run starting right at `lo`, clamp `hi` at a white cell
/// following a black one, and clamp against pairs of runs that together
/// exceed the run length (once scanning forward, once backward).
pub fn resolve_detached_runs(cells: &mut [Cell], line: &mut Line) -> Result<(), Contradiction> {
    anchor_unshared_starts(cells, line)?;
    clamp_after_interior_white(cells, line)?;
    clamp_forward_segment_spans(cells, line)?;
    clamp_backward_segment_spans(cells, line)
}

/// A black cell at `lo` of a clue detached from its predecessor starts the
/// clue's run: color the whole run, fence it with white, and fix the
/// range. Neighbour ranges are pushed off the fenced run.
#[allow(clippy::cast_sign_loss)]
fn anchor_unshared_starts(cells: &mut [Cell], line: &mut Line) -> Result<(), Contradiction> {
    let size = line.size_i();

    for idx in 0..line.clues.len() {
        let clue = line.clues[idx];
        if clue.length == 0 || clue.lo < 0 || clue.lo >= size {
            continue;
        }
        if cells[clue.lo as usize] != Cell::Black {
            continue;
        }
        if idx > 0 && line.clues[idx - 1].hi >= clue.lo {
            continue;
        }

        let run_end = (clue.lo + clue.length).min(size);
        cells[clue.lo as usize..run_end as usize].fill(Cell::Black);
        if clue.lo > 0 {
            cells[(clue.lo - 1) as usize] = Cell::White;
        }
        if clue.lo + clue.length < size {
            cells[(clue.lo + clue.length) as usize] = Cell::White;
        }

        line.clues[idx].hi = clue.lo + clue.length - 1;
        let hi = line.clues[idx].hi;

        if idx > 0 && line.clues[idx - 1].hi == clue.lo - 1 {
            line.clues[idx - 1].hi = clue.lo - 2;
        }
        if idx + 1 < line.clues.len() && line.clues[idx + 1].lo < hi + 2 {
            line.clues[idx + 1].lo = hi + 2;
        }
    }
    Ok(())
}

/// Within a detached clue's range, a white cell after the first black cell
/// ends the run: the range cannot reach past it.
#[allow(clippy::cast_sign_loss)]
fn clamp_after_interior_white(cells: &mut [Cell], line: &mut Line) -> Result<(), Contradiction> {
    let size = line.size_i();

    for idx in 0..line.clues.len() {
        let clue = line.clues[idx];
        if idx > 0 && line.clues[idx - 1].hi >= clue.lo {
            continue;
        }
        if clue.lo < 0 || clue.hi >= size {
            continue;
        }

        let Some(black) = (clue.lo..=clue.hi).find(|&pos| cells[pos as usize] == Cell::Black)
        else {
            continue;
        };
        if let Some(white) = (black..=clue.hi).find(|&pos| cells[pos as usize] == Cell::White) {
            line.clues[idx].hi = white - 1;
        }
    }
    Ok(())
}

/// Scan run pairs forward: a later run whose span from an earlier run's
/// start exceeds the run length cannot share the clue with it, so `hi`
/// stops two short of the later run.
fn clamp_forward_segment_spans(cells: &mut [Cell], line: &mut Line) -> Result<(), Contradiction> {
    let runs = black_runs(cells);

    for idx in 0..line.clues.len() {
        let clue = line.clues[idx];
        if idx > 0 && line.clues[idx - 1].hi >= clue.lo {
            continue;
        }
        let starting: Vec<Span> = runs
            .iter()
            .filter(|run| clue.lo <= run.start && run.start <= clue.hi)
            .copied()
            .collect();

        'scan: for (i, run) in starting.iter().enumerate() {
            for later in &starting[i + 1..] {
                if later.end - run.start + 1 > clue.length {
                    line.clues[idx].hi = later.start - 2;
                    break 'scan;
                }
            }
        }
    }
    Ok(())
}

/// The mirror of [`clamp_forward_segment_spans`], scanning backward and
/// raising `lo`.
fn clamp_backward_segment_spans(cells: &mut [Cell], line: &mut Line) -> Result<(), Contradiction> {
    let runs = black_runs(cells);

    for idx in (0..line.clues.len()).rev() {
        let clue = line.clues[idx];
        if idx + 1 < line.clues.len() && clue.hi >= line.clues[idx + 1].lo {
            continue;
        }
        let ending: Vec<Span> = runs
            .iter()
            .filter(|run| clue.lo <= run.end && run.end <= clue.hi)
            .copied()
            .collect();

        'scan: for (i, run) in ending.iter().enumerate().rev() {
            for earlier in ending[..i].iter().rev() {
                if run.end - earlier.start + 1 > clue.length {
                    line.clues[idx].lo = earlier.end + 2;
                    break 'scan;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testutil::{line, mask, render};

    #[test]
    fn collapse_scattered_ranges_joins_owned_runs() {
        let mut cells = mask("....X.X......");
        let mut meta = line(13, &[(1, 0, 3), (4, 2, 8), (3, 7, 12)]);
        collapse_scattered_ranges(&mut cells, &mut meta).unwrap();

        assert_eq!(render(&cells), "....XXX......");
        assert_eq!((meta.clues[1].lo, meta.clues[1].hi), (3, 7));
        assert_eq!((meta.clues[0].lo, meta.clues[0].hi), (0, 3));
        assert_eq!((meta.clues[2].lo, meta.clues[2].hi), (7, 12));
    }

    #[test]
    fn collapse_scattered_ranges_clamps_around_a_single_run() {
        let mut cells = mask("....XXX....");
        let mut meta = line(11, &[(5, 0, 10)]);
        collapse_scattered_ranges(&mut cells, &mut meta).unwrap();

        assert_eq!(render(&cells), "....XXX....");
        assert_eq!((meta.clues[0].lo, meta.clues[0].hi), (2, 8));
    }

    #[test]
    fn collapse_scattered_ranges_skips_shared_runs() {
        let mut cells = mask(".... X .. ");
        let mut meta = line(10, &[(1, 0, 5), (1, 2, 7), (1, 4, 9)]);
        let before = meta.clone();
        collapse_scattered_ranges(&mut cells, &mut meta).unwrap();

        assert_eq!(render(&cells), ".... X .. ");
        assert_eq!(meta, before);
    }

    #[test]
    fn narrow_by_white_segments_moves_lo_past_a_short_segment() {
        let mut cells = mask(".. .......");
        let mut meta = line(10, &[(3, 0, 9)]);
        narrow_by_white_segments(&mut cells, &mut meta).unwrap();
        assert_eq!((meta.clues[0].lo, meta.clues[0].hi), (3, 9));
    }

    #[test]
    fn narrow_by_white_segments_whitens_an_owned_short_segment() {
        let mut cells = mask(".... . ....");
        let mut meta = line(11, &[(3, 0, 10)]);
        narrow_by_white_segments(&mut cells, &mut meta).unwrap();

        assert_eq!(render(&cells), "....   ....");
        assert_eq!((meta.clues[0].lo, meta.clues[0].hi), (0, 10));
    }

    #[test]
    fn narrow_by_white_segments_rejects_black_in_a_doomed_segment() {
        let mut cells = mask(".... X ....");
        let mut meta = line(11, &[(3, 0, 10)]);
        let err = narrow_by_white_segments(&mut cells, &mut meta).unwrap_err();
        assert!(matches!(
            err,
            Contradiction::WhiteSegmentConflict { start: 5, end: 5, .. }
        ));
    }

    #[test]
    fn anchor_unshared_starts_fixes_the_run_in_place() {
        let mut cells = mask("..X.......");
        let mut meta = line(10, &[(3, 2, 9), (2, 3, 9)]);
        anchor_unshared_starts(&mut cells, &mut meta).unwrap();

        assert_eq!(render(&cells), ". XXX ....");
        assert_eq!((meta.clues[0].lo, meta.clues[0].hi), (2, 4));
        assert_eq!(meta.clues[1].lo, 6);
    }

    #[test]
    fn anchor_unshared_starts_ignores_overlapping_predecessors() {
        let mut cells = mask("..X.......");
        let mut meta = line(10, &[(1, 0, 4), (3, 2, 9)]);
        let before = meta.clone();
        anchor_unshared_starts(&mut cells, &mut meta).unwrap();

        // clue 1 overlaps clue 0's range, so its black lo proves nothing
        assert_eq!(render(&cells), "..X.......");
        assert_eq!(meta.clues[1], before.clues[1]);
    }

    #[test]
    fn clamp_after_interior_white_ends_the_range() {
        let mut cells = mask("..X. .....");
        let mut meta = line(10, &[(4, 0, 9)]);
        clamp_after_interior_white(&mut cells, &mut meta).unwrap();
        assert_eq!((meta.clues[0].lo, meta.clues[0].hi), (0, 3));
    }

    #[test]
    fn clamp_forward_segment_spans_stops_before_a_distant_run() {
        let mut cells = mask("X...X.....");
        let mut meta = line(10, &[(3, 0, 9)]);
        clamp_forward_segment_spans(&mut cells, &mut meta).unwrap();
        assert_eq!((meta.clues[0].lo, meta.clues[0].hi), (0, 2));
    }

    #[test]
    fn clamp_backward_segment_spans_starts_after_a_distant_run() {
        let mut cells = mask(".....X...X");
        let mut meta = line(10, &[(3, 0, 9)]);
        clamp_backward_segment_spans(&mut cells, &mut meta).unwrap();
        assert_eq!((meta.clues[0].lo, meta.clues[0].hi), (7, 9));
    }

    #[test]
    fn resolve_detached_runs_composes_the_sub_steps() {
        let mut cells = mask("..X.......");
        let mut meta = line(10, &[(3, 2, 9), (2, 3, 9)]);
        resolve_detached_runs(&mut cells, &mut meta).unwrap();

        assert_eq!(render(&cells), ". XXX ....");
        assert_eq!((meta.clues[0].lo, meta.clues[0].hi), (2, 4));
        assert_eq!((meta.clues[1].lo, meta.clues[1].hi), (6, 9));
    }
}
