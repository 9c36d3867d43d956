//! Per-row and per-column clue metadata.

use crate::puzzle::clue::Clue;
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt::{self, Display};

/// Whether a line runs across or down the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// A horizontal line.
    Row,
    /// A vertical line.
    Column,
}

impl Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row => write!(f, "row"),
            Self::Column => write!(f, "column"),
        }
    }
}

/// Everything known about one row or column: its clue sequence with the
/// per-clue feasible ranges, and the black/white cell totals the clues imply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    /// Number of cells in the line.
    pub size: usize,
    /// Index of the line within its orientation.
    pub index: usize,
    /// Row or column.
    pub orientation: Orientation,
    /// The ordered clue sequence. Lines rarely hold more than a handful.
    pub clues: SmallVec<[Clue; 8]>,
    /// Black cells the clues require in total.
    pub required_black: usize,
    /// White cells the clues require in total.
    pub required_white: usize,
}

impl Line {
    /// Build a line from its clue lengths, each clue starting with the whole
    /// line as its feasible range.
    #[must_use]
    pub fn new(orientation: Orientation, index: usize, size: usize, lengths: &[usize]) -> Self {
        let clues: SmallVec<[Clue; 8]> = lengths
            .iter()
            .map(|&length| Clue::new(length as isize, size))
            .collect();
        let required_black: usize = lengths.iter().sum();
        Self {
            size,
            index,
            orientation,
            clues,
            required_black,
            required_white: size.saturating_sub(required_black),
        }
    }

    /// The line length as a signed index, for range arithmetic.
    #[must_use]
    pub const fn size_i(&self) -> isize {
        self.size as isize
    }

    /// How many clues describe an actual run (length above zero).
    #[must_use]
    pub fn nonzero_clues(&self) -> usize {
        self.clues.iter().filter(|clue| clue.length > 0).count()
    }
}

impl Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: size {}, clues [{}]",
            self.orientation,
            self.index,
            self.size,
            self.clues.iter().map(ToString::to_string).join("; ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_counts_follow_clues() {
        let line = Line::new(Orientation::Row, 0, 10, &[3, 2]);
        assert_eq!(line.required_black, 5);
        assert_eq!(line.required_white, 5);
        assert_eq!(line.clues.len(), 2);
        assert_eq!(line.clues[0].lo, 0);
        assert_eq!(line.clues[1].hi, 9);
    }

    #[test]
    fn oversubscribed_line_saturates_white() {
        let line = Line::new(Orientation::Column, 2, 4, &[3, 3]);
        assert_eq!(line.required_black, 6);
        assert_eq!(line.required_white, 0);
    }

    #[test]
    fn nonzero_clues_skips_placeholders() {
        let line = Line::new(Orientation::Row, 1, 5, &[0]);
        assert_eq!(line.nonzero_clues(), 0);
        let line = Line::new(Orientation::Row, 1, 5, &[2, 1]);
        assert_eq!(line.nonzero_clues(), 2);
    }

    #[test]
    fn display_names_the_orientation() {
        let line = Line::new(Orientation::Column, 3, 5, &[2]);
        assert_eq!(line.to_string(), "column 3: size 5, clues [(0<->4|len 2)]");
    }
}
