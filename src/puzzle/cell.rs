//! The tri-state cell value and counting helpers over cell slices.

use std::fmt::{self, Display};

/// The tri-state value of one grid cell.
///
/// Cells only ever move from [`Cell::Unknown`] to one of the two colors and
/// never change once colored; propagation relies on that monotonicity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Cell {
    /// Not yet determined.
    #[default]
    Unknown,
    /// Determined to be empty.
    White,
    /// Determined to be filled.
    Black,
}

impl Cell {
    /// Whether the cell has been colored.
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// The glyph used when rendering a grid as text.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Unknown => '.',
            Self::White => ' ',
            Self::Black => 'X',
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Count the black and white cells in a line.
#[must_use]
pub fn color_counts(cells: &[Cell]) -> (usize, usize) {
    let mut black = 0;
    let mut white = 0;
    for cell in cells {
        match cell {
            Cell::Black => black += 1,
            Cell::White => white += 1,
            Cell::Unknown => {}
        }
    }
    (black, white)
}
