//! The single error family of the solving engine.
//!
//! A [`Contradiction`] means the model reached a logically impossible state:
//! a deduction conflicts with a cell that is already fixed, or a clue's
//! feasible range became too small to hold its run. While solving the
//! original puzzle a contradiction is fatal (the puzzle itself is
//! inconsistent); while testing a guess it is expected and simply prunes
//! that branch of the search.

use crate::puzzle::cell::Cell;
use crate::puzzle::line::Orientation;
use thiserror::Error;

/// A detected impossibility in the current grid or line state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Contradiction {
    /// A deduced cell value conflicts with a value already fixed in the grid.
    #[error("{orientation} {index}: cell {position} is already {current:?}, deduced {incoming:?}")]
    CellConflict {
        /// Which orientation the write went through.
        orientation: Orientation,
        /// Index of the line within its orientation.
        index: usize,
        /// Offset of the conflicting cell within the line.
        position: usize,
        /// The value already fixed in the grid.
        current: Cell,
        /// The value the deduction tried to write.
        incoming: Cell,
    },

    /// A clue's feasible range can no longer hold its run.
    #[error("{orientation} {index}: run of {length} cannot fit in [{lo}, {hi}] (line size {size})")]
    ImpossibleRange {
        /// Which orientation the line belongs to.
        orientation: Orientation,
        /// Index of the line within its orientation.
        index: usize,
        /// The run length of the offending clue.
        length: isize,
        /// Earliest feasible start index.
        lo: isize,
        /// Latest feasible end index.
        hi: isize,
        /// The line length.
        size: usize,
    },

    /// More black cells are placed in a line than its clues allow.
    #[error("{orientation} {index}: {placed} black cells placed but clues require {required}")]
    TooManyBlack {
        /// Which orientation the line belongs to.
        orientation: Orientation,
        /// Index of the line within its orientation.
        index: usize,
        /// Black cells currently in the line.
        placed: usize,
        /// Black cells the clues call for.
        required: usize,
    },

    /// More white cells are placed in a line than its clues allow.
    #[error("{orientation} {index}: {placed} white cells placed but clues require {required}")]
    TooManyWhite {
        /// Which orientation the line belongs to.
        orientation: Orientation,
        /// Index of the line within its orientation.
        index: usize,
        /// White cells currently in the line.
        placed: usize,
        /// White cells the clues call for.
        required: usize,
    },

    /// All required black cells are placed but they form the wrong number of runs.
    #[error("{orientation} {index}: {runs} black runs present, clues describe {clues}")]
    RunCountMismatch {
        /// Which orientation the line belongs to.
        orientation: Orientation,
        /// Index of the line within its orientation.
        index: usize,
        /// Maximal black runs currently in the line.
        runs: usize,
        /// Nonzero clues in the line.
        clues: usize,
    },

    /// A segment that must be entirely white contains a black cell.
    #[error("{orientation} {index}: segment [{start}, {end}] must be white but holds a black cell")]
    WhiteSegmentConflict {
        /// Which orientation the line belongs to.
        orientation: Orientation,
        /// Index of the line within its orientation.
        index: usize,
        /// First cell of the segment.
        start: isize,
        /// Last cell of the segment.
        end: isize,
    },
}
