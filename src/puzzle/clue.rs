//! A run-length clue and the feasible range it may occupy.

use std::fmt::{self, Display};

/// One run-length clue together with its feasible placement range.
///
/// `lo` and `hi` are the inclusive bounds on where the run may start and end
/// within its line. Both are narrowed monotonically during solving: `lo`
/// only ever grows, `hi` only ever shrinks. The bounds are signed so that
/// arithmetic near the walls (for example `hi = start - 2` at the left edge)
/// produces a detectably invalid range instead of wrapping; the propagator
/// turns any such range into a contradiction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Clue {
    /// The fixed run length.
    pub length: isize,
    /// Earliest index at which the run may start.
    pub lo: isize,
    /// Latest index at which the run may end.
    pub hi: isize,
}

impl Clue {
    /// A clue with the full line as its feasible range.
    #[must_use]
    pub const fn new(length: isize, size: usize) -> Self {
        Self {
            length,
            lo: 0,
            hi: size as isize - 1,
        }
    }

    /// How much wider the range is than the run. Negative slack is a
    /// contradiction.
    #[must_use]
    pub const fn slack(&self) -> isize {
        (self.hi - self.lo + 1) - self.length
    }

    /// Whether the range covers every cell of `[start, end]`.
    #[must_use]
    pub const fn covers(&self, start: isize, end: isize) -> bool {
        self.lo <= start && end <= self.hi
    }
}

impl Display for Clue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}<->{}|len {})", self.lo, self.hi, self.length)
    }
}
