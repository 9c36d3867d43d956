//! The cell matrix shared by the row and column lines.

use crate::error::Contradiction;
use crate::puzzle::cell::{Cell, color_counts};
use crate::puzzle::line::{Line, Orientation};
use crate::puzzle::solution::Solution;

/// The tri-state cell matrix together with the row and column lines.
///
/// Rows and columns refer to the same cells, which is why every write goes
/// through [`Grid::write_row`] or [`Grid::write_col`]: a value that
/// conflicts with a cell fixed from the other orientation is reported as a
/// [`Contradiction`] instead of silently corrupting the model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<Cell>>,
    rows: Vec<Line>,
    cols: Vec<Line>,
}

impl Grid {
    /// Build an all-unknown grid from the row and column clue lengths.
    ///
    /// # Panics
    ///
    /// If the clue list lengths do not match the grid dimensions.
    #[must_use]
    pub fn from_clues(
        width: usize,
        height: usize,
        row_clues: &[Vec<usize>],
        col_clues: &[Vec<usize>],
    ) -> Self {
        assert_eq!(row_clues.len(), height, "one clue list per row");
        assert_eq!(col_clues.len(), width, "one clue list per column");

        let rows = row_clues
            .iter()
            .enumerate()
            .map(|(index, lengths)| Line::new(Orientation::Row, index, width, lengths))
            .collect();
        let cols = col_clues
            .iter()
            .enumerate()
            .map(|(index, lengths)| Line::new(Orientation::Column, index, height, lengths))
            .collect();

        Self {
            width,
            height,
            cells: vec![vec![Cell::Unknown; width]; height],
            rows,
            cols,
        }
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// The cell at `(row, col)`.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// A copy of the `idx`'th row's cells.
    #[must_use]
    pub fn row(&self, idx: usize) -> Vec<Cell> {
        self.cells[idx].clone()
    }

    /// A copy of the `idx`'th column's cells.
    #[must_use]
    pub fn col(&self, idx: usize) -> Vec<Cell> {
        self.cells.iter().map(|row| row[idx]).collect()
    }

    /// The clue metadata of the `idx`'th row.
    #[must_use]
    pub fn row_line(&self, idx: usize) -> &Line {
        &self.rows[idx]
    }

    /// Mutable clue metadata of the `idx`'th row.
    pub fn row_line_mut(&mut self, idx: usize) -> &mut Line {
        &mut self.rows[idx]
    }

    /// The clue metadata of the `idx`'th column.
    #[must_use]
    pub fn col_line(&self, idx: usize) -> &Line {
        &self.cols[idx]
    }

    /// Mutable clue metadata of the `idx`'th column.
    pub fn col_line_mut(&mut self, idx: usize) -> &mut Line {
        &mut self.cols[idx]
    }

    /// Merge deduced values into the `idx`'th row.
    ///
    /// Unknown cells adopt the incoming value; known cells must match it.
    /// Returns the indices that actually changed.
    ///
    /// # Errors
    ///
    /// [`Contradiction::CellConflict`] if an incoming value disagrees with a
    /// cell that is already colored.
    pub fn write_row(&mut self, idx: usize, mask: &[Cell]) -> Result<Vec<usize>, Contradiction> {
        self.merge(Orientation::Row, idx, mask)
    }

    /// Merge deduced values into the `idx`'th column.
    ///
    /// # Errors
    ///
    /// [`Contradiction::CellConflict`] if an incoming value disagrees with a
    /// cell that is already colored.
    pub fn write_col(&mut self, idx: usize, mask: &[Cell]) -> Result<Vec<usize>, Contradiction> {
        self.merge(Orientation::Column, idx, mask)
    }

    fn merge(
        &mut self,
        orientation: Orientation,
        idx: usize,
        mask: &[Cell],
    ) -> Result<Vec<usize>, Contradiction> {
        let mut changed = Vec::new();

        for (position, &incoming) in mask.iter().enumerate() {
            if incoming == Cell::Unknown {
                continue;
            }

            let slot = match orientation {
                Orientation::Row => &mut self.cells[idx][position],
                Orientation::Column => &mut self.cells[position][idx],
            };

            if *slot == Cell::Unknown {
                *slot = incoming;
                changed.push(position);
            } else if *slot != incoming {
                return Err(Contradiction::CellConflict {
                    orientation,
                    index: idx,
                    position,
                    current: *slot,
                    incoming,
                });
            }
        }

        Ok(changed)
    }

    /// Whether every cell has been colored.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_known()))
    }

    /// Snapshot the current cell matrix as a [`Solution`].
    #[must_use]
    pub fn solution(&self) -> Solution {
        Solution::new(self.cells.clone())
    }

    /// Rows still holding unknown cells, most promising guess target first.
    ///
    /// A row scores `unknowns * width + required_white`; lower is better, so
    /// nearly-finished rows with little white slack are guessed at first.
    /// The ordering only tunes search performance, never correctness.
    #[must_use]
    pub fn rank_guess_rows(&self) -> Vec<usize> {
        let mut ranked: Vec<(usize, usize)> = self
            .cells
            .iter()
            .enumerate()
            .filter_map(|(idx, row)| {
                let unknowns = row.iter().filter(|cell| !cell.is_known()).count();
                (unknowns > 0)
                    .then(|| (unknowns * self.width + self.rows[idx].required_white, idx))
            })
            .collect();
        ranked.sort_unstable();
        ranked.into_iter().map(|(_, idx)| idx).collect()
    }

    /// Candidate grids produced by guessing one unknown cell of row `idx`.
    ///
    /// Each unknown cell yields up to two clones: one colored black (only
    /// while the row still needs black cells) and one colored white (same
    /// guard). Clones keep the original untouched; a failed guess is
    /// discarded, never rolled back.
    #[must_use]
    pub fn row_guesses(&self, idx: usize) -> Vec<Self> {
        let line = &self.rows[idx];
        let (placed_black, placed_white) = color_counts(&self.cells[idx]);

        let mut guesses = Vec::new();
        for position in 0..self.width {
            if self.cells[idx][position].is_known() {
                continue;
            }

            if placed_black < line.required_black {
                let mut guess = self.clone();
                guess.cells[idx][position] = Cell::Black;
                guesses.push(guess);
            }

            if placed_white < line.required_white {
                let mut guess = self.clone();
                guess.cells[idx][position] = Cell::White;
                guesses.push(guess);
            }
        }
        guesses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> Grid {
        Grid::from_clues(2, 2, &[vec![1], vec![1]], &[vec![1], vec![1]])
    }

    #[test]
    fn starts_unknown() {
        let grid = two_by_two();
        assert!(!grid.is_solved());
        assert_eq!(grid.row(0), vec![Cell::Unknown, Cell::Unknown]);
        assert_eq!(grid.col(1), vec![Cell::Unknown, Cell::Unknown]);
    }

    #[test]
    fn write_row_adopts_and_reports_changes() {
        let mut grid = two_by_two();
        let changed = grid
            .write_row(0, &[Cell::Black, Cell::Unknown])
            .expect("no conflict");
        assert_eq!(changed, vec![0]);
        assert_eq!(grid.cell(0, 0), Cell::Black);
        assert_eq!(grid.cell(0, 1), Cell::Unknown);
    }

    #[test]
    fn write_matching_value_changes_nothing() {
        let mut grid = two_by_two();
        grid.write_row(0, &[Cell::Black, Cell::White]).unwrap();
        let changed = grid.write_row(0, &[Cell::Black, Cell::White]).unwrap();
        assert!(changed.is_empty());
    }

    #[test]
    fn conflicting_write_is_a_contradiction() {
        let mut grid = two_by_two();
        grid.write_col(0, &[Cell::Black, Cell::Unknown]).unwrap();

        let err = grid
            .write_row(0, &[Cell::White, Cell::Unknown])
            .unwrap_err();
        assert_eq!(
            err,
            Contradiction::CellConflict {
                orientation: Orientation::Row,
                index: 0,
                position: 0,
                current: Cell::Black,
                incoming: Cell::White,
            }
        );
    }

    #[test]
    fn column_writes_land_in_the_right_cells() {
        let mut grid = two_by_two();
        grid.write_col(1, &[Cell::White, Cell::Black]).unwrap();
        assert_eq!(grid.cell(0, 1), Cell::White);
        assert_eq!(grid.cell(1, 1), Cell::Black);
        assert_eq!(grid.cell(0, 0), Cell::Unknown);
    }

    #[test]
    fn solved_once_every_cell_is_known() {
        let mut grid = two_by_two();
        grid.write_row(0, &[Cell::Black, Cell::White]).unwrap();
        assert!(!grid.is_solved());
        grid.write_row(1, &[Cell::White, Cell::Black]).unwrap();
        assert!(grid.is_solved());
    }

    #[test]
    fn guess_ranking_prefers_nearly_finished_rows() {
        let mut grid = Grid::from_clues(
            3,
            2,
            &[vec![1], vec![2]],
            &[vec![1], vec![1], vec![1]],
        );
        grid.write_row(1, &[Cell::Black, Cell::Black, Cell::Unknown])
            .unwrap();

        // row 1 has a single unknown left, row 0 has three
        assert_eq!(grid.rank_guess_rows(), vec![1, 0]);
    }

    #[test]
    fn finished_rows_are_not_guess_targets() {
        let mut grid = two_by_two();
        grid.write_row(0, &[Cell::Black, Cell::White]).unwrap();
        assert_eq!(grid.rank_guess_rows(), vec![1]);
    }

    #[test]
    fn guesses_respect_remaining_color_budgets() {
        let mut grid = two_by_two();
        // row 0 already has its single black cell; only white guesses remain
        grid.write_row(0, &[Cell::Black, Cell::Unknown]).unwrap();

        let guesses = grid.row_guesses(0);
        assert_eq!(guesses.len(), 1);
        assert_eq!(guesses[0].cell(0, 1), Cell::White);
        // the original grid is untouched
        assert_eq!(grid.cell(0, 1), Cell::Unknown);
    }

    #[test]
    fn each_unknown_yields_both_colors_when_allowed() {
        let grid = two_by_two();
        let guesses = grid.row_guesses(0);
        assert_eq!(guesses.len(), 4);
    }
}
