//! Parsers for the two textual puzzle dialects.
//!
//! Both dialects share the same skeleton: comment lines (starting with `#`)
//! and blank lines are ignored, the first remaining line is the header
//! `"<width> <height>"`, and every following line lists the run lengths of
//! one column or row as whitespace-separated integers. A line whose only
//! clue is `0` describes a row or column with no runs at all.
//!
//! The dialects differ in ordering:
//! - the native format lists the `width` column clue lines first, then the
//!   `height` row clue lines;
//! - the NIN format (the export format used by webpbn) lists rows first,
//!   then columns.

use crate::puzzle::grid::Grid;
use itertools::Itertools;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Which textual dialect a puzzle file uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PuzzleFormat {
    /// Column clues first, then row clues.
    #[default]
    Native,
    /// Row clues first, then column clues (webpbn export).
    Nin,
}

/// A malformed puzzle description.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The file could not be read.
    #[error("failed to read puzzle: {0}")]
    Io(#[from] io::Error),

    /// The `"<width> <height>"` header is missing or malformed.
    #[error("bad puzzle header: {0:?}")]
    BadHeader(String),

    /// A clue line holds something other than whitespace-separated integers.
    #[error("bad clue line: {0:?}")]
    BadClue(String),

    /// The file does not hold exactly one clue line per column and row.
    #[error("expected {expected} clue lines, found {found}")]
    WrongLineCount {
        /// Clue lines the header calls for (`width + height`).
        expected: usize,
        /// Clue lines actually present.
        found: usize,
    },
}

/// Parse a puzzle from any buffered reader.
///
/// # Errors
///
/// [`ParseError`] on I/O failure or a malformed description.
pub fn parse_puzzle<R: BufRead>(reader: R, format: PuzzleFormat) -> Result<Grid, ParseError> {
    let mut lines = cleanse(reader)?;
    if lines.is_empty() {
        return Err(ParseError::BadHeader(String::new()));
    }

    let header = lines.remove(0);
    let (width, height) = parse_header(&header)?;

    if lines.len() != width + height {
        return Err(ParseError::WrongLineCount {
            expected: width + height,
            found: lines.len(),
        });
    }

    let clues: Vec<Vec<usize>> = lines.iter().map(|line| parse_clues(line)).try_collect()?;

    let (row_clues, col_clues) = match format {
        PuzzleFormat::Native => {
            let (cols, rows) = clues.split_at(width);
            (rows.to_vec(), cols.to_vec())
        }
        PuzzleFormat::Nin => {
            let (rows, cols) = clues.split_at(height);
            (rows.to_vec(), cols.to_vec())
        }
    };

    Ok(Grid::from_clues(width, height, &row_clues, &col_clues))
}

/// Parse a puzzle file from disk.
///
/// # Errors
///
/// [`ParseError`] on I/O failure or a malformed description.
pub fn parse_file<P: AsRef<Path>>(path: P, format: PuzzleFormat) -> Result<Grid, ParseError> {
    let reader = BufReader::new(File::open(path)?);
    parse_puzzle(reader, format)
}

/// Drop comments and blank lines; the solver core never sees them.
fn cleanse<R: BufRead>(reader: R) -> Result<Vec<String>, io::Error> {
    let mut kept = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        kept.push(line);
    }
    Ok(kept)
}

fn parse_header(header: &str) -> Result<(usize, usize), ParseError> {
    let bad = || ParseError::BadHeader(header.to_string());
    let mut parts = header.split_whitespace();
    let width = parts.next().ok_or_else(bad)?;
    let height = parts.next().ok_or_else(bad)?;
    if parts.next().is_some() {
        return Err(bad());
    }
    Ok((
        width.parse().map_err(|_| bad())?,
        height.parse().map_err(|_| bad())?,
    ))
}

fn parse_clues(line: &str) -> Result<Vec<usize>, ParseError> {
    line.split_whitespace()
        .map(|token| {
            token
                .parse::<usize>()
                .map_err(|_| ParseError::BadClue(line.to_string()))
        })
        .try_collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const NATIVE: &str = "# a 2x3 puzzle\n\
                          2 3\n\
                          \n\
                          # columns\n\
                          1 1\n\
                          3\n\
                          # rows\n\
                          2\n\
                          1\n\
                          1\n";

    #[test]
    fn native_format_lists_columns_first() {
        let grid = parse_puzzle(Cursor::new(NATIVE), PuzzleFormat::Native).unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.row_line(0).required_black, 2);
        assert_eq!(grid.row_line(1).required_black, 1);
        assert_eq!(grid.col_line(0).required_black, 2);
        assert_eq!(grid.col_line(1).required_black, 3);
    }

    #[test]
    fn nin_format_lists_rows_first() {
        let input = "2 3\n2\n1\n1\n1 1\n3\n";
        let grid = parse_puzzle(Cursor::new(input), PuzzleFormat::Nin).unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.row_line(0).required_black, 2);
        assert_eq!(grid.col_line(1).required_black, 3);
    }

    #[test]
    fn zero_clue_means_empty_line() {
        let input = "1 2\n0\n0\n1\n";
        let grid = parse_puzzle(Cursor::new(input), PuzzleFormat::Native).unwrap();
        assert_eq!(grid.row_line(0).clues.len(), 1);
        assert_eq!(grid.row_line(0).clues[0].length, 0);
        assert_eq!(grid.row_line(0).required_black, 0);
    }

    #[test]
    fn missing_header_is_rejected() {
        let err = parse_puzzle(Cursor::new("# only comments\n"), PuzzleFormat::Native).unwrap_err();
        assert!(matches!(err, ParseError::BadHeader(_)));
    }

    #[test]
    fn non_numeric_header_is_rejected() {
        let err = parse_puzzle(Cursor::new("five 5\n"), PuzzleFormat::Native).unwrap_err();
        assert!(matches!(err, ParseError::BadHeader(_)));
    }

    #[test]
    fn wrong_line_count_is_rejected() {
        let err = parse_puzzle(Cursor::new("2 2\n1\n1\n1\n"), PuzzleFormat::Native).unwrap_err();
        assert!(matches!(
            err,
            ParseError::WrongLineCount {
                expected: 4,
                found: 3
            }
        ));
    }

    #[test]
    fn non_numeric_clue_is_rejected() {
        let err = parse_puzzle(Cursor::new("1 1\nx\n1\n"), PuzzleFormat::Native).unwrap_err();
        assert!(matches!(err, ParseError::BadClue(_)));
    }
}
