//! Solved-grid snapshots and their text and bitmap renderers.

use crate::puzzle::cell::Cell;
use std::fmt::{self, Display};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Bytes per pixel of the bitmap output (24 bpp).
const BYTES_PER_PIXEL: usize = 3;
/// Offset of the pixel array: 14-byte file header plus 40-byte DIB header.
const PIXEL_OFFSET: u32 = 54;

/// A fully (or partially, when solving stalled) colored cell matrix.
///
/// The core only exposes the matrix; how it is rendered is up to the
/// caller. Two renderers ship with the crate: plain text via [`Display`]
/// and a 24-bpp BMP via [`Solution::write_bitmap`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    cells: Vec<Vec<Cell>>,
    width: usize,
    height: usize,
}

impl Solution {
    /// Wrap a cell matrix.
    #[must_use]
    pub fn new(cells: Vec<Vec<Cell>>) -> Self {
        let height = cells.len();
        let width = cells.first().map_or(0, Vec::len);
        Self {
            cells,
            width,
            height,
        }
    }

    /// The cell matrix, row by row.
    #[must_use]
    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
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

    /// Write the solution to `path` as a BMP image, one pixel per cell,
    /// black cells black and everything else white.
    ///
    /// The DIB height is negative so rows are stored top-down and the image
    /// is not upside down. Rows are padded to a multiple of four bytes as
    /// the format requires.
    ///
    /// # Errors
    ///
    /// Any I/O error while creating or writing the file.
    pub fn write_bitmap<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        let pixels = self.pack_pixels();
        out.write_all(&self.bitmap_header(pixels.len()))?;
        out.write_all(&pixels)?;
        out.flush()
    }

    fn row_size(&self) -> usize {
        (self.width * BYTES_PER_PIXEL).next_multiple_of(4)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn bitmap_header(&self, pixel_bytes: usize) -> Vec<u8> {
        let mut header = Vec::with_capacity(PIXEL_OFFSET as usize);
        header.extend_from_slice(b"BM");
        header.extend_from_slice(&(PIXEL_OFFSET + pixel_bytes as u32).to_le_bytes());
        header.extend_from_slice(&0u32.to_le_bytes()); // reserved
        header.extend_from_slice(&PIXEL_OFFSET.to_le_bytes());

        header.extend_from_slice(&40u32.to_le_bytes()); // BITMAPINFOHEADER
        header.extend_from_slice(&(self.width as i32).to_le_bytes());
        header.extend_from_slice(&(-(self.height as i32)).to_le_bytes());
        header.extend_from_slice(&1u16.to_le_bytes()); // color planes
        header.extend_from_slice(&24u16.to_le_bytes()); // bits per pixel
        header.extend_from_slice(&0u32.to_le_bytes()); // no compression
        header.extend_from_slice(&0u32.to_le_bytes()); // pixel array size (unset)
        header.extend_from_slice(&0i32.to_le_bytes()); // horizontal resolution
        header.extend_from_slice(&0i32.to_le_bytes()); // vertical resolution
        header.extend_from_slice(&0u32.to_le_bytes()); // palette colors
        header.extend_from_slice(&0u32.to_le_bytes()); // important colors
        header
    }

    fn pack_pixels(&self) -> Vec<u8> {
        let row_size = self.row_size();
        let mut pixels = vec![0xFF; row_size * self.height];
        for (y, row) in self.cells.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if cell == Cell::Black {
                    let start = y * row_size + x * BYTES_PER_PIXEL;
                    pixels[start..start + BYTES_PER_PIXEL].fill(0);
                }
            }
        }
        pixels
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
