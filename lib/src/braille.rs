//! Braille glyph encoding
//!
//! Unicode Braille patterns occupy U+2800..=U+28FF. The low 8 bits of the
//! offset select which of the 8 dots in a 2-wide, 4-tall cell are raised,
//! using the standard dot numbering:
//!
//! ```text
//!  1 4      0x01 0x08
//!  2 5      0x02 0x10
//!  3 6      0x04 0x20
//!  7 8      0x40 0x80
//! ```

use crate::bitmap::BinaryBitmap;
use crate::config::{CELL_HEIGHT, CELL_WIDTH};
use std::fmt;

/// First codepoint of the Braille patterns block (no dots raised)
pub const BRAILLE_BASE: u32 = 0x2800;

/// (dx, dy, bit weight) for each dot of a cell
pub const DOT_WEIGHTS: [(u32, u32, u8); 8] = [
    (0, 0, 0x01),
    (0, 1, 0x02),
    (0, 2, 0x04),
    (1, 0, 0x08),
    (1, 1, 0x10),
    (1, 2, 0x20),
    (0, 3, 0x40),
    (1, 3, 0x80),
];

/// Braille character for a dot mask
pub fn glyph(mask: u8) -> char {
    // every offset 0..=0xFF is an assigned scalar value
    char::from_u32(BRAILLE_BASE + u32::from(mask)).unwrap_or('\u{2800}')
}

/// Dot mask of the cell whose top-left pixel is (x, y)
pub fn cell_mask(bitmap: &BinaryBitmap, x: u32, y: u32) -> u8 {
    DOT_WEIGHTS
        .iter()
        .filter(|&&(dx, dy, _)| bitmap.get(x + dx, y + dy))
        .fold(0, |mask, &(_, _, weight)| mask | weight)
}

/// Grid of Braille characters, one row per line of text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlyphGrid {
    rows: Vec<Vec<char>>,
}

impl GlyphGrid {
    pub fn rows(&self) -> &[Vec<char>] {
        &self.rows
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of characters per row
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn get(&self, col: usize, row: usize) -> Option<char> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Each row concatenated into a string
    pub fn to_lines(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.iter().collect()).collect()
    }

    pub fn into_rows(self) -> Vec<Vec<char>> {
        self.rows
    }
}

impl fmt::Display for GlyphGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.to_lines().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

/// Encode every 2x4 block of `bitmap` as one Braille character
///
/// Rows are emitted top to bottom, characters left to right.
///
/// # Panics
/// If the bitmap width is not a multiple of 2 or its height not a multiple
/// of 4. The preprocessing stage guarantees both.
pub fn encode(bitmap: &BinaryBitmap) -> GlyphGrid {
    let (width, height) = bitmap.dimensions();
    assert!(
        width.is_multiple_of(CELL_WIDTH) && height.is_multiple_of(CELL_HEIGHT),
        "Bitmap of {width}x{height} must be a multiple of {CELL_WIDTH}x{CELL_HEIGHT}"
    );

    let rows = (0..height)
        .step_by(CELL_HEIGHT as usize)
        .map(|y| {
            (0..width)
                .step_by(CELL_WIDTH as usize)
                .map(|x| glyph(cell_mask(bitmap, x, y)))
                .collect()
        })
        .collect();

    GlyphGrid { rows }
}
