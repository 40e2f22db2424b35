//! Packing of binary matrices into Unicode braille patterns.
//!
//! Each output cell covers a block of 4 rows by 2 columns:
//!
//! ```text
//! +-----+-----+
//! | 0x01| 0x08|
//! | 0x02| 0x10|
//! | 0x04| 0x20|
//! | 0x40| 0x80|
//! +-----+-----+
//! ```

use super::grid::Grid;

pub const BLOCK_ROWS: usize = 4;
pub const BLOCK_COLUMNS: usize = 2;

/// First code point of the braille patterns block (no dots raised).
pub const BRAILLE_BASE: u32 = 0x2800;

/// Dot weight per position inside a block, indexed `[row][column]`.
pub const BRAILLE_WEIGHTS: [[u8; BLOCK_COLUMNS]; BLOCK_ROWS] =
    [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

/// Map a dot mask onto its braille character.
pub fn braille_char(mask: u8) -> char {
    // The whole 0x2800..=0x28FF range is assigned, so this never falls back.
    char::from_u32(BRAILLE_BASE + u32::from(mask)).unwrap_or(' ')
}

/// Pack a binary matrix into braille characters.
///
/// The output has `ceil(height / 4)` rows and `ceil(width / 2)` columns.
/// Positions of an edge block that fall outside the source count as blank.
pub fn pack_braille(matrix: &Grid<u8>) -> Grid<char> {
    let height = matrix.height();
    let width = matrix.width();
    let rows = height.div_ceil(BLOCK_ROWS);
    let columns = width.div_ceil(BLOCK_COLUMNS);

    let mut cells = Vec::with_capacity(rows * columns);
    for top in (0..height).step_by(BLOCK_ROWS) {
        for left in (0..width).step_by(BLOCK_COLUMNS) {
            cells.push(braille_char(block_mask(matrix, top, left)));
        }
    }

    Grid::new(columns, rows, cells)
}

fn block_mask(matrix: &Grid<u8>, top: usize, left: usize) -> u8 {
    let mut mask = 0;
    for (dy, weights) in BRAILLE_WEIGHTS.iter().enumerate() {
        for (dx, &weight) in weights.iter().enumerate() {
            if matrix.get(top + dy, left + dx).is_some_and(|&cell| cell != 0) {
                mask |= weight;
            }
        }
    }
    mask
}
