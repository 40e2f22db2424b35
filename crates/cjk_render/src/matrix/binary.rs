use image::GrayImage;

use super::grid::Grid;

/// Intensities strictly below this value count as ink.
pub const INK_THRESHOLD: u8 = 128;

/// Threshold a grayscale bitmap into a 0/1 matrix where 1 marks ink.
pub fn to_binary(image: &GrayImage) -> Grid<u8> {
    let cells = image.pixels().map(|pixel| u8::from(pixel.0[0] < INK_THRESHOLD)).collect();
    Grid::new(image.width() as usize, image.height() as usize, cells)
}
