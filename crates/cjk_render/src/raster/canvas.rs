use image::{GrayImage, Luma};
use log::trace;

use super::source::GlyphSource;

/// Canvas fill before drawing.
pub const BACKGROUND: u8 = u8::MAX;

/// Render `ch` centered on a `size`x`size` white canvas.
///
/// Centering uses the measured ink box rather than the advance, so side
/// bearings and overhang are cancelled out.
pub fn render_glyph<S: GlyphSource + ?Sized>(source: &S, ch: char, size: u32) -> GrayImage {
    let mut canvas = GrayImage::from_pixel(size, size, Luma([BACKGROUND]));

    let ink = source.measure(ch, size);
    let side = size as i32;
    let x = (side - ink.width()).div_euclid(2) - ink.left;
    let y = (side - ink.height()).div_euclid(2) - ink.top;
    trace!("drawing {ch:?} at ({x}, {y}) on {size}x{size}, ink {ink:?}");

    source.draw(&mut canvas, ch, (x, y), size);
    canvas
}
