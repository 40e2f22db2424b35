//! Synthetic glyph sources for exercising the pipeline without a font file.

use image::{GrayImage, Luma};

use crate::raster::source::{GlyphSource, InkBox};

/// Every glyph is solid ink filling the whole em square.
pub struct SolidBlock;

impl GlyphSource for SolidBlock {
    fn measure(&self, _ch: char, size: u32) -> InkBox {
        let size = size as i32;
        InkBox { left: 0, top: 0, right: size, bottom: size }
    }

    fn draw(&self, canvas: &mut GrayImage, ch: char, origin: (i32, i32), size: u32) {
        fill(canvas, self.measure(ch, size), origin);
    }
}

/// Every glyph is a fixed-size ink rectangle offset from the origin.
pub struct Bar {
    pub width: i32,
    pub height: i32,
    pub left: i32,
    pub top: i32,
}

impl GlyphSource for Bar {
    fn measure(&self, _ch: char, _size: u32) -> InkBox {
        InkBox {
            left: self.left,
            top: self.top,
            right: self.left + self.width,
            bottom: self.top + self.height,
        }
    }

    fn draw(&self, canvas: &mut GrayImage, ch: char, origin: (i32, i32), size: u32) {
        fill(canvas, self.measure(ch, size), origin);
    }
}

/// Space renders nothing, anything else a solid block.
pub struct BlocksAndSpaces;

impl GlyphSource for BlocksAndSpaces {
    fn measure(&self, ch: char, size: u32) -> InkBox {
        if ch == ' ' {
            InkBox::default()
        } else {
            SolidBlock.measure(ch, size)
        }
    }

    fn draw(&self, canvas: &mut GrayImage, ch: char, origin: (i32, i32), size: u32) {
        if ch != ' ' {
            SolidBlock.draw(canvas, ch, origin, size);
        }
    }
}

fn fill(canvas: &mut GrayImage, ink: InkBox, origin: (i32, i32)) {
    let (width, height) = (canvas.width() as i32, canvas.height() as i32);
    for y in (origin.1 + ink.top).max(0)..(origin.1 + ink.bottom).min(height) {
        for x in (origin.0 + ink.left).max(0)..(origin.0 + ink.right).min(width) {
            canvas.put_pixel(x as u32, y as u32, Luma([0]));
        }
    }
}
