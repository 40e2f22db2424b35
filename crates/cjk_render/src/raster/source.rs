use image::GrayImage;

/// Ink bounds of a glyph relative to its drawing origin, y growing downwards.
///
/// The origin is the top-left corner of the line box the glyph is drawn in,
/// so `left` and `top` carry the side bearing and ascender gap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InkBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl InkBox {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Glyph measurement and drawing at a pixel size.
///
/// Implementations paint ink as dark values over whatever the canvas holds,
/// and must place ink for `draw(.., origin, ..)` inside
/// `measure(..)` shifted by `origin`.
pub trait GlyphSource {
    fn measure(&self, ch: char, size: u32) -> InkBox;

    fn draw(&self, canvas: &mut GrayImage, ch: char, origin: (i32, i32), size: u32);
}

impl<S: GlyphSource + ?Sized> GlyphSource for &S {
    fn measure(&self, ch: char, size: u32) -> InkBox {
        (**self).measure(ch, size)
    }

    fn draw(&self, canvas: &mut GrayImage, ch: char, origin: (i32, i32), size: u32) {
        (**self).draw(canvas, ch, origin, size)
    }
}
