use std::fs;
use std::path::Path;

use fontdue::{Font, FontSettings, Metrics};
use image::GrayImage;
use log::{debug, warn};

use super::source::{GlyphSource, InkBox};
use crate::RenderError;

/// `GlyphSource` backed by a TrueType/OpenType font rasterized with fontdue.
///
/// The outlines are parsed once; every call rasterizes at its own size.
pub struct FontGlyphs {
    font: Font,
}

impl FontGlyphs {
    pub fn from_path<P: AsRef<Path>>(path: P, collection_index: u32) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .map_err(|source| RenderError::FontRead { path: path.to_path_buf(), source })?;

        let glyphs = Self::from_bytes(bytes, collection_index)?;
        debug!(
            "loaded font {} (face {collection_index}, {} glyphs)",
            path.display(),
            glyphs.font.glyph_count()
        );
        Ok(glyphs)
    }

    pub fn from_bytes(bytes: Vec<u8>, collection_index: u32) -> Result<Self, RenderError> {
        let settings = FontSettings { collection_index, ..FontSettings::default() };
        let font =
            Font::from_bytes(bytes, settings).map_err(|err| RenderError::FontParse(err.into()))?;
        Ok(Self { font })
    }

    pub fn has_glyph(&self, ch: char) -> bool {
        self.font.lookup_glyph_index(ch) != 0
    }

    /// Distance from the top of the line box to the baseline.
    fn ascent(&self, px: f32) -> i32 {
        self.font.horizontal_line_metrics(px).map_or(px, |line| line.ascent).round() as i32
    }

    fn ink_box(&self, metrics: &Metrics, px: f32) -> InkBox {
        let width = metrics.width as i32;
        let height = metrics.height as i32;
        let top = self.ascent(px) - (metrics.ymin + height);
        InkBox { left: metrics.xmin, top, right: metrics.xmin + width, bottom: top + height }
    }
}

impl GlyphSource for FontGlyphs {
    fn measure(&self, ch: char, size: u32) -> InkBox {
        let px = size as f32;
        if !self.has_glyph(ch) {
            warn!("font has no glyph for {ch:?}, rendering its fallback");
        }
        self.ink_box(&self.font.metrics(ch, px), px)
    }

    fn draw(&self, canvas: &mut GrayImage, ch: char, origin: (i32, i32), size: u32) {
        let px = size as f32;
        let (metrics, coverage) = self.font.rasterize(ch, px);
        if metrics.width == 0 {
            return;
        }

        let ink = self.ink_box(&metrics, px);
        let (canvas_width, canvas_height) = (canvas.width() as i32, canvas.height() as i32);

        for (row, line) in coverage.chunks(metrics.width).enumerate() {
            let y = origin.1 + ink.top + row as i32;
            if y < 0 || y >= canvas_height {
                continue;
            }

            for (column, &alpha) in line.iter().enumerate() {
                let x = origin.0 + ink.left + column as i32;
                if x < 0 || x >= canvas_width {
                    continue;
                }

                let pixel = canvas.get_pixel_mut(x as u32, y as u32);
                pixel.0[0] = pixel.0[0].min(u8::MAX - alpha);
            }
        }
    }
}
