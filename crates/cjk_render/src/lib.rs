mod matrix;
mod raster;
#[cfg(test)]
mod test_support;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use image::GrayImage;
use log::debug;
use serde::Serialize;

pub use matrix::{
    binary::{to_binary, INK_THRESHOLD},
    braille::{braille_char, pack_braille, BRAILLE_BASE, BRAILLE_WEIGHTS},
    grid::Grid,
};
pub use raster::{
    canvas::{render_glyph, BACKGROUND},
    discover::{discover_font, discover_in, font_dirs, PREFERRED_FAMILIES},
    font::FontGlyphs,
    resize::stretch,
    source::{GlyphSource, InkBox},
};

/// Rows of the braille cell; braille rendering rasterizes at this multiple.
const BRAILLE_SCALE: u32 = 4;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("cannot read font '{}': {source}", .path.display())]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse font: {0}")]
    FontParse(String),
    #[error("no font given and no CJK font found in the system font directories")]
    FontNotFound,
    #[error("invalid ratio '{0}', use 'width:height' format")]
    InvalidRatio(String),
    #[error("invalid base size {0}, must be a positive integer")]
    InvalidSize(u32),
    #[error("glyph size {base} x {factor} is too large")]
    SizeOverflow { base: u32, factor: u32 },
}

/// Width to height stretch applied to every glyph; both terms are positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ratio {
    width: u32,
    height: u32,
}

impl Ratio {
    pub const SQUARE: Ratio = Ratio { width: 1, height: 1 };

    pub fn new(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Side of the square rasterized before stretching.
    pub fn square_size(&self, base: u32) -> Result<u32, RenderError> {
        scaled(base, self.width.max(self.height))
    }

    /// Final `(columns, rows)` of a glyph at `base`.
    pub fn target(&self, base: u32) -> Result<(u32, u32), RenderError> {
        Ok((scaled(base, self.width)?, scaled(base, self.height)?))
    }
}

impl Default for Ratio {
    fn default() -> Self {
        Self::SQUARE
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

impl FromStr for Ratio {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RenderError::InvalidRatio(s.to_owned());
        let (width, height) = s.split_once(':').ok_or_else(invalid)?;
        let width = width.trim().parse().map_err(|_| invalid())?;
        let height = height.trim().parse().map_err(|_| invalid())?;
        Ratio::new(width, height).ok_or_else(invalid)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// One cell per pixel, glyphs stretched by the ratio.
    Binary(Ratio),
    /// One braille character per 2x4 pixel block.
    Braille,
}

impl Default for RenderMode {
    fn default() -> Self {
        RenderMode::Binary(Ratio::default())
    }
}

/// Horizontally concatenated glyph matrices.
///
/// Serializes as the bare nested array of rows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RenderedText {
    Binary(Grid<u8>),
    Braille(Grid<char>),
}

impl RenderedText {
    pub fn width(&self) -> usize {
        match self {
            RenderedText::Binary(grid) => grid.width(),
            RenderedText::Braille(grid) => grid.width(),
        }
    }

    pub fn height(&self) -> usize {
        match self {
            RenderedText::Binary(grid) => grid.height(),
            RenderedText::Braille(grid) => grid.height(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RenderedText::Binary(grid) => grid.is_empty(),
            RenderedText::Braille(grid) => grid.is_empty(),
        }
    }

    /// Rows as printable lines: digits in binary mode, braille glyphs otherwise.
    pub fn text_rows(&self) -> Vec<String> {
        match self {
            RenderedText::Binary(grid) => grid.text_rows().collect(),
            RenderedText::Braille(grid) => grid.text_rows().collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

pub struct CjkRenderer<S = FontGlyphs> {
    source: S,
}

impl CjkRenderer<FontGlyphs> {
    pub fn from_font_path<P: AsRef<Path>>(
        path: P,
        collection_index: u32,
    ) -> Result<Self, RenderError> {
        FontGlyphs::from_path(path, collection_index).map(Self::new)
    }

    /// Load face `collection_index` of the first discoverable CJK font.
    pub fn with_default_font(collection_index: u32) -> Result<Self, RenderError> {
        let path = discover_font().ok_or(RenderError::FontNotFound)?;
        Self::from_font_path(path, collection_index)
    }
}

impl<S: GlyphSource> CjkRenderer<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Grayscale bitmap of `ch` centered in a `size`x`size` square.
    pub fn render_glyph(&self, ch: char, size: u32) -> GrayImage {
        render_glyph(&self.source, ch, size)
    }

    /// Binary matrix of `ch` with `base * ratio.height()` rows and
    /// `base * ratio.width()` columns.
    pub fn render_to_matrix(
        &self,
        ch: char,
        base: u32,
        ratio: Ratio,
    ) -> Result<Grid<u8>, RenderError> {
        check_base(base)?;
        let square = ratio.square_size(base)?;
        let (columns, rows) = ratio.target(base)?;

        let image = self.render_glyph(ch, square);
        let stretched = stretch(&image, columns, rows);
        Ok(to_binary(&stretched))
    }

    /// Braille matrix of `ch` with `base` rows and `2 * base` columns.
    pub fn render_to_braille(&self, ch: char, base: u32) -> Result<Grid<char>, RenderError> {
        check_base(base)?;
        let image = self.render_glyph(ch, scaled(base, BRAILLE_SCALE)?);
        Ok(pack_braille(&to_binary(&image)))
    }

    /// Render every code point of `text` and join the results left to right.
    pub fn render_text(
        &self,
        text: &str,
        base: u32,
        mode: RenderMode,
    ) -> Result<RenderedText, RenderError> {
        check_base(base)?;
        debug!("rendering {} chars at base {base}, {mode:?}", text.chars().count());

        match mode {
            RenderMode::Binary(ratio) => {
                concat_glyphs(text, |ch| self.render_to_matrix(ch, base, ratio))
                    .map(RenderedText::Binary)
            },
            RenderMode::Braille => {
                concat_glyphs(text, |ch| self.render_to_braille(ch, base))
                    .map(RenderedText::Braille)
            },
        }
    }

    /// Binary rendering of `text` as plain nested rows.
    pub fn bitmap(
        &self,
        text: &str,
        base: u32,
        ratio: Ratio,
    ) -> Result<Vec<Vec<u8>>, RenderError> {
        check_base(base)?;
        Ok(concat_glyphs(text, |ch| self.render_to_matrix(ch, base, ratio))?.to_nested())
    }

    /// Braille rendering of `text` as plain nested rows.
    pub fn braille(&self, text: &str, base: u32) -> Result<Vec<Vec<char>>, RenderError> {
        check_base(base)?;
        Ok(concat_glyphs(text, |ch| self.render_to_braille(ch, base))?.to_nested())
    }
}

fn concat_glyphs<T, F>(text: &str, mut render: F) -> Result<Grid<T>, RenderError>
where
    F: FnMut(char) -> Result<Grid<T>, RenderError>,
{
    let mut combined = Grid::empty();
    for ch in text.chars() {
        combined.append_columns(render(ch)?);
    }
    Ok(combined)
}

fn check_base(base: u32) -> Result<(), RenderError> {
    if base == 0 {
        return Err(RenderError::InvalidSize(base));
    }
    Ok(())
}

/// `base * factor`, kept within `i32` so pixel offsets can be signed.
fn scaled(base: u32, factor: u32) -> Result<u32, RenderError> {
    base.checked_mul(factor)
        .filter(|&size| i32::try_from(size).is_ok())
        .ok_or(RenderError::SizeOverflow { base, factor })
}
