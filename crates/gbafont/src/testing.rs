//! Synthetic fonts for tests

use std::collections::BTreeMap;

use crate::{
    error::RasterizationError,
    raster::{Canvas, GlyphSample},
    source::FontSource,
};

/// A font drawn from ASCII art, `#` is ink
///
/// Characters without art are blank, characters in `missing` fail.
pub(crate) struct ArtFont {
    pub glyphs: BTreeMap<u8, (u32, u32, Vec<&'static str>)>,
    pub missing: Vec<u8>,
}

impl ArtFont {
    pub fn new() -> Self {
        Self {
            glyphs: BTreeMap::new(),
            missing: Vec::new(),
        }
    }

    /// Add a glyph with its top left corner at (x, y)
    pub fn with(mut self, code: u8, x: u32, y: u32, art: &[&'static str]) -> Self {
        self.glyphs.insert(code, (x, y, art.to_vec()));
        self
    }

    pub fn without(mut self, code: u8) -> Self {
        self.missing.push(code);
        self
    }
}

impl FontSource for ArtFont {
    fn name(&self) -> &str {
        "art.ttf"
    }

    fn rasterize(&self, code: u8, _size: u32) -> Result<GlyphSample, RasterizationError> {
        if self.missing.contains(&code) {
            return Err(RasterizationError::MissingGlyph(code));
        }
        let mut canvas = Canvas::working();
        if let Some((x, y, art)) = self.glyphs.get(&code) {
            for (row, line) in art.iter().enumerate() {
                for (col, c) in line.chars().enumerate() {
                    if c == '#' {
                        canvas.set_ink(x + col as u32, y + row as u32);
                    }
                }
            }
        }
        Ok(GlyphSample::new(code, canvas))
    }
}

/// A font where every glyph is a solid block that grows with the size
pub(crate) struct BlockFont;

impl FontSource for BlockFont {
    fn name(&self) -> &str {
        "blocks.ttf"
    }

    fn rasterize(&self, code: u8, size: u32) -> Result<GlyphSample, RasterizationError> {
        let mut canvas = Canvas::working();
        if code != b' ' {
            let left = u32::from(code % 3);
            let width = size * (1 + u32::from(code % 4)) / 8;
            let height = size / 2 + u32::from(code % 5);
            for y in 1..=height {
                for x in left..left + width {
                    canvas.set_ink(x, y);
                }
            }
        }
        Ok(GlyphSample::new(code, canvas))
    }
}
