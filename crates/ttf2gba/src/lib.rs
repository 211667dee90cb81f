//! # TrueType/OpenType fonts as a [`FontSource`]
//!
//! Outlines are rendered with [`fontdue`], the face itself is validated and
//! named with [`ttf_parser`].

use std::path::Path;

use fontdue::{Font, FontSettings};
use gbafont::{
    error::{FontLoadError, RasterizationError},
    raster::{Canvas, GlyphSample},
    FontSource,
};
use log::debug;
use ttf_parser::{name_id, Face};

/// Coverage at which a pixel is considered ink
pub const DEFAULT_THRESHOLD: u8 = 128;

/// A scalable font, loaded from a file
pub struct TtfFont {
    font: Font,
    name: String,
    face_name: Option<String>,
    threshold: u8,
}

/// The number of faces in a font file (1 unless it is a collection)
pub fn face_count(data: &[u8]) -> u32 {
    ttf_parser::fonts_in_collection(data).unwrap_or(1)
}

/// The full name of a face, as stored in the `name` table
pub fn face_name(face: &Face<'_>) -> Option<String> {
    face.names()
        .into_iter()
        .filter(|name| name.name_id == name_id::FULL_NAME)
        .find_map(|name| name.to_string())
}

impl TtfFont {
    /// Load face `index` from the font at `path`
    ///
    /// The file name becomes the [`FontSource::name`].
    pub fn open(path: &Path, index: u32) -> Result<Self, FontLoadError> {
        let data = std::fs::read(path).map_err(|e| FontLoadError::new(path, e))?;
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => path.display().to_string(),
        };
        Self::from_bytes(&data, index, name).map_err(|e| FontLoadError::new(path, e.reason))
    }

    /// Load face `index` from font data in memory
    pub fn from_bytes(
        data: &[u8],
        index: u32,
        name: impl Into<String>,
    ) -> Result<Self, FontLoadError> {
        let name = name.into();
        let face = Face::parse(data, index).map_err(|e| FontLoadError::new(&name, e))?;
        let face_name = face_name(&face);
        let font = Font::from_bytes(
            data,
            FontSettings {
                collection_index: index,
                scale: 40.0,
                load_substitutions: false,
            },
        )
        .map_err(|e| FontLoadError::new(&name, e))?;
        debug!("Loaded {:?} ({} glyphs)", face_name, font.glyph_count());
        Ok(Self {
            font,
            name,
            face_name,
            threshold: DEFAULT_THRESHOLD,
        })
    }

    /// Set the coverage at which a pixel is considered ink
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// The full name of the face, if the font has one
    pub fn face_name(&self) -> Option<&str> {
        self.face_name.as_deref()
    }
}

impl FontSource for TtfFont {
    fn name(&self) -> &str {
        &self.name
    }

    fn rasterize(&self, code: u8, size: u32) -> Result<GlyphSample, RasterizationError> {
        let c = char::from(code);
        if !self.font.has_glyph(c) {
            return Err(RasterizationError::MissingGlyph(code));
        }

        let px = size as f32;
        let (metrics, coverage) = self.font.rasterize(c, px);
        if coverage.len() != metrics.width * metrics.height {
            return Err(RasterizationError::Failed(
                code,
                format!("{} coverage values for {:?}", coverage.len(), metrics),
            ));
        }

        // The pen is at the origin, with the ascent line at the top edge
        let ascent = match self.font.horizontal_line_metrics(px) {
            Some(line) => line.ascent.round() as i32,
            None => size as i32,
        };
        let left = metrics.xmin;
        let top = ascent - metrics.ymin - metrics.height as i32;

        let mut canvas = Canvas::working();
        canvas.draw_coverage(left, top, metrics.width, &coverage, self.threshold);
        Ok(GlyphSample::new(code, canvas))
    }
}
