//! # Glyph sources

use crate::{error::RasterizationError, raster::GlyphSample};

/// Something that can draw characters onto the working canvas
///
/// Implementations draw the glyph with the pen at the canvas origin, using
/// binary coverage only, and must not change their own state while doing so.
pub trait FontSource {
    /// The name that is printed into the generated files
    fn name(&self) -> &str;

    /// Sample the character `code` at `size` pixels per em
    fn rasterize(&self, code: u8, size: u32) -> Result<GlyphSample, RasterizationError>;
}

impl<T: FontSource + ?Sized> FontSource for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn rasterize(&self, code: u8, size: u32) -> Result<GlyphSample, RasterizationError> {
        (**self).rasterize(code, size)
    }
}
