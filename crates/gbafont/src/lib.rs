#![warn(missing_docs)]
//! # Fixed-grid bitmap fonts
//!
//! This crate turns rasterized outline glyphs into a table of bit-packed rows
//! that a small target (like the GBA) can index by character code, together
//! with a C declaration that carries a bounds-checked drawing routine.
//!
//! The pipeline is:
//!
//! 1. [`FontSource::rasterize`] samples one glyph on a fixed working canvas
//! 2. [`chset::scan`] samples a whole [`CharacterSet`] and finds the [`UniformCell`]
//! 3. [`pack::pack`] turns every sample into rows of the uniform cell
//! 4. [`emit::emit`] renders the `.c`/`.h` pair
//!
//! [`convert`] runs all of them in order.

pub mod blit;
pub mod chset;
pub mod emit;
pub mod error;
pub mod pack;
#[cfg(feature = "image")]
pub mod preview;
pub mod raster;
pub mod source;

mod convert;

pub use chset::{CharacterSet, ScannedSet, UniformCell};
pub use convert::{convert, Conversion, Converted};
pub use emit::{EmitOptions, FontArtifact};
pub use error::ConvertError;
pub use pack::{PackedFont, PackedGlyph, RowType};
pub use raster::{BBox, Canvas, GlyphSample};
pub use source::FontSource;

#[cfg(feature = "image")]
#[doc(hidden)]
pub use image;

#[cfg(test)]
pub(crate) mod testing;
