//! # Errors of the conversion pipeline

use std::{io, path::PathBuf};

use displaydoc::Display;
use thiserror::Error;

use crate::pack::RowType;

/// The font could not be opened
#[derive(Debug, Error)]
#[error("failed to load font '{}': {reason}", path.display())]
pub struct FontLoadError {
    /// Where the font was loaded from
    pub path: PathBuf,
    /// What went wrong
    pub reason: String,
}

impl FontLoadError {
    /// Create a new error for the given path
    pub fn new(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// A single glyph could not be rasterized
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum RasterizationError {
    /// The font has no glyph for character {0}
    MissingGlyph(u8),
    /// Rasterizing character {0} failed: {1}
    Failed(u8, String),
}

impl RasterizationError {
    /// The code of the character that failed
    pub fn code(&self) -> u8 {
        match self {
            Self::MissingGlyph(code) | Self::Failed(code, _) => *code,
        }
    }
}

/// There is nothing to convert
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum DegenerateInputError {
    /// The character set is empty
    EmptyCharset,
    /// None of the {0} characters has any ink, the uniform cell is 0x0
    NoInk(usize),
}

/// The uniform cell does not fit into the row storage unit
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error(
    "uniform width of {width} pixels (set by character {code}) does not fit into a {} row",
    row_type.c_type()
)]
pub struct PackedWidthOverflowError {
    /// The width of the uniform cell
    pub width: u32,
    /// The storage unit that was requested
    pub row_type: RowType,
    /// The (first) character that has the full width
    pub code: u8,
}

/// Failed to produce or write the artifact pair
#[derive(Debug, Error)]
pub enum EmitError {
    /// The identifier is empty after sanitizing
    #[error("output name {0:?} does not contain any usable characters")]
    InvalidName(String),
    /// One of the two files could not be written
    #[error("failed to write '{}'", path.display())]
    Io {
        /// The file that failed
        path: PathBuf,
        /// The underlying error
        #[source]
        source: io::Error,
    },
}

/// Error of [`crate::convert`], by pipeline stage
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Scanning the character set failed
    #[error("scan: {0}")]
    Degenerate(#[from] DegenerateInputError),
    /// Packing the glyphs failed
    #[error("pack: {0}")]
    Overflow(#[from] PackedWidthOverflowError),
    /// Producing the artifact failed
    #[error("emit: {0}")]
    Emit(#[from] EmitError),
}
