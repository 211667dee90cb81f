//! # Packing glyphs into rows of bits

use std::{fmt, str::FromStr};

use displaydoc::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    chset::{CharacterSet, ScannedSet, UniformCell},
    error::PackedWidthOverflowError,
    raster::{Canvas, GlyphSample},
};

/// The unsigned integer type that holds one packed row
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowType {
    /// 8 bit rows
    U8,
    /// 16 bit rows
    U16,
    /// 32 bit rows
    U32,
}

impl RowType {
    /// All row types, narrowest first
    pub const ALL: [RowType; 3] = [RowType::U8, RowType::U16, RowType::U32];

    /// The number of columns that fit into one row
    pub fn bits(self) -> u32 {
        match self {
            Self::U8 => 8,
            Self::U16 => 16,
            Self::U32 => 32,
        }
    }

    /// The number of bytes per row
    pub fn bytes(self) -> usize {
        (self.bits() / 8) as usize
    }

    /// The name of the type in the generated code
    pub fn c_type(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
        }
    }

    /// The narrowest type with at least `width` bits
    pub fn smallest_for(width: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.bits() >= width)
    }
}

/// How to choose the [`RowType`]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RowPolicy {
    /// Use the narrowest type that fits the uniform cell
    #[default]
    Auto,
    /// Use exactly this type, fail if the cell is wider
    Exact(RowType),
}

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
/// Unknown row type {0:?}, expected `auto`, `u8`, `u16` or `u32`
pub struct UnknownRowType(String);

impl FromStr for RowPolicy {
    type Err = UnknownRowType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "u8" => Ok(Self::Exact(RowType::U8)),
            "u16" => Ok(Self::Exact(RowType::U16)),
            "u32" => Ok(Self::Exact(RowType::U32)),
            _ => Err(UnknownRowType(s.to_owned())),
        }
    }
}

impl TryFrom<String> for RowPolicy {
    type Error = UnknownRowType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RowPolicy> for String {
    fn from(value: RowPolicy) -> Self {
        value.to_string()
    }
}

impl fmt::Display for RowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Exact(t) => f.write_str(t.c_type()),
        }
    }
}

/// The rows of one character
///
/// Row values are MSB-first: bit `width - 1` is the leftmost column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedGlyph {
    /// The character code
    pub code: u8,
    /// One value per row of the uniform cell
    pub rows: Vec<u32>,
}

impl PackedGlyph {
    /// Check whether the pixel at `col`, `row` of a `width` wide cell is set
    pub fn ink_at(&self, width: u32, col: u32, row: u32) -> bool {
        if col >= width {
            return false;
        }
        match self.rows.get(row as usize) {
            Some(bits) => (bits >> (width - 1 - col)) & 1 > 0,
            None => false,
        }
    }

    /// Draw the glyph onto a canvas of the cell size
    pub fn to_canvas(&self, cell: UniformCell) -> Canvas {
        let mut canvas = Canvas::new(cell.width, cell.height);
        for row in 0..cell.height {
            for col in 0..cell.width {
                if self.ink_at(cell.width, col, row) {
                    canvas.set_ink(col, row);
                }
            }
        }
        canvas
    }
}

/// A whole character set in the uniform cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedFont {
    /// The character set
    pub chset: CharacterSet,
    /// The shape of every glyph
    pub cell: UniformCell,
    /// The storage unit of a row
    pub row_type: RowType,
    /// One entry per code, in table order
    pub glyphs: Vec<PackedGlyph>,
}

impl PackedFont {
    /// Get the glyph for a code
    pub fn glyph(&self, code: u8) -> Option<&PackedGlyph> {
        self.chset.index_of(code).and_then(|i| self.glyphs.get(i))
    }

    /// The size of the table on the target
    pub fn table_bytes(&self) -> usize {
        self.glyphs.len() * self.cell.height as usize * self.row_type.bytes()
    }
}

/// Sample the uniform cell of a glyph, anchored at its bounding box origin
pub fn pack_glyph(sample: &GlyphSample, cell: UniformCell) -> PackedGlyph {
    let (bx, by) = (sample.bbox.x0, sample.bbox.y0);
    let rows = (0..cell.height)
        .map(|r| {
            (0..cell.width).fold(0u32, |bits, c| {
                (bits << 1) | u32::from(sample.canvas.ink_at(bx + c, by + r))
            })
        })
        .collect();
    PackedGlyph {
        code: sample.code,
        rows,
    }
}

/// Pack every sample of a scanned set
///
/// The row type is chosen according to `policy`. A cell that is wider than
/// the row type is an error, bits are never dropped.
pub fn pack(
    scanned: &ScannedSet,
    policy: RowPolicy,
) -> Result<PackedFont, PackedWidthOverflowError> {
    let cell = scanned.cell;
    let overflow = |row_type| PackedWidthOverflowError {
        width: cell.width,
        row_type,
        code: scanned.widest.unwrap_or(scanned.chset.first()),
    };
    let row_type = match policy {
        RowPolicy::Auto => {
            RowType::smallest_for(cell.width).ok_or_else(|| overflow(RowType::U32))?
        }
        RowPolicy::Exact(row_type) if cell.width > row_type.bits() => {
            return Err(overflow(row_type));
        }
        RowPolicy::Exact(row_type) => row_type,
    };

    let glyphs = scanned
        .samples
        .iter()
        .map(|sample| pack_glyph(sample, cell))
        .collect();

    Ok(PackedFont {
        chset: scanned.chset,
        cell,
        row_type,
        glyphs,
    })
}
