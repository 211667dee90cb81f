//! # Character sets and the uniform cell

use std::{fmt, ops::Range, str::FromStr};

use displaydoc::Display;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    error::{DegenerateInputError, RasterizationError},
    raster::GlyphSample,
    source::FontSource,
};

/// The space character, first of the printable range
pub const FIRST_PRINTABLE: u8 = 32;
/// The tilde, last of the printable range
pub const LAST_PRINTABLE: u8 = 126;

/// A contiguous range of printable character codes
///
/// The glyph for a code `c` is stored at index `c - first()`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CharacterSet {
    first: u8,
    count: u8,
}

/// Error when creating a character set
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum CharsetError {
    /// Character {0} is outside of the printable range 32-126
    NotPrintable(u8),
    /// Unknown character set {0:?}, expected `uppercase`, `printable` or `FIRST-LAST`
    Unknown(String),
}

impl CharacterSet {
    /// Space, punctuation, digits and uppercase letters (32-90)
    pub const UPPERCASE: Self = Self {
        first: FIRST_PRINTABLE,
        count: 59,
    };

    /// All printable ASCII characters (32-126)
    pub const PRINTABLE: Self = Self {
        first: FIRST_PRINTABLE,
        count: 95,
    };

    /// Create the set `first..=last`
    ///
    /// If `last < first`, the set is empty.
    pub fn range(first: u8, last: u8) -> Result<Self, CharsetError> {
        if !(FIRST_PRINTABLE..=LAST_PRINTABLE).contains(&first) {
            return Err(CharsetError::NotPrintable(first));
        }
        if last < first {
            return Ok(Self { first, count: 0 });
        }
        if last > LAST_PRINTABLE {
            return Err(CharsetError::NotPrintable(last));
        }
        Ok(Self {
            first,
            count: last - first + 1,
        })
    }

    /// The code stored at index 0
    pub fn first(&self) -> u8 {
        self.first
    }

    /// The last code in the set, if any
    pub fn last(&self) -> Option<u8> {
        (self.count > 0).then(|| self.first + self.count - 1)
    }

    /// The number of codes in the set
    pub fn len(&self) -> usize {
        usize::from(self.count)
    }

    /// Whether the set has no codes
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The codes in table order
    pub fn codes(&self) -> impl Iterator<Item = u8> {
        let Range { start, end } = self.span();
        (start..end).map(|c| c as u8)
    }

    fn span(&self) -> Range<u16> {
        let start = u16::from(self.first);
        start..start + u16::from(self.count)
    }

    /// Whether `code` is part of the set
    pub fn contains(&self, code: u8) -> bool {
        self.span().contains(&u16::from(code))
    }

    /// The table index of `code`
    pub fn index_of(&self, code: u8) -> Option<usize> {
        self.contains(code).then(|| usize::from(code - self.first))
    }

    /// The code that is drawn in place of codes outside of the set
    ///
    /// This is the space if it is part of the set and the first code otherwise.
    pub fn fallback_code(&self) -> u8 {
        match self.contains(FIRST_PRINTABLE) {
            true => FIRST_PRINTABLE,
            false => self.first,
        }
    }
}

impl Default for CharacterSet {
    fn default() -> Self {
        Self::UPPERCASE
    }
}

impl FromStr for CharacterSet {
    type Err = CharsetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "uppercase" | "upper" => Ok(Self::UPPERCASE),
            "printable" | "all" => Ok(Self::PRINTABLE),
            other => {
                let unknown = || CharsetError::Unknown(other.to_owned());
                let (first, last) = other.split_once('-').ok_or_else(unknown)?;
                let first = first.trim().parse::<u8>().map_err(|_| unknown())?;
                let last = last.trim().parse::<u8>().map_err(|_| unknown())?;
                Self::range(first, last)
            }
        }
    }
}

impl TryFrom<String> for CharacterSet {
    type Error = CharsetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CharacterSet> for String {
    fn from(value: CharacterSet) -> Self {
        value.to_string()
    }
}

impl fmt::Display for CharacterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::UPPERCASE {
            f.write_str("uppercase")
        } else if *self == Self::PRINTABLE {
            f.write_str("printable")
        } else {
            let last = u16::from(self.first) + u16::from(self.count);
            write!(f, "{}-{}", self.first, last - 1)
        }
    }
}

/// The footprint shared by all glyphs of a set
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct UniformCell {
    /// The number of bits in a row
    pub width: u32,
    /// The number of rows per glyph
    pub height: u32,
}

impl UniformCell {
    /// Whether the cell has no pixels
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for UniformCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// All samples of a character set at one size
#[derive(Debug, Clone)]
pub struct ScannedSet {
    /// The character set
    pub chset: CharacterSet,
    /// The size in pixels per em
    pub size: u32,
    /// One sample per code, in table order
    pub samples: Vec<GlyphSample>,
    /// Per-axis maximum of all bounding boxes
    pub cell: UniformCell,
    /// The first code with the maximum width
    pub widest: Option<u8>,
    /// Glyphs that were replaced by placeholders
    pub failed: Vec<RasterizationError>,
}

impl ScannedSet {
    /// Get the sample for a code
    pub fn sample(&self, code: u8) -> Option<&GlyphSample> {
        self.chset.index_of(code).and_then(|i| self.samples.get(i))
    }
}

/// Rasterize every character of `chset` and find the uniform cell
///
/// A glyph that fails to rasterize is logged and replaced with an empty
/// placeholder, so it never aborts the scan.
pub fn scan<S: FontSource + ?Sized>(
    source: &S,
    size: u32,
    chset: CharacterSet,
) -> Result<ScannedSet, DegenerateInputError> {
    if chset.is_empty() {
        return Err(DegenerateInputError::EmptyCharset);
    }

    let mut samples = Vec::with_capacity(chset.len());
    let mut failed = Vec::new();
    let mut cell = UniformCell::default();
    let mut widest = None;

    for code in chset.codes() {
        let sample = match source.rasterize(code, size) {
            Ok(sample) => sample,
            Err(e) => {
                warn!("{}, using an empty placeholder", e);
                failed.push(e);
                GlyphSample::placeholder(code)
            }
        };
        debug!("CHAR {:03} {:?}: {:?}", code, code as char, sample.bbox);

        let (w, h) = (sample.bbox.width(), sample.bbox.height());
        if w > cell.width {
            cell.width = w;
            widest = Some(code);
        }
        cell.height = cell.height.max(h);
        samples.push(sample);
    }

    Ok(ScannedSet {
        chset,
        size,
        samples,
        cell,
        widest,
        failed,
    })
}

#[cfg(test)]
mod tests {
    use super::{scan, CharacterSet, CharsetError, UniformCell};
    use crate::{
        error::{DegenerateInputError, RasterizationError},
        testing::{ArtFont, BlockFont},
    };

    #[test]
    fn test_presets() {
        assert_eq!(CharacterSet::UPPERCASE.len(), 59);
        assert_eq!(CharacterSet::UPPERCASE.last(), Some(b'Z'));
        assert_eq!(CharacterSet::PRINTABLE.len(), 95);
        assert_eq!(CharacterSet::PRINTABLE.last(), Some(b'~'));
        let codes: Vec<u8> = CharacterSet::UPPERCASE.codes().collect();
        assert_eq!(codes.first(), Some(&32));
        assert_eq!(codes.last(), Some(&90));
        assert!(codes.windows(2).all(|w| w[0] + 1 == w[1]));
    }

    #[test]
    fn test_parse() {
        assert_eq!("all".parse::<CharacterSet>(), Ok(CharacterSet::PRINTABLE));
        assert_eq!(
            "uppercase".parse::<CharacterSet>(),
            Ok(CharacterSet::UPPERCASE)
        );
        let digits: CharacterSet = "48-57".parse().unwrap();
        assert_eq!(digits.first(), 48);
        assert_eq!(digits.len(), 10);
        assert_eq!(digits.to_string(), "48-57");
        assert_eq!(
            "20-40".parse::<CharacterSet>(),
            Err(CharsetError::NotPrintable(20))
        );
        assert_eq!(
            "65-127".parse::<CharacterSet>(),
            Err(CharsetError::NotPrintable(127))
        );
        assert!(matches!(
            "lowercase".parse::<CharacterSet>(),
            Err(CharsetError::Unknown(_))
        ));
        let empty: CharacterSet = "33-32".parse().unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.last(), None);
        assert_eq!(empty.to_string(), "33-32");
    }

    #[test]
    fn test_index_and_fallback() {
        let set = CharacterSet::UPPERCASE;
        assert_eq!(set.index_of(b' '), Some(0));
        assert_eq!(set.index_of(b'A'), Some(33));
        assert_eq!(set.index_of(b'a'), None);
        assert_eq!(set.index_of(31), None);
        assert_eq!(set.fallback_code(), 32);

        let digits = CharacterSet::range(b'0', b'9').unwrap();
        assert_eq!(digits.fallback_code(), b'0');
        assert_eq!(digits.index_of(b'9'), Some(9));
    }

    #[test]
    fn test_scan_axes_are_independent() {
        let font = ArtFont::new()
            .with(b'!', 0, 0, &["#####", "#####"])
            .with(b'"', 4, 2, &["#", "#", "#", "#"]);
        let set = CharacterSet::range(b' ', b'"').unwrap();
        let scanned = scan(&font, 8, set).unwrap();
        assert_eq!(scanned.samples.len(), 3);
        assert_eq!(
            scanned.cell,
            UniformCell {
                width: 5,
                height: 4
            }
        );
        assert_eq!(scanned.widest, Some(b'!'));
        assert_eq!(scanned.sample(b'"').map(|s| s.bbox.x0), Some(4));
        assert!(scanned.failed.is_empty());
    }

    #[test]
    fn test_scan_keeps_going_after_failure() {
        let font = ArtFont::new()
            .with(b'A', 1, 1, &["##", "##"])
            .without(b'B');
        let set = CharacterSet::range(b'A', b'C').unwrap();
        let scanned = scan(&font, 8, set).unwrap();
        let codes: Vec<u8> = scanned.samples.iter().map(|s| s.code).collect();
        assert_eq!(codes, b"ABC");
        assert_eq!(scanned.failed, vec![RasterizationError::MissingGlyph(b'B')]);
        assert!(scanned.samples[1].bbox.is_empty());
    }

    #[test]
    fn test_scan_empty() {
        let set = CharacterSet::range(40, 39).unwrap();
        let err = scan(&BlockFont, 8, set).unwrap_err();
        assert_eq!(err, DegenerateInputError::EmptyCharset);
    }

    #[test]
    fn test_cell_grows_with_size() {
        let mut last = UniformCell::default();
        for size in 4..=16 {
            let cell = scan(&BlockFont, size, CharacterSet::PRINTABLE)
                .unwrap()
                .cell;
            assert!(cell.width >= last.width, "width at {}", size);
            assert!(cell.height >= last.height, "height at {}", size);
            last = cell;
        }
    }
}
