//! # Raster/Bitmap glyph samples

use std::fmt;

#[cfg(feature = "image")]
use image::{GrayImage, Luma};

/// Width and height of the canvas every glyph is sampled on
pub const WORKING_SIZE: u32 = 32;

/// A monochrome bitmap that works just like a 1-bit screen
///
/// The width and height are in pixels. Every u8 in the buffer represents 8
/// sequential pixels in a row where 0 is white (no ink) and 1 is black (ink),
/// the most significant bit being the leftmost pixel.
#[derive(Clone, PartialEq, Eq)]
pub struct Canvas {
    bytes_per_line: u32,
    width: u32,
    height: u32,
    buffer: Vec<u8>,
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bbox", &self.bbox())
            .finish()
    }
}

impl Canvas {
    /// Create a new blank canvas with the given dimensions
    pub fn new(width: u32, height: u32) -> Self {
        let bytes_per_line = (width.max(1) - 1) / 8 + 1;
        Canvas {
            bytes_per_line,
            width,
            height,
            buffer: vec![0; (bytes_per_line as usize) * (height as usize)],
        }
    }

    /// Create a blank canvas of [`WORKING_SIZE`]
    pub fn working() -> Self {
        Self::new(WORKING_SIZE, WORKING_SIZE)
    }

    /// The width in B/W pixels
    pub fn bit_width(&self) -> u32 {
        self.width
    }

    /// The height in B/W pixels
    pub fn bit_height(&self) -> u32 {
        self.height
    }

    /// Return the number of bytes per line
    pub fn bytes_per_line(&self) -> u32 {
        self.bytes_per_line
    }

    /// Reset all pixels to "no ink"
    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    /// check whether there is ink at a given coordinate
    ///
    /// Coordinates outside of the canvas never have ink.
    pub fn ink_at(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let xb = x / 8;
        let shift = 7 - x % 8;
        let byte = (y * self.bytes_per_line + xb) as usize;
        ((self.buffer[byte] >> shift) & 1) > 0
    }

    /// Put ink at a given coordinate
    ///
    /// Returns `false` if the coordinate is outside of the canvas.
    pub fn set_ink(&mut self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let xb = x / 8;
        let shift = 7 - x % 8;
        let byte = (y * self.bytes_per_line + xb) as usize;
        self.buffer[byte] |= 1 << shift;
        true
    }

    /// Draw an 8-bit coverage bitmap with its top left corner at (`left`, `top`)
    ///
    /// A pixel gets ink iff its coverage is at least `threshold`. Everything
    /// that falls outside of the canvas is clipped.
    pub fn draw_coverage(
        &mut self,
        left: i32,
        top: i32,
        width: usize,
        coverage: &[u8],
        threshold: u8,
    ) {
        if width == 0 {
            return;
        }
        for (index, value) in coverage.iter().copied().enumerate() {
            if value < threshold {
                continue;
            }
            let x = i64::from(left) + (index % width) as i64;
            let y = i64::from(top) + (index / width) as i64;
            if let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) {
                self.set_ink(x, y);
            }
        }
    }

    /// Get the tight bounding box of all pixels with ink
    pub fn bbox(&self) -> BBox {
        let bpl = self.bytes_per_line as usize;
        let mut bbox: Option<BBox> = None;
        for (y, line) in self.buffer.chunks_exact(bpl).enumerate() {
            let Some(first) = line.iter().position(|&b| b > 0) else {
                continue;
            };
            let last = line.iter().rposition(|&b| b > 0).unwrap_or(first);
            let x0 = first as u32 * 8 + line[first].leading_zeros();
            let x1 = last as u32 * 8 + 8 - line[last].trailing_zeros();
            let y = y as u32;
            bbox = Some(match bbox {
                None => BBox {
                    x0,
                    y0: y,
                    x1,
                    y1: y + 1,
                },
                Some(b) => BBox {
                    x0: b.x0.min(x0),
                    y0: b.y0,
                    x1: b.x1.max(x1),
                    y1: y + 1,
                },
            });
        }
        bbox.unwrap_or_default()
    }

    /// Iterate over all pixels with ink
    pub fn inked(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width)
                .filter(move |&x| self.ink_at(x, y))
                .map(move |x| (x, y))
        })
    }

    /// Turn the canvas into a `GrayImage` from the `image` crate
    #[cfg(feature = "image")]
    pub fn to_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| match self.ink_at(x, y) {
            true => Luma([0]),
            false => Luma([255]),
        })
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = |f: &mut fmt::Formatter<'_>| {
            write!(f, "+")?;
            for _ in 0..self.width {
                write!(f, "-")?;
            }
            writeln!(f, "+")
        };

        border(f)?;
        for y in 0..self.height {
            write!(f, "|")?;
            for x in 0..self.width {
                f.write_str(if self.ink_at(x, y) { "#" } else { " " })?;
            }
            writeln!(f, "|")?;
        }
        border(f)
    }
}

/// A rectangle on a canvas, the upper bounds are exclusive
///
/// An all-zero box is the box of a glyph without ink.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BBox {
    /// Leftmost column with ink
    pub x0: u32,
    /// Topmost row with ink
    pub y0: u32,
    /// One past the rightmost column with ink
    pub x1: u32,
    /// One past the bottom row with ink
    pub y1: u32,
}

impl BBox {
    /// Horizontal extent in pixels
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    /// Vertical extent in pixels
    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }

    /// Whether the box covers no pixels
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// A single character, sampled on the working canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphSample {
    /// The character code
    pub code: u8,
    /// The glyph as drawn at the canvas origin
    pub canvas: Canvas,
    /// The tight bounding box of [`GlyphSample::canvas`]
    pub bbox: BBox,
}

impl GlyphSample {
    /// Create a sample from a canvas, computing its bounding box
    pub fn new(code: u8, canvas: Canvas) -> Self {
        let bbox = canvas.bbox();
        Self { code, canvas, bbox }
    }

    /// A sample without ink, used in place of glyphs that failed to rasterize
    pub fn placeholder(code: u8) -> Self {
        Self {
            code,
            canvas: Canvas::working(),
            bbox: BBox::default(),
        }
    }
}
