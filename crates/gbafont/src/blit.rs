//! # Drawing packed glyphs
//!
//! This is the same routine that the generated header carries as
//! `draw_char_<name>`, so the table can be checked without a C compiler.

use crate::pack::PackedFont;

/// A 16-bit pixel buffer, like the GBA mode 3 frame buffer
pub struct Surface<'a> {
    /// The pixels, row by row
    pub pixels: &'a mut [u16],
    /// The number of pixels per row
    pub width: usize,
    /// The number of rows that may be drawn to
    pub lines: usize,
}

impl<'a> Surface<'a> {
    /// Create a surface over `pixels`, using all complete rows
    pub fn new(pixels: &'a mut [u16], width: usize) -> Self {
        let lines = pixels.len().checked_div(width).unwrap_or(0);
        Self {
            pixels,
            width,
            lines,
        }
    }

    /// Limit the number of rows that may be drawn to
    pub fn with_lines(mut self, lines: usize) -> Self {
        self.lines = lines;
        self
    }

    fn put(&mut self, x: i64, y: i64, color: u16) {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return;
        };
        if x >= self.width || y >= self.lines {
            return;
        }
        if let Some(pixel) = self.pixels.get_mut(y * self.width + x) {
            *pixel = color;
        }
    }
}

/// Draw the glyph for `code` with its top left corner at (`x`, `y`)
///
/// Codes outside of the character set draw the fallback glyph (the space)
/// instead. Pixels outside of the surface are skipped.
pub fn draw_char(
    font: &PackedFont,
    surface: &mut Surface<'_>,
    x: i32,
    y: i32,
    code: u8,
    color: u16,
) {
    let code = match font.chset.contains(code) {
        true => code,
        false => font.chset.fallback_code(),
    };
    let Some(glyph) = font.glyph(code) else {
        return;
    };
    let width = font.cell.width;
    for (row, bits) in glyph.rows.iter().copied().enumerate() {
        for col in 0..width {
            if (bits >> (width - 1 - col)) & 1 == 0 {
                continue;
            }
            let px = i64::from(x) + i64::from(col);
            let py = i64::from(y) + row as i64;
            surface.put(px, py, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{draw_char, Surface};
    use crate::{
        chset::{scan, CharacterSet},
        pack::{pack, PackedFont, RowPolicy},
        testing::{ArtFont, BlockFont},
    };

    const INK: u16 = 0x7FFF;

    fn art_font() -> PackedFont {
        let font = ArtFont::new()
            .with(b' ', 0, 0, &["#..#"])
            .with(b'A', 3, 7, &[".##.", "#..#", "####", "#..#"])
            .with(b'Z', 1, 1, &["####", "..#.", ".#..", "####"]);
        let scanned = scan(&font, 8, CharacterSet::UPPERCASE).unwrap();
        pack(&scanned, RowPolicy::Auto).unwrap()
    }

    fn render(font: &PackedFont, x: i32, y: i32, code: u8) -> Vec<u16> {
        let mut pixels = vec![0u16; 8 * 6];
        let mut surface = Surface::new(&mut pixels, 8);
        draw_char(font, &mut surface, x, y, code, INK);
        pixels
    }

    #[test]
    fn test_round_trip() {
        let scanned = scan(&BlockFont, 10, CharacterSet::UPPERCASE).unwrap();
        let font = pack(&scanned, RowPolicy::Auto).unwrap();
        let (w, h) = (font.cell.width as usize, font.cell.height as usize);
        for sample in &scanned.samples {
            let mut pixels = vec![0u16; w * h];
            let mut surface = Surface::new(&mut pixels, w);
            draw_char(&font, &mut surface, 0, 0, sample.code, INK);
            for y in 0..h {
                for x in 0..w {
                    let ink = sample
                        .canvas
                        .ink_at(sample.bbox.x0 + x as u32, sample.bbox.y0 + y as u32);
                    let drawn = pixels[y * w + x] == INK;
                    assert_eq!(drawn, ink, "{} at {},{}", sample.code, x, y);
                }
            }
        }
    }

    #[test]
    fn test_fallback() {
        let font = art_font();
        let space = render(&font, 1, 1, b' ');
        assert!(space.contains(&INK));
        assert_eq!(render(&font, 1, 1, 31), space);
        assert_eq!(render(&font, 1, 1, b'Z' + 1), space);
        assert_eq!(render(&font, 1, 1, 200), space);
        assert_ne!(render(&font, 1, 1, b'Z'), space);

        let scanned = scan(
            &ArtFont::new().with(b'0', 0, 0, &["#"]),
            8,
            CharacterSet::range(b'0', b'9').unwrap(),
        )
        .unwrap();
        let digits = pack(&scanned, RowPolicy::Auto).unwrap();
        assert_eq!(render(&digits, 0, 0, b'A'), render(&digits, 0, 0, b'0'));
    }

    #[test]
    fn test_clipping() {
        let font = art_font();
        let full = render(&font, 2, 1, b'A');
        assert_eq!(full.iter().filter(|&&p| p == INK).count(), 10);

        // partially off the left and top edge
        let clipped = render(&font, -1, -1, b'A');
        assert_eq!(clipped.iter().filter(|&&p| p == INK).count(), 5);
        assert_eq!(clipped[0], 0);
        assert_eq!(clipped[2], INK);
        assert_eq!(clipped[8], INK);

        // partially off the right and bottom edge, nothing wraps around
        let clipped = render(&font, 6, 4, b'A');
        assert_eq!(clipped.iter().filter(|&&p| p == INK).count(), 2);
        assert_eq!(clipped[4 * 8 + 7], INK);
        assert_eq!(clipped[5 * 8 + 6], INK);

        // completely outside
        assert!(!render(&font, 100, -100, b'A').contains(&INK));
    }

    #[test]
    fn test_line_limit() {
        let font = art_font();
        let mut pixels = vec![0u16; 8 * 6];
        let mut surface = Surface::new(&mut pixels, 8).with_lines(2);
        draw_char(&font, &mut surface, 0, 0, b'A', INK);
        assert_eq!(pixels.iter().filter(|&&p| p == INK).count(), 4);
        assert!(pixels[16..].iter().all(|&p| p == 0));
    }
}
