//! # Preview images of a scanned set

use std::fmt;

use image::{GrayImage, Luma};

use crate::{
    chset::{ScannedSet, UniformCell},
    pack::RowType,
};

/// Where the characters go on the preview
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PreviewLayout {
    /// Total width of the image
    pub width: u32,
    /// Characters per line
    pub per_row: u32,
    /// Border around the grid
    pub margin: u32,
    /// Added to the size for the horizontal pitch
    pub spacing: u32,
    /// Added to the size for the vertical pitch
    pub line_gap: u32,
}

impl Default for PreviewLayout {
    fn default() -> Self {
        Self {
            width: 760,
            per_row: 20,
            margin: 10,
            spacing: 4,
            line_gap: 10,
        }
    }
}

/// Draw all samples, as rasterized, onto a white image
pub fn render(scanned: &ScannedSet) -> GrayImage {
    render_with(scanned, PreviewLayout::default())
}

/// Draw all samples with a custom layout
pub fn render_with(scanned: &ScannedSet, layout: PreviewLayout) -> GrayImage {
    let per_row = layout.per_row.max(1);
    let count = scanned.samples.len() as u32;
    let lines = count.div_ceil(per_row);
    let pitch_x = scanned.size + layout.spacing;
    let pitch_y = scanned.size + layout.line_gap;
    let height = lines * pitch_y + 2 * layout.margin;

    let mut image = GrayImage::from_pixel(layout.width, height, Luma([255]));
    for (index, sample) in scanned.samples.iter().enumerate() {
        let index = index as u32;
        let left = layout.margin + (index % per_row) * pitch_x;
        let top = layout.margin + (index / per_row) * pitch_y;
        for (x, y) in sample.canvas.inked() {
            let (px, py) = (left + x, top + y);
            if px < image.width() && py < image.height() {
                image.put_pixel(px, py, Luma([0]));
            }
        }
    }
    image
}

/// The status line shown with a preview
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Summary {
    /// The uniform cell
    pub cell: UniformCell,
    /// The number of characters
    pub count: usize,
    /// The estimated size of the table
    pub bytes: usize,
}

impl Summary {
    /// Summarize a scanned set, assuming the narrowest row type that fits
    pub fn of(scanned: &ScannedSet) -> Self {
        let row_type = RowType::smallest_for(scanned.cell.width).unwrap_or(RowType::U32);
        let count = scanned.samples.len();
        Self {
            cell: scanned.cell,
            count,
            bytes: count * scanned.cell.height as usize * row_type.bytes(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Character size: ~{}x{} pixels | Total characters: {} | Estimated size: ~{} bytes",
            self.cell.width, self.cell.height, self.count, self.bytes
        )
    }
}
