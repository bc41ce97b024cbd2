//! In-memory RGB raster with rectangle and bitmap-text drawing.

use super::font::{self, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::error::ExportError;

/// Upper bound on raster area; a larger surface is refused instead of
/// allocating.
pub const MAX_PIXELS: u64 = 80_000_000;

pub type Rgb = [u8; 3];

pub const WHITE: Rgb = [0xFF, 0xFF, 0xFF];
pub const BLACK: Rgb = [0x1A, 0x1A, 0x1A];
pub const GREY: Rgb = [0x66, 0x66, 0x66];
pub const RULE: Rgb = [0xCC, 0xCC, 0xCC];
pub const ACCENT: Rgb = [0x1F, 0x4E, 0x79];
pub const BAND: Rgb = [0xE8, 0xEF, 0xF6];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Raster {
    /// A `width` x `height` raster filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgb) -> Result<Self, ExportError> {
        let area = u64::from(width) * u64::from(height);
        if area > MAX_PIXELS {
            return Err(ExportError::RasterTooLarge {
                width: u64::from(width),
                height: u64::from(height),
            });
        }
        let mut pixels = Vec::with_capacity(area as usize * 3);
        for _ in 0..area {
            pixels.extend_from_slice(&background);
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major RGB bytes, top row first.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[cfg(test)]
    pub(crate) fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 3;
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]])
    }

    /// Fill a rectangle, clipped to the raster.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for row in y.min(y_end)..y_end {
            let start = (row as usize * self.width as usize + x as usize) * 3;
            let end = (row as usize * self.width as usize + x_end as usize) * 3;
            if start >= end {
                continue;
            }
            for px in self.pixels[start..end].chunks_exact_mut(3) {
                px.copy_from_slice(&color);
            }
        }
    }

    /// Draw `text` with its top-left corner at (`x`, `y`). Each font dot is a
    /// `dot` x `dot` square. Returns the x position after the last glyph.
    pub fn draw_text(&mut self, x: u32, y: u32, text: &str, dot: u32, color: Rgb) -> u32 {
        let advance = (GLYPH_WIDTH + 1) * dot;
        let mut cursor = x;
        for c in text.chars() {
            let columns = font::glyph(c);
            for (col, bits) in columns.iter().enumerate() {
                for row in 0..GLYPH_HEIGHT {
                    if bits >> row & 1 == 1 {
                        self.fill_rect(
                            cursor + col as u32 * dot,
                            y + row * dot,
                            dot,
                            dot,
                            color,
                        );
                    }
                }
            }
            cursor = cursor.saturating_add(advance);
        }
        cursor
    }
}
