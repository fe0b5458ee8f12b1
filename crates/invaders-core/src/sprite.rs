//! Alpha-channeled sprite buffers — the substrate for pixel collision.
//!
//! A `Sprite` is a rectangular grid of alpha values. "Opaque" means
//! alpha > 0. Bunkers are the only entities that mutate their sprite
//! after construction (struck pixels are cleared to transparent).

use serde::{Deserialize, Serialize};

/// Full alpha for pixels built from mask rows.
pub const OPAQUE: u8 = 255;

/// A rectangular, alpha-channeled pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprite {
    width: u32,
    height: u32,
    /// Row-major alpha channel, `width * height` entries.
    alpha: Vec<u8>,
}

impl Sprite {
    /// Build a sprite from ASCII mask rows: any non-space character is
    /// an opaque pixel. All rows must have the same length.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.chars().count()) as u32;
        let mut alpha = Vec::with_capacity((width * height) as usize);
        for row in rows {
            debug_assert_eq!(row.chars().count() as u32, width, "ragged sprite mask");
            for ch in row.chars() {
                alpha.push(if ch == ' ' { 0 } else { OPAQUE });
            }
        }
        Self {
            width,
            height,
            alpha,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Alpha value at local pixel coordinates. Out-of-range access is a
    /// programming error: callers must clip their iteration range first.
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        debug_assert!(x < self.width && y < self.height, "pixel query out of bounds");
        self.alpha[(y * self.width + x) as usize]
    }

    /// True when the pixel at local coordinates has alpha > 0.
    pub fn is_opaque(&self, x: u32, y: u32) -> bool {
        self.alpha_at(x, y) > 0
    }

    /// Erase the pixel at local coordinates (alpha set to 0).
    pub fn clear_pixel(&mut self, x: u32, y: u32) {
        debug_assert!(x < self.width && y < self.height, "pixel clear out of bounds");
        self.alpha[(y * self.width + x) as usize] = 0;
    }

    /// Count of pixels with alpha > 0.
    pub fn opaque_pixels(&self) -> i32 {
        self.alpha.iter().filter(|&&a| a > 0).count() as i32
    }

    /// Raw alpha channel, row-major.
    pub fn alpha_channel(&self) -> &[u8] {
        &self.alpha
    }
}
