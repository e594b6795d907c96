//! Monochrome framebuffer for the cascaded matrix
//!
//! Pixels are packed MONO_HLSB: row-major, 8 pixels per byte, the most
//! significant bit being the leftmost pixel. With a 32-pixel row this
//! puts byte `row * 4 + tile` of the top half on one 8x8 tile, which is
//! exactly the order the matrix driver shifts out.

use super::text;

/// Display width in pixels (4 tiles)
pub const WIDTH: i16 = 32;

/// Display height in pixels (2 tiles)
pub const HEIGHT: i16 = 16;

/// Packed frame size in bytes
pub const FRAME_BYTES: usize = (WIDTH as usize * HEIGHT as usize) / 8;

const BYTES_PER_ROW: usize = WIDTH as usize / 8;

/// In-memory mirror of the LED tiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    buf: [u8; FRAME_BYTES],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    /// Create a blank framebuffer
    pub const fn new() -> Self {
        Self {
            buf: [0; FRAME_BYTES],
        }
    }

    /// Rebuild from a packed frame
    pub const fn from_bytes(buf: [u8; FRAME_BYTES]) -> Self {
        Self { buf }
    }

    /// Packed frame for the driver
    pub fn as_bytes(&self) -> &[u8; FRAME_BYTES] {
        &self.buf
    }

    fn locate(x: i16, y: i16) -> Option<(usize, u8)> {
        if !(0..WIDTH).contains(&x) || !(0..HEIGHT).contains(&y) {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some((y * BYTES_PER_ROW + x / 8, 0x80 >> (x % 8)))
    }

    /// Set or clear one pixel; off-canvas coordinates are clipped
    pub fn pixel(&mut self, x: i16, y: i16, on: bool) {
        if let Some((idx, mask)) = Self::locate(x, y) {
            if on {
                self.buf[idx] |= mask;
            } else {
                self.buf[idx] &= !mask;
            }
        }
    }

    /// Read one pixel; off-canvas reads as dark
    pub fn get(&self, x: i16, y: i16) -> bool {
        Self::locate(x, y).is_some_and(|(idx, mask)| self.buf[idx] & mask != 0)
    }

    /// Horizontal run of `len` pixels growing to the right
    pub fn hline(&mut self, x: i16, y: i16, len: i16, on: bool) {
        for dx in 0..len.max(0) {
            self.pixel(x.saturating_add(dx), y, on);
        }
    }

    /// Vertical run of `len` pixels growing downwards
    pub fn vline(&mut self, x: i16, y: i16, len: i16, on: bool) {
        for dy in 0..len.max(0) {
            self.pixel(x, y.saturating_add(dy), on);
        }
    }

    /// Set every pixel to the same state
    pub fn fill(&mut self, on: bool) {
        self.buf.fill(if on { 0xFF } else { 0x00 });
    }

    /// Set a rectangle of pixels to the same state
    pub fn fill_rect(&mut self, x: i16, y: i16, w: i16, h: i16, on: bool) {
        for dy in 0..h.max(0) {
            self.hline(x, y.saturating_add(dy), w, on);
        }
    }

    /// Draw 8x8 bitmap text; only lit glyph pixels are touched
    pub fn text(&mut self, s: &str, x: i16, y: i16, on: bool) {
        let mut cx = x;
        for ch in s.chars() {
            let rows = text::bitmap(ch);
            for (dy, bits) in rows.iter().enumerate() {
                for dx in 0..8 {
                    if bits & (0x80 >> dx) != 0 {
                        self.pixel(cx + dx as i16, y + dy as i16, on);
                    }
                }
            }
            cx = cx.saturating_add(text::CHAR_WIDTH);
        }
    }

    /// Number of lit pixels
    pub fn lit(&self) -> u32 {
        self.buf.iter().map(|b| b.count_ones()).sum()
    }
}
