//! Line segments, the building block of the vector fonts

use super::framebuffer::Framebuffer;

/// Direction a line grows from its start point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
    /// Grows to the right
    Horizontal,
    /// Grows downwards
    Vertical,
}

/// A straight horizontal or vertical run of lit pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Line {
    pub x: i16,
    pub y: i16,
    pub len: u8,
    pub orientation: Orientation,
}

impl Line {
    pub const fn horizontal(x: i16, y: i16, len: u8) -> Self {
        Self {
            x,
            y,
            len,
            orientation: Orientation::Horizontal,
        }
    }

    pub const fn vertical(x: i16, y: i16, len: u8) -> Self {
        Self {
            x,
            y,
            len,
            orientation: Orientation::Vertical,
        }
    }

    /// Move the line horizontally
    pub fn shift(&mut self, dx: i16) {
        self.x = self.x.saturating_add(dx);
    }

    /// Light the line's pixels
    pub fn render(&self, fb: &mut Framebuffer) {
        match self.orientation {
            Orientation::Horizontal => fb.hline(self.x, self.y, self.len as i16, true),
            Orientation::Vertical => fb.vline(self.x, self.y, self.len as i16, true),
        }
    }
}
