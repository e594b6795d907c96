//! Glyphs: printable characters made of line segments

use heapless::Vec;

use super::framebuffer::Framebuffer;
use super::line::Line;

/// Most segments any font character uses
pub const MAX_GLYPH_LINES: usize = 12;

/// One character in one vector font
///
/// Glyphs are values: the font tables hand out fresh copies, so callers
/// can shift them freely without touching the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    lines: Vec<Line, MAX_GLYPH_LINES>,
}

impl Glyph {
    /// Build a glyph from a segment table
    ///
    /// Segments beyond `MAX_GLYPH_LINES` are dropped; no font table
    /// comes close to the limit.
    pub fn from_lines(lines: &[Line]) -> Self {
        let mut glyph = Self { lines: Vec::new() };
        for line in lines {
            if glyph.lines.push(*line).is_err() {
                break;
            }
        }
        glyph
    }

    /// Translate every segment horizontally, in place
    pub fn shift(&mut self, dx: i16) {
        for line in self.lines.iter_mut() {
            line.shift(dx);
        }
    }

    /// Consuming variant of [`Glyph::shift`]
    pub fn shifted(mut self, dx: i16) -> Self {
        self.shift(dx);
        self
    }

    /// Draw all segments unconditionally
    pub fn render(&self, fb: &mut Framebuffer) {
        for line in &self.lines {
            line.render(fb);
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::Font;

    #[test]
    fn test_clone_is_independent() {
        let original = Font::BigDigit.digit(0).unwrap();
        let mut copy = original.clone();
        copy.shift(5);

        assert_eq!(original, Font::BigDigit.digit(0).unwrap());
        assert_ne!(original, copy);
        assert_eq!(copy.lines()[0].x, original.lines()[0].x + 5);
    }

    #[test]
    fn test_shift_then_render_matches_offset_render() {
        let mut a = Framebuffer::new();
        let mut b = Framebuffer::new();

        Font::MediumDigit.digit(8).unwrap().shifted(10).render(&mut a);
        for line in Font::MediumDigit.digit(8).unwrap().lines() {
            let mut moved = *line;
            moved.shift(10);
            moved.render(&mut b);
        }

        assert_eq!(a, b);
        assert!(a.lit() > 0);
    }

    #[test]
    fn test_from_lines_caps_capacity() {
        let lines = [Line::horizontal(0, 0, 1); MAX_GLYPH_LINES + 3];
        assert_eq!(Glyph::from_lines(&lines).lines().len(), MAX_GLYPH_LINES);
    }
}
