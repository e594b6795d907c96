//! Vector font tables
//!
//! Three fonts are drawn with line segments:
//!
//! - `BigDigit`: digits 0-9, 8 wide and the full 16 rows tall. Used for
//!   scores below 20.
//! - `MediumDigit`: digits 0-9, 6 wide and 14 tall (rows 1-14). Two
//!   big digits would collide at the pitch a 20-99 score needs. Also
//!   used for clock and date digits.
//! - `Medium`: the medium digits plus a degree sign and the letters
//!   A, C, J and S. Its "1" is drawn in columns 3-4 so it sits centred
//!   in an 8-pixel cell. Used for labels and temperature.

use super::glyph::Glyph;
use super::line::Line;

const fn h(x: i16, y: i16, len: u8) -> Line {
    Line::horizontal(x, y, len)
}

const fn v(x: i16, y: i16, len: u8) -> Line {
    Line::vertical(x, y, len)
}

/// Available vector fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    BigDigit,
    MediumDigit,
    Medium,
}

impl Font {
    /// Fresh glyph for a digit value, `None` past 9
    pub fn digit(self, value: u8) -> Option<Glyph> {
        if value > 9 {
            return None;
        }
        self.glyph((b'0' + value) as char)
    }

    /// Fresh glyph for a symbol, `None` if the font lacks it
    pub fn glyph(self, symbol: char) -> Option<Glyph> {
        let lines: &[Line] = match (self, symbol) {
            (Font::BigDigit, '0'..='9') => BIG_DIGITS[symbol as usize - '0' as usize],
            (Font::MediumDigit, '0'..='9') => MEDIUM_DIGITS[symbol as usize - '0' as usize],
            (Font::Medium, '1') => MEDIUM_ONE,
            (Font::Medium, '0'..='9') => MEDIUM_DIGITS[symbol as usize - '0' as usize],
            (Font::Medium, '°') => DEGREE,
            (Font::Medium, 'A') => LETTER_A,
            (Font::Medium, 'C') => LETTER_C,
            (Font::Medium, 'J') => LETTER_J,
            (Font::Medium, 'S') => LETTER_S,
            _ => return None,
        };
        Some(Glyph::from_lines(lines))
    }
}

#[rustfmt::skip]
static BIG_DIGITS: [&[Line]; 10] = [
    &[
        h(1, 0, 6), h(0, 1, 8), h(0, 14, 8), h(1, 15, 6),
        v(0, 1, 14), v(1, 0, 16), v(6, 0, 16), v(7, 1, 14),
    ],
    &[v(0, 0, 16), v(1, 0, 16)],
    &[
        h(0, 0, 8), h(0, 1, 8), h(0, 7, 8), h(0, 8, 8), h(0, 14, 8), h(0, 15, 8),
        v(6, 0, 8), v(7, 0, 8), v(0, 8, 8), v(1, 8, 8),
    ],
    &[
        h(0, 0, 8), h(0, 1, 8), h(0, 7, 8), h(0, 8, 8), h(0, 14, 8), h(0, 15, 8),
        v(6, 0, 16), v(7, 0, 16),
    ],
    &[
        h(0, 7, 8), h(0, 8, 8),
        v(0, 0, 8), v(1, 0, 8), v(6, 0, 16), v(7, 0, 16),
    ],
    &[
        h(0, 0, 8), h(0, 1, 8), h(0, 7, 8), h(0, 8, 8), h(0, 14, 8), h(0, 15, 8),
        v(0, 0, 8), v(1, 0, 8), v(6, 8, 8), v(7, 8, 8),
    ],
    &[
        h(0, 0, 8), h(0, 1, 8), h(0, 7, 8), h(0, 8, 8), h(0, 14, 8), h(0, 15, 8),
        v(0, 0, 16), v(1, 0, 16), v(6, 8, 8), v(7, 8, 8),
    ],
    &[
        h(0, 0, 8), h(0, 1, 8),
        v(6, 0, 16), v(7, 0, 16),
    ],
    &[
        h(0, 0, 8), h(0, 1, 8), h(0, 7, 8), h(0, 8, 8), h(0, 14, 8), h(0, 15, 8),
        v(0, 0, 16), v(1, 0, 16), v(6, 0, 16), v(7, 0, 16),
    ],
    &[
        h(0, 0, 8), h(0, 1, 8), h(0, 7, 8), h(0, 8, 8), h(0, 14, 8), h(0, 15, 8),
        v(0, 0, 8), v(1, 0, 8), v(6, 0, 16), v(7, 0, 16),
    ],
];

#[rustfmt::skip]
static MEDIUM_DIGITS: [&[Line]; 10] = [
    &[
        h(1, 1, 4), h(0, 2, 6), h(0, 13, 6), h(1, 14, 4),
        v(0, 2, 12), v(1, 1, 14), v(4, 1, 14), v(5, 2, 12),
    ],
    &[v(0, 1, 14), v(1, 1, 14)],
    &[
        h(0, 1, 6), h(0, 2, 6), h(0, 7, 6), h(0, 8, 6), h(0, 13, 6), h(0, 14, 6),
        v(4, 1, 7), v(5, 1, 7), v(0, 8, 7), v(1, 8, 7),
    ],
    &[
        h(0, 1, 6), h(0, 2, 6), h(0, 7, 6), h(0, 8, 6), h(0, 13, 6), h(0, 14, 6),
        v(4, 1, 14), v(5, 1, 14),
    ],
    &[
        h(0, 7, 6), h(0, 8, 6),
        v(0, 1, 7), v(1, 1, 7), v(4, 1, 14), v(5, 1, 14),
    ],
    &[
        h(0, 1, 6), h(0, 2, 6), h(0, 7, 6), h(0, 8, 6), h(0, 13, 6), h(0, 14, 6),
        v(0, 1, 8), v(1, 1, 8), v(4, 8, 7), v(5, 8, 7),
    ],
    &[
        h(0, 1, 6), h(0, 2, 6), h(0, 7, 6), h(0, 8, 6), h(0, 13, 6), h(0, 14, 6),
        v(0, 1, 14), v(1, 1, 14), v(4, 8, 7), v(5, 8, 7),
    ],
    &[
        h(0, 1, 6), h(0, 2, 6),
        v(4, 1, 14), v(5, 1, 14),
    ],
    &[
        h(0, 1, 6), h(0, 2, 6), h(0, 7, 6), h(0, 8, 6), h(0, 13, 6), h(0, 14, 6),
        v(0, 1, 14), v(1, 1, 14), v(4, 1, 14), v(5, 1, 14),
    ],
    &[
        h(0, 1, 6), h(0, 2, 6), h(0, 7, 6), h(0, 8, 6), h(0, 13, 6), h(0, 14, 6),
        v(0, 1, 7), v(1, 1, 7), v(4, 1, 14), v(5, 1, 14),
    ],
];

#[rustfmt::skip]
static MEDIUM_ONE: &[Line] = &[v(3, 1, 14), v(4, 1, 14)];

#[rustfmt::skip]
static DEGREE: &[Line] = &[h(4, 1, 3), h(4, 3, 3), v(4, 1, 3), v(6, 1, 3)];

#[rustfmt::skip]
static LETTER_A: &[Line] = &[
    h(2, 1, 4), h(1, 2, 6), h(1, 7, 6), h(1, 8, 6),
    v(1, 2, 13), v(2, 1, 14), v(5, 1, 14), v(6, 2, 13),
];

#[rustfmt::skip]
static LETTER_C: &[Line] = &[
    h(2, 1, 4), h(1, 2, 6), h(1, 13, 6), h(2, 14, 4),
    v(1, 2, 12), v(2, 1, 14),
];

#[rustfmt::skip]
static LETTER_J: &[Line] = &[h(1, 13, 6), h(1, 14, 4), v(5, 1, 14), v(6, 1, 13)];

#[rustfmt::skip]
static LETTER_S: &[Line] = &[
    h(2, 1, 4), h(1, 2, 6), h(1, 7, 5), h(2, 8, 5), h(1, 13, 6), h(2, 14, 4),
    v(1, 2, 6), v(2, 1, 8), v(5, 7, 8), v(6, 8, 6),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::Framebuffer;

    fn bounds(glyph: &Glyph) -> (i16, i16, i16, i16) {
        let mut fb = Framebuffer::new();
        glyph.render(&mut fb);
        let (mut min_x, mut max_x, mut min_y, mut max_y) = (i16::MAX, i16::MIN, i16::MAX, i16::MIN);
        for y in 0..16 {
            for x in 0..32 {
                if fb.get(x, y) {
                    min_x = min_x.min(x);
                    max_x = max_x.max(x);
                    min_y = min_y.min(y);
                    max_y = max_y.max(y);
                }
            }
        }
        (min_x, max_x, min_y, max_y)
    }

    #[test]
    fn test_big_digits_span_full_height() {
        for d in 0..10 {
            let (min_x, max_x, min_y, max_y) = bounds(&Font::BigDigit.digit(d).unwrap());
            assert_eq!((min_y, max_y), (0, 15), "digit {}", d);
            assert_eq!(min_x, 0);
            assert!(max_x <= 7);
        }
    }

    #[test]
    fn test_medium_digits_fit_cell() {
        for d in 0..10 {
            let (min_x, max_x, min_y, max_y) = bounds(&Font::MediumDigit.digit(d).unwrap());
            assert_eq!((min_y, max_y), (1, 14), "digit {}", d);
            assert_eq!(min_x, 0);
            assert!(max_x <= 5);
        }
    }

    #[test]
    fn test_medium_one_is_centred() {
        let (min_x, max_x, _, _) = bounds(&Font::Medium.glyph('1').unwrap());
        assert_eq!((min_x, max_x), (3, 4));

        let (min_x, _, _, _) = bounds(&Font::MediumDigit.glyph('1').unwrap());
        assert_eq!(min_x, 0);
    }

    #[test]
    fn test_missing_symbols() {
        assert!(Font::BigDigit.glyph('A').is_none());
        assert!(Font::Medium.glyph('B').is_none());
        assert!(Font::MediumDigit.digit(10).is_none());
        assert!(Font::Medium.glyph('°').is_some());
    }
}
