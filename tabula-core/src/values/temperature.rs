//! Ambient temperature readout

use crate::graphics::{Font, Framebuffer};
use crate::render::{draw_two_digits, Renderable};
use crate::traits::{Clock, ClockError};

/// Whole degrees Celsius, clamped to what two digits can show
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Temperature {
    celsius: u8,
}

impl Temperature {
    pub const MAX: u8 = 99;

    /// Round half up and clamp into 0-99 (NaN reads as 0)
    pub fn from_celsius(celsius: f32) -> Self {
        let rounded = celsius + 0.5;
        let value = if rounded.is_nan() || rounded < 0.0 {
            0
        } else if rounded >= f32::from(Self::MAX) {
            Self::MAX
        } else {
            rounded as u8
        };
        Self { celsius: value }
    }

    /// Read the RTC's die temperature sensor
    pub fn pull<C: Clock>(clock: &mut C) -> Result<Self, ClockError> {
        Ok(Self::from_celsius(clock.read_temperature()?))
    }

    pub fn celsius(&self) -> u8 {
        self.celsius
    }
}

impl Renderable for Temperature {
    fn draw(&self, fb: &mut Framebuffer, x: i16) {
        draw_two_digits(fb, self.celsius, x);
        for (symbol, offset) in [('°', 16), ('C', 24)] {
            if let Some(glyph) = Font::Medium.glyph(symbol) {
                glyph.shifted(x + offset).render(fb);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rounding() {
        assert_eq!(Temperature::from_celsius(21.25).celsius(), 21);
        assert_eq!(Temperature::from_celsius(21.5).celsius(), 22);
        assert_eq!(Temperature::from_celsius(-3.0).celsius(), 0);
        assert_eq!(Temperature::from_celsius(120.0).celsius(), 99);
        assert_eq!(Temperature::from_celsius(f32::NAN).celsius(), 0);
    }

    #[test]
    fn test_degree_sign_position() {
        let mut fb = Framebuffer::new();
        Temperature::from_celsius(20.0).draw(&mut fb, 0);
        // degree ring starts at column 16 + 4
        assert!(fb.get(20, 1));
        assert!(fb.get(22, 3));
        assert!(!fb.get(19, 1));
    }

    proptest! {
        #[test]
        fn prop_always_two_digits(c in -100.0f32..200.0) {
            prop_assert!(Temperature::from_celsius(c).celsius() <= 99);
        }
    }
}
