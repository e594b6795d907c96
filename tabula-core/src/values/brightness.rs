//! LED intensity setting

use crate::config::MAX_BRIGHTNESS;
use crate::display::Display;
use crate::graphics::{Font, Framebuffer};
use crate::render::Renderable;
use crate::traits::{DisplayError, MatrixDriver, Storage, StorageError};

/// Brightness level (0-3) with a pending-change flag
///
/// The settings view polls [`Brightness::take_changed`] and only then
/// touches the driver and redraws.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Brightness {
    level: u8,
    changed: bool,
}

impl Brightness {
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(MAX_BRIGHTNESS),
            changed: false,
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn incr(&mut self) {
        self.set(self.level.saturating_add(1));
    }

    pub fn decr(&mut self) {
        self.set(self.level.saturating_sub(1));
    }

    pub fn set(&mut self, level: u8) {
        self.level = level.min(MAX_BRIGHTNESS);
    }

    /// Request a driver update and redraw
    pub fn mark_changed(&mut self) {
        self.changed = true;
    }

    pub fn take_changed(&mut self) -> bool {
        core::mem::take(&mut self.changed)
    }

    pub fn apply<D: MatrixDriver>(&self, display: &mut Display<D>) -> Result<(), DisplayError> {
        display.set_brightness(self.level)
    }

    /// Store the level in the persisted config
    pub fn save<S: Storage>(&self, storage: &mut S) -> Result<(), StorageError> {
        let mut config = storage.read_config()?;
        config.brightness = self.level;
        storage.write_config(&config)
    }
}

impl Renderable for Brightness {
    fn draw(&self, fb: &mut Framebuffer, x: i16) {
        let glyphs = [
            Font::Medium.glyph('J'),
            Font::Medium.glyph('A'),
            Font::Medium.glyph('S'),
            Font::Medium.digit(self.level),
        ];
        for (glyph, offset) in glyphs.into_iter().zip([0, 8, 16, 24]) {
            if let Some(glyph) = glyph {
                glyph.shifted(x + offset).render(fb);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeMatrix, FakeStorage};

    #[test]
    fn test_clamps() {
        let mut brightness = Brightness::new(7);
        assert_eq!(brightness.level(), 3);
        brightness.incr();
        assert_eq!(brightness.level(), 3);
        brightness.set(0);
        brightness.decr();
        assert_eq!(brightness.level(), 0);
    }

    #[test]
    fn test_changed_flag_is_consumed() {
        let mut brightness = Brightness::new(1);
        assert!(!brightness.take_changed());
        brightness.mark_changed();
        assert!(brightness.take_changed());
        assert!(!brightness.take_changed());
    }

    #[test]
    fn test_apply_and_save() {
        let mut display = Display::new(FakeMatrix::new());
        let mut storage = FakeStorage::new();
        let brightness = Brightness::new(2);

        brightness.apply(&mut display).unwrap();
        brightness.save(&mut storage).unwrap();

        assert_eq!(display.driver().brightness, 2);
        assert_eq!(storage.config.brightness, 2);
        assert!(storage.config.use_score);
    }

    #[test]
    fn test_level_digit_drawn_last() {
        let mut fb = Framebuffer::new();
        Brightness::new(1).draw(&mut fb, 0);
        // medium "1" sits in columns 3-4 of its cell
        assert!(fb.get(27, 5) && fb.get(28, 5));
        assert!(!fb.get(24, 5));
    }
}
