//! On/off flags for the basic view's info categories

use core::fmt::Write;

use heapless::String;

use crate::graphics::Framebuffer;
use crate::render::Renderable;
use crate::traits::{Storage, StorageError};

/// Which category a usage flag controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UsageKind {
    Score,
    Date,
    Time,
    Temperature,
    /// Not a category: scroll vs alternate
    Scroll,
}

impl UsageKind {
    pub fn label(self) -> &'static str {
        match self {
            UsageKind::Score => "SCORE",
            UsageKind::Date => "DATE",
            UsageKind::Time => "TIME",
            UsageKind::Temperature => "TEMP",
            UsageKind::Scroll => "SCROLL",
        }
    }
}

/// Longest label plus " OFF"
pub const MAX_TEXT_LEN: usize = 10;

/// A usage flag being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UsageFlag {
    pub kind: UsageKind,
    pub enabled: bool,
}

impl UsageFlag {
    pub fn new(kind: UsageKind, enabled: bool) -> Self {
        Self { kind, enabled }
    }

    pub fn load<S: Storage>(kind: UsageKind, storage: &mut S) -> Result<Self, StorageError> {
        Ok(Self::new(kind, storage.read_config()?.usage(kind)))
    }

    pub fn save<S: Storage>(&self, storage: &mut S) -> Result<(), StorageError> {
        let mut config = storage.read_config()?;
        config.set_usage(self.kind, self.enabled);
        storage.write_config(&config)
    }

    /// "<LABEL> ON" or "<LABEL> OFF"
    pub fn text(&self) -> String<MAX_TEXT_LEN> {
        let mut text = String::new();
        let state = if self.enabled { "ON" } else { "OFF" };
        let _ = write!(text, "{} {}", self.kind.label(), state);
        text
    }

    /// Length of [`UsageFlag::text`] in characters
    pub fn text_len(&self) -> usize {
        self.kind.label().len() + if self.enabled { 3 } else { 4 }
    }
}

impl Renderable for UsageFlag {
    fn draw(&self, fb: &mut Framebuffer, x: i16) {
        fb.text(&self.text(), x, 4, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeStorage;

    #[test]
    fn test_text() {
        assert_eq!(UsageFlag::new(UsageKind::Scroll, false).text().as_str(), "SCROLL OFF");
        assert_eq!(UsageFlag::new(UsageKind::Temperature, true).text().as_str(), "TEMP ON");
        for kind in [
            UsageKind::Score,
            UsageKind::Date,
            UsageKind::Time,
            UsageKind::Temperature,
            UsageKind::Scroll,
        ] {
            for enabled in [true, false] {
                let flag = UsageFlag::new(kind, enabled);
                assert_eq!(flag.text().len(), flag.text_len());
            }
        }
    }

    #[test]
    fn test_save_touches_only_its_bit() {
        let mut storage = FakeStorage::new();
        let before = storage.config;

        UsageFlag::new(UsageKind::Date, true).save(&mut storage).unwrap();

        assert!(storage.config.use_date);
        assert_eq!(storage.config.use_score, before.use_score);
        assert_eq!(storage.config.scroll, before.scroll);
        assert_eq!(storage.config.brightness, before.brightness);
        assert_eq!(storage.config_writes, 1);
    }

    #[test]
    fn test_load() {
        let mut storage = FakeStorage::new();
        storage.config.use_time = true;
        let flag = UsageFlag::load(UsageKind::Time, &mut storage).unwrap();
        assert!(flag.enabled);
    }

    #[test]
    fn test_drawn_at_row_four() {
        let mut fb = Framebuffer::new();
        UsageFlag::new(UsageKind::Time, true).draw(&mut fb, 0);
        for x in 0..32 {
            for y in (0..4).chain(12..16) {
                assert!(!fb.get(x, y));
            }
        }
        assert!(fb.lit() > 0);
    }
}
