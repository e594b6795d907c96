//! Persisted configuration
//!
//! The configuration selects which info categories the basic view
//! rotates through, whether it scrolls or alternates, and the LED
//! intensity. It is read from storage each time the basic view starts.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::values::UsageKind;

/// Highest brightness level accepted by the matrix
pub const MAX_BRIGHTNESS: u8 = 3;

/// Device configuration as stored in EEPROM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Show the score in the basic view
    pub use_score: bool,
    /// Show the date in the basic view
    pub use_date: bool,
    /// Show the time in the basic view
    pub use_time: bool,
    /// Show the temperature in the basic view
    pub use_temperature: bool,
    /// Scroll between infos instead of alternating
    pub scroll: bool,
    /// LED intensity (0-3)
    pub brightness: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            use_score: true,
            use_date: false,
            use_time: false,
            use_temperature: false,
            scroll: true,
            brightness: 1,
        }
    }
}

impl Config {
    /// Read the flag for one usage category
    pub fn usage(&self, kind: UsageKind) -> bool {
        match kind {
            UsageKind::Score => self.use_score,
            UsageKind::Date => self.use_date,
            UsageKind::Time => self.use_time,
            UsageKind::Temperature => self.use_temperature,
            UsageKind::Scroll => self.scroll,
        }
    }

    /// Update the flag for one usage category
    pub fn set_usage(&mut self, kind: UsageKind, enabled: bool) {
        match kind {
            UsageKind::Score => self.use_score = enabled,
            UsageKind::Date => self.use_date = enabled,
            UsageKind::Time => self.use_time = enabled,
            UsageKind::Temperature => self.use_temperature = enabled,
            UsageKind::Scroll => self.scroll = enabled,
        }
    }

    /// Brightness clamped to the supported range
    pub fn brightness(&self) -> u8 {
        self.brightness.min(MAX_BRIGHTNESS)
    }
}
