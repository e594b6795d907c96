//! Real-time clock trait

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors that can occur with the real-time clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// I2C transfer failed
    Bus,
    /// Registers held a value outside its calendar range
    InvalidData,
}

/// Calendar record as held by the clock chip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DateTime {
    /// Full year (2000-2099)
    pub year: u16,
    /// Month (1-12)
    pub month: u8,
    /// Day of month (1-31)
    pub day: u8,
    /// Hour (0-23)
    pub hour: u8,
    /// Minute (0-59)
    pub minute: u8,
    /// Second (0-59)
    pub second: u8,
    /// Day of week as stored by the chip (1-7)
    pub weekday: u8,
}

impl Default for DateTime {
    fn default() -> Self {
        Self {
            year: 2000,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
            weekday: 1,
        }
    }
}

/// Trait for the battery-backed real-time clock
pub trait Clock {
    /// Read the current date and time
    fn read(&mut self) -> Result<DateTime, ClockError>;

    /// Write a complete date and time record
    fn write(&mut self, datetime: &DateTime) -> Result<(), ClockError>;

    /// Read the on-chip temperature sensor in degrees Celsius
    fn read_temperature(&mut self) -> Result<f32, ClockError>;
}
