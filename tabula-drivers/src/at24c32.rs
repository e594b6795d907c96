//! AT24C32 EEPROM (configuration and last score)
//!
//! The 4 KiB EEPROM on the DS3231 breakout board. Memory addresses are
//! 16-bit big-endian and follow the device address on every access.
//! After a write the chip runs an internal cycle during which it does
//! not acknowledge. The driver never sleeps: it reports the cycle once
//! through [`Storage::take_write_cycle`] so the caller can wait it out
//! with the bus lock released, and acknowledge-polls the chip before
//! the next access in case that access comes early.
//!
//! # Layout
//!
//! | Address | Content |
//! |---------|---------|
//! | 0x000   | Packed configuration byte |
//! | 0x00A   | Left score |
//! | 0x00B   | Right score |

use embedded_hal::i2c::I2c;
use heapless::Vec;
use tabula_core::config::{Config, MAX_BRIGHTNESS};
use tabula_core::traits::{Storage, StorageError};
use tabula_core::values::{Points, MAX_SCORE};

/// Default 7-bit bus address (A0-A2 pulled high on the breakout)
pub const ADDRESS: u8 = 0x57;

/// Packed configuration byte
pub const CONFIG_ADDR: u16 = 0x000;

/// Left score byte; the right score follows
pub const LAST_SCORE_ADDR: u16 = 0x00A;

/// Internal write cycle time
pub const WRITE_CYCLE_MS: u32 = 20;

/// Address polls tried before giving up on a busy chip
pub const READY_POLLS: u8 = 200;

/// Configuration byte fields
pub mod cfg {
    pub const SCROLL: u8 = 0x01;
    pub const USE_TIME: u8 = 0x02;
    pub const USE_DATE: u8 = 0x04;
    pub const USE_TEMPERATURE: u8 = 0x08;
    pub const USE_SCORE: u8 = 0x10;
    pub const BRIGHTNESS_SHIFT: u8 = 6;
    pub const BRIGHTNESS_MASK: u8 = 0x03;
}

/// Unpack the configuration byte
pub fn decode_config(byte: u8) -> Config {
    Config {
        use_score: byte & cfg::USE_SCORE != 0,
        use_date: byte & cfg::USE_DATE != 0,
        use_time: byte & cfg::USE_TIME != 0,
        use_temperature: byte & cfg::USE_TEMPERATURE != 0,
        scroll: byte & cfg::SCROLL != 0,
        brightness: (byte >> cfg::BRIGHTNESS_SHIFT) & cfg::BRIGHTNESS_MASK,
    }
}

/// Pack a configuration into one byte
pub fn encode_config(config: &Config) -> u8 {
    let mut byte = 0;
    if config.scroll {
        byte |= cfg::SCROLL;
    }
    if config.use_time {
        byte |= cfg::USE_TIME;
    }
    if config.use_date {
        byte |= cfg::USE_DATE;
    }
    if config.use_temperature {
        byte |= cfg::USE_TEMPERATURE;
    }
    if config.use_score {
        byte |= cfg::USE_SCORE;
    }
    byte | (config.brightness.min(MAX_BRIGHTNESS) << cfg::BRIGHTNESS_SHIFT)
}

/// Erased cells read 0xFF; anything past the score range counts as zero
fn decode_score(byte: u8) -> u8 {
    if byte > MAX_SCORE {
        0
    } else {
        byte
    }
}

/// AT24C32 on a shared I2C bus
pub struct At24c32<I2C> {
    i2c: I2C,
    /// A write cycle may still be running
    busy: bool,
    /// The last write's cycle has not been reported to the caller
    cycle_owed: bool,
}

impl<I2C: I2c> At24c32<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            busy: false,
            cycle_owed: false,
        }
    }

    /// Give the bus handle back
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Poll the chip until it acknowledges again after a write
    fn wait_ready(&mut self) -> Result<(), StorageError> {
        if !self.busy {
            return Ok(());
        }
        for _ in 0..READY_POLLS {
            if self.i2c.write(ADDRESS, &CONFIG_ADDR.to_be_bytes()).is_ok() {
                self.busy = false;
                return Ok(());
            }
        }
        Err(StorageError::Busy)
    }

    fn read_bytes(&mut self, addr: u16, buf: &mut [u8]) -> Result<(), StorageError> {
        self.wait_ready()?;
        self.i2c
            .write_read(ADDRESS, &addr.to_be_bytes(), buf)
            .map_err(|_| StorageError::Bus)
    }

    fn write_bytes<const N: usize>(&mut self, addr: u16, data: [u8; N]) -> Result<(), StorageError> {
        self.wait_ready()?;
        let mut frame = Vec::<u8, 8>::new();
        frame
            .extend_from_slice(&addr.to_be_bytes())
            .map_err(|_| StorageError::Bus)?;
        frame
            .extend_from_slice(&data)
            .map_err(|_| StorageError::Bus)?;
        self.i2c
            .write(ADDRESS, &frame)
            .map_err(|_| StorageError::Bus)?;
        self.busy = true;
        self.cycle_owed = true;
        Ok(())
    }
}

impl<I2C: I2c> Storage for At24c32<I2C> {
    fn read_config(&mut self) -> Result<Config, StorageError> {
        let mut byte = [0u8; 1];
        self.read_bytes(CONFIG_ADDR, &mut byte)?;
        Ok(decode_config(byte[0]))
    }

    fn write_config(&mut self, config: &Config) -> Result<(), StorageError> {
        self.write_bytes(CONFIG_ADDR, [encode_config(config)])
    }

    fn read_last_score(&mut self) -> Result<Points, StorageError> {
        let mut bytes = [0u8; 2];
        self.read_bytes(LAST_SCORE_ADDR, &mut bytes)?;
        Ok(Points::new(decode_score(bytes[0]), decode_score(bytes[1])))
    }

    fn write_last_score(&mut self, points: Points) -> Result<(), StorageError> {
        self.write_bytes(
            LAST_SCORE_ADDR,
            [points.left.min(MAX_SCORE), points.right.min(MAX_SCORE)],
        )
    }

    fn take_write_cycle(&mut self) -> Option<u32> {
        core::mem::take(&mut self.cycle_owed).then_some(WRITE_CYCLE_MS)
    }
}
