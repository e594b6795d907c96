//! MAX7219 cascaded LED matrix driver
//!
//! Eight MAX7219 chips are daisy-chained on one SPI bus and arranged as
//! a 4x2 grid of 8x8 tiles. Each chip takes a 16-bit word (register
//! address, then data); words shift through the chain while chip-select
//! is low and latch on its rising edge. One transaction therefore
//! carries exactly one word per chip.
//!
//! # Chain Order
//!
//! The first word shifted out ends up in the last chip of the chain.
//! Within a row transaction the top half of the frame goes first, so
//! the four bottom tiles sit closest to the MCU.

use embedded_hal::spi::SpiDevice;
use tabula_core::config::MAX_BRIGHTNESS;
use tabula_core::graphics::FRAME_BYTES;
use tabula_core::traits::{DisplayError, MatrixDriver};

/// MAX7219 register addresses
pub mod reg {
    /// No-op (pads a word for chips that should keep their state)
    pub const NOOP: u8 = 0x00;
    /// First digit row; rows 1-7 follow consecutively
    pub const ROW0: u8 = 0x01;
    /// BCD decode per digit
    pub const DECODE_MODE: u8 = 0x09;
    /// LED intensity (PWM duty)
    pub const INTENSITY: u8 = 0x0A;
    /// Number of scanned digits minus one
    pub const SCAN_LIMIT: u8 = 0x0B;
    /// Shutdown control (0 = shutdown, 1 = normal)
    pub const SHUTDOWN: u8 = 0x0C;
    /// Display test (all LEDs on)
    pub const DISPLAY_TEST: u8 = 0x0F;
}

const SHUTDOWN_MODE_ON: u8 = 0x00;
const SHUTDOWN_MODE_OFF: u8 = 0x01;
const DISPLAY_TEST_OFF: u8 = 0x00;
const SCAN_ALL_ROWS: u8 = 0x07;
const NO_DECODE: u8 = 0x00;

/// Chips in the chain
pub const CHIPS: usize = 8;

/// Tiles per horizontal row of the grid
pub const TILES_PER_ROW: usize = 4;

/// Rows scanned by each chip
pub const ROWS: usize = 8;

const BOTTOM_HALF_OFFSET: usize = TILES_PER_ROW * ROWS;

/// One word per chip
pub type ChainWords = [u8; CHIPS * 2];

/// Build the transaction that writes the same register on every chip
pub fn broadcast_words(register: u8, data: u8) -> ChainWords {
    let mut words = [0u8; CHIPS * 2];
    for word in words.chunks_exact_mut(2) {
        word[0] = register;
        word[1] = data;
    }
    words
}

/// Build the transaction that latches digit row `row` of a packed frame
///
/// The first four words carry the top-half tiles, the last four the
/// bottom-half tiles, both left to right.
pub fn row_words(frame: &[u8; FRAME_BYTES], row: usize) -> ChainWords {
    let register = reg::ROW0 + row as u8;
    let mut words = [0u8; CHIPS * 2];
    for (i, word) in words.chunks_exact_mut(2).enumerate() {
        let tile = i % TILES_PER_ROW;
        let half = if i < TILES_PER_ROW { 0 } else { BOTTOM_HALF_OFFSET };
        word[0] = register;
        word[1] = frame[half + row * TILES_PER_ROW + tile];
    }
    words
}

/// Driver for the cascaded MAX7219 chain
pub struct Max7219<SPI> {
    spi: SPI,
}

impl<SPI: SpiDevice> Max7219<SPI> {
    /// Wrap an SPI device; chip-select is handled by the device
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Give the SPI device back
    pub fn release(self) -> SPI {
        self.spi
    }

    fn broadcast(&mut self, register: u8, data: u8) -> Result<(), DisplayError> {
        self.spi
            .write(&broadcast_words(register, data))
            .map_err(|_| DisplayError::Bus)
    }
}

impl<SPI: SpiDevice> MatrixDriver for Max7219<SPI> {
    fn init(&mut self, level: u8) -> Result<(), DisplayError> {
        self.broadcast(reg::SHUTDOWN, SHUTDOWN_MODE_ON)?;
        self.broadcast(reg::DISPLAY_TEST, DISPLAY_TEST_OFF)?;
        self.broadcast(reg::SCAN_LIMIT, SCAN_ALL_ROWS)?;
        self.broadcast(reg::DECODE_MODE, NO_DECODE)?;
        self.broadcast(reg::INTENSITY, level.min(MAX_BRIGHTNESS))?;
        self.broadcast(reg::SHUTDOWN, SHUTDOWN_MODE_OFF)
    }

    fn push_frame(&mut self, frame: &[u8; FRAME_BYTES]) -> Result<(), DisplayError> {
        for row in 0..ROWS {
            self.spi
                .write(&row_words(frame, row))
                .map_err(|_| DisplayError::Bus)?;
        }
        Ok(())
    }

    fn set_brightness(&mut self, level: u8) -> Result<(), DisplayError> {
        self.broadcast(reg::INTENSITY, level.min(MAX_BRIGHTNESS))
    }

    fn power_on(&mut self) -> Result<(), DisplayError> {
        self.broadcast(reg::SHUTDOWN, SHUTDOWN_MODE_OFF)
    }

    fn power_off(&mut self) -> Result<(), DisplayError> {
        self.broadcast(reg::SHUTDOWN, SHUTDOWN_MODE_ON)
    }
}
