//! LED matrix driver trait

use crate::graphics::FRAME_BYTES;

/// Errors that can occur while talking to the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// SPI transfer failed
    Bus,
    /// Chip-select line could not be driven
    ChipSelect,
}

/// Trait for the cascaded LED matrix
///
/// The driver knows nothing about glyphs or modes: it latches a packed
/// framebuffer and exposes the handful of chip-level controls the
/// scoreboard needs.
pub trait MatrixDriver {
    /// Run the chip initialization sequence at the given brightness level
    fn init(&mut self, level: u8) -> Result<(), DisplayError>;

    /// Latch a packed MONO_HLSB frame onto the tiles
    fn push_frame(&mut self, frame: &[u8; FRAME_BYTES]) -> Result<(), DisplayError>;

    /// Set LED intensity (0-3)
    fn set_brightness(&mut self, level: u8) -> Result<(), DisplayError>;

    /// Leave shutdown mode
    fn power_on(&mut self) -> Result<(), DisplayError>;

    /// Enter shutdown mode (frame contents are retained)
    fn power_off(&mut self) -> Result<(), DisplayError>;
}
