//! Rendering contract shared by all value models

use heapless::Vec;

use crate::board::Scoreboard;
use crate::config::Config;
use crate::display::Display;
use crate::error::Error;
use crate::graphics::{Font, Framebuffer};
use crate::traits::{Clock, DisplayError, MatrixDriver, Storage};
use crate::values::{DateValue, Temperature, TimeValue};

/// Something that can draw itself at a horizontal offset
pub trait Renderable {
    /// Draw into the framebuffer, shifted right by `x` (may be negative)
    fn draw(&self, fb: &mut Framebuffer, x: i16);

    /// Draw onto the display, optionally blanking first and latching after
    fn render<D: MatrixDriver>(
        &self,
        display: &mut Display<D>,
        x: i16,
        pre_clear: bool,
        push: bool,
    ) -> Result<(), DisplayError> {
        if pre_clear {
            display.fill(false);
        }
        self.draw(display.framebuffer_mut(), x);
        if push {
            display.push_frame()?;
        }
        Ok(())
    }
}

/// Two digits in the narrow digit font, tens at `x`
///
/// The ones digit goes at `x + 8`, or `x + 12` when it is a "1" so the
/// single stroke sits against the right edge of its cell.
pub(crate) fn draw_medium_digits(fb: &mut Framebuffer, value: u8, x: i16) {
    let (tens, ones) = ((value / 10) % 10, value % 10);
    let ones_offset = if ones == 1 { 12 } else { 8 };
    for (digit, offset) in [(tens, 0), (ones, ones_offset)] {
        if let Some(glyph) = Font::MediumDigit.digit(digit) {
            glyph.shifted(x + offset).render(fb);
        }
    }
}

/// Two digits in the alphanumeric font, tens at `x` and ones at `x + 8`
pub(crate) fn draw_two_digits(fb: &mut Framebuffer, value: u8, x: i16) {
    let digits = [(value / 10) % 10, value % 10];
    for (digit, offset) in digits.into_iter().zip([0, 8]) {
        if let Some(glyph) = Font::Medium.digit(digit) {
            glyph.shifted(x + offset).render(fb);
        }
    }
}

/// Info categories rotated through by the basic view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Info {
    Score,
    Date,
    Time,
    Temperature,
}

impl Info {
    /// Enabled categories in display order
    pub fn enabled(config: &Config) -> Vec<Info, 4> {
        let mut infos = Vec::new();
        for (info, on) in [
            (Info::Score, config.use_score),
            (Info::Date, config.use_date),
            (Info::Time, config.use_time),
            (Info::Temperature, config.use_temperature),
        ] {
            if on {
                // capacity matches the category count
                let _ = infos.push(info);
            }
        }
        infos
    }

    /// Render the category's current value
    ///
    /// Date, time and temperature are read fresh from the clock on every
    /// call, so a scrolling frame never shows a stale value.
    pub fn render<D, C, S>(
        self,
        sb: &mut Scoreboard<D, C, S>,
        x: i16,
        pre_clear: bool,
        push: bool,
    ) -> Result<(), Error>
    where
        D: MatrixDriver,
        C: Clock,
        S: Storage,
    {
        let board = &mut sb.board;
        match self {
            Info::Score => sb.controller.score().render(&mut board.display, x, pre_clear, push)?,
            Info::Date => DateValue::pull(&mut board.clock)?.render(&mut board.display, x, pre_clear, push)?,
            Info::Time => TimeValue::pull(&mut board.clock)?.render(&mut board.display, x, pre_clear, push)?,
            Info::Temperature => {
                Temperature::pull(&mut board.clock)?.render(&mut board.display, x, pre_clear, push)?
            }
        }
        Ok(())
    }
}
