//! Calendar date, edited field by field

use core::fmt::Write;

use heapless::String;

use crate::display::Display;
use crate::graphics::Framebuffer;
use crate::render::{draw_medium_digits, Renderable};
use crate::traits::{Clock, ClockError, DateTime, DisplayError, MatrixDriver};

pub const DAY_RANGE: (u8, u8) = (1, 31);
pub const MONTH_RANGE: (u8, u8) = (1, 12);
pub const YEAR_RANGE: (u16, u16) = (2000, 2099);

/// Step `value` by one inside `[min, max]`, wrapping at both ends
pub(crate) fn cycle_up<T>(value: T, (min, max): (T, T)) -> T
where
    T: Copy + PartialOrd + core::ops::Add<Output = T> + From<u8>,
{
    if value >= max || value < min {
        min
    } else {
        value + T::from(1)
    }
}

pub(crate) fn cycle_down<T>(value: T, (min, max): (T, T)) -> T
where
    T: Copy + PartialOrd + core::ops::Sub<Output = T> + From<u8>,
{
    if value <= min || value > max {
        max
    } else {
        value - T::from(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateValue {
    pub day: u8,
    pub month: u8,
    pub year: u16,
}

impl Default for DateValue {
    fn default() -> Self {
        Self {
            day: 1,
            month: 1,
            year: YEAR_RANGE.0,
        }
    }
}

impl From<&DateTime> for DateValue {
    fn from(dt: &DateTime) -> Self {
        Self {
            day: dt.day,
            month: dt.month,
            year: dt.year,
        }
    }
}

impl DateValue {
    /// Read the current date from the clock
    pub fn pull<C: Clock>(clock: &mut C) -> Result<Self, ClockError> {
        Ok(Self::from(&clock.read()?))
    }

    /// Write this date back, keeping the clock's time of day
    pub fn push<C: Clock>(&self, clock: &mut C) -> Result<(), ClockError> {
        let mut now = clock.read()?;
        now.year = self.year;
        now.month = self.month;
        now.day = self.day;
        clock.write(&now)
    }

    pub fn incr_day(&mut self) {
        self.day = cycle_up(self.day, DAY_RANGE);
    }

    pub fn decr_day(&mut self) {
        self.day = cycle_down(self.day, DAY_RANGE);
    }

    pub fn incr_month(&mut self) {
        self.month = cycle_up(self.month, MONTH_RANGE);
    }

    pub fn decr_month(&mut self) {
        self.month = cycle_down(self.month, MONTH_RANGE);
    }

    pub fn incr_year(&mut self) {
        self.year = cycle_up(self.year, YEAR_RANGE);
    }

    pub fn decr_year(&mut self) {
        self.year = cycle_down(self.year, YEAR_RANGE);
    }

    /// Pull a 31st back to the 30th in the four 30-day months
    ///
    /// February is left alone.
    pub fn validate_max_days(&mut self) {
        if matches!(self.month, 4 | 6 | 9 | 11) && self.day >= 31 {
            self.day = 30;
        }
    }

    /// Setting screen: "ddmm" on the top row, "yyyy" below, with the
    /// two separator dots
    pub fn render_setting<D: MatrixDriver>(
        &self,
        display: &mut Display<D>,
    ) -> Result<(), DisplayError> {
        let mut top: String<4> = String::new();
        let mut bottom: String<4> = String::new();
        // Fields are range-limited so four characters always fit
        let _ = write!(top, "{:02}{:02}", self.day % 100, self.month % 100);
        let _ = write!(bottom, "{:04}", self.year % 10_000);

        display.fill(false);
        display.text(&top, 0, 0);
        display.text(&bottom, 0, 8);
        display.pixel(15, 7);
        display.pixel(31, 7);
        display.push_frame()
    }
}

impl Renderable for DateValue {
    fn draw(&self, fb: &mut Framebuffer, x: i16) {
        draw_medium_digits(fb, self.day, x);
        draw_medium_digits(fb, self.month, x + 18);
        for dot_x in [15 + x, 31 + x] {
            fb.hline(dot_x, 13, 2, true);
            fb.hline(dot_x, 14, 2, true);
        }
    }
}
