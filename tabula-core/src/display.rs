//! Framebuffer plus matrix driver
//!
//! Drawing goes into the framebuffer; nothing reaches the LEDs until
//! [`Display::push_frame`]. The MAX7219 chain occasionally misses a
//! latch, so every logical frame is shifted out twice.

use crate::graphics::{Framebuffer, HEIGHT, WIDTH};
use crate::traits::{DisplayError, MatrixDriver};

const HALF_WIDTH: i16 = WIDTH / 2;
const HALF_HEIGHT: i16 = HEIGHT / 2;

/// Left/right half of the display, around the two-column centre gap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Side {
    Left,
    Right,
    Both,
}

/// One 16x8 quarter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// One 32x8 tile row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Row {
    Top,
    Bottom,
}

/// Display adapter owning the framebuffer and the matrix driver
pub struct Display<D: MatrixDriver> {
    fb: Framebuffer,
    driver: D,
    powered: bool,
}

impl<D: MatrixDriver> Display<D> {
    /// Wrap an already initialized driver
    pub fn new(driver: D) -> Self {
        Self {
            fb: Framebuffer::new(),
            driver,
            powered: true,
        }
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.fb
    }

    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.fb
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn is_powered(&self) -> bool {
        self.powered
    }

    pub fn fill(&mut self, on: bool) {
        self.fb.fill(on);
    }

    pub fn fill_rect(&mut self, x: i16, y: i16, w: i16, h: i16, on: bool) {
        self.fb.fill_rect(x, y, w, h, on);
    }

    pub fn hline(&mut self, x: i16, y: i16, len: i16) {
        self.fb.hline(x, y, len, true);
    }

    pub fn vline(&mut self, x: i16, y: i16, len: i16) {
        self.fb.vline(x, y, len, true);
    }

    pub fn pixel(&mut self, x: i16, y: i16) {
        self.fb.pixel(x, y, true);
    }

    pub fn text(&mut self, s: &str, x: i16, y: i16) {
        self.fb.text(s, x, y, true);
    }

    /// Latch the framebuffer onto the tiles (twice)
    pub fn push_frame(&mut self) -> Result<(), DisplayError> {
        self.driver.push_frame(self.fb.as_bytes())?;
        self.driver.push_frame(self.fb.as_bytes())
    }

    /// Blank one half, leaving the centre columns 15-16 untouched
    pub fn clear_half(&mut self, side: Side) -> Result<(), DisplayError> {
        if matches!(side, Side::Left | Side::Both) {
            self.fb.fill_rect(0, 0, HALF_WIDTH - 1, HEIGHT, false);
        }
        if matches!(side, Side::Right | Side::Both) {
            self.fb
                .fill_rect(HALF_WIDTH + 1, 0, HALF_WIDTH - 1, HEIGHT, false);
        }
        self.push_frame()
    }

    pub fn clear_quarter(&mut self, quadrant: Quadrant) -> Result<(), DisplayError> {
        let (x, y) = match quadrant {
            Quadrant::TopLeft => (0, 0),
            Quadrant::TopRight => (HALF_WIDTH, 0),
            Quadrant::BottomLeft => (0, HALF_HEIGHT),
            Quadrant::BottomRight => (HALF_WIDTH, HALF_HEIGHT),
        };
        self.fb.fill_rect(x, y, HALF_WIDTH, HALF_HEIGHT, false);
        self.push_frame()
    }

    pub fn clear_row(&mut self, row: Row) -> Result<(), DisplayError> {
        let y = match row {
            Row::Top => 0,
            Row::Bottom => HALF_HEIGHT,
        };
        self.fb.fill_rect(0, y, WIDTH, HALF_HEIGHT, false);
        self.push_frame()
    }

    /// Set LED intensity (0-3)
    pub fn set_brightness(&mut self, level: u8) -> Result<(), DisplayError> {
        self.driver.set_brightness(level)
    }

    pub fn power_on(&mut self) -> Result<(), DisplayError> {
        self.driver.power_on()?;
        self.powered = true;
        Ok(())
    }

    pub fn power_off(&mut self) -> Result<(), DisplayError> {
        self.driver.power_off()?;
        self.powered = false;
        Ok(())
    }

    /// Re-run the chip init and show the horizontal "re-initializing" bar
    pub fn reinit(&mut self, level: u8) -> Result<(), DisplayError> {
        self.driver.init(level)?;
        self.powered = true;
        self.fb.fill(false);
        self.fb.fill_rect(0, HALF_HEIGHT - 1, WIDTH, 2, true);
        self.push_frame()
    }
}
