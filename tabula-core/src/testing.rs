//! In-memory collaborators for host tests

extern crate std;

use core::convert::Infallible;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};

use crate::board::Board;
use crate::config::Config;
use crate::display::Display;
use crate::graphics::{Framebuffer, FRAME_BYTES};
use crate::traits::{
    Clock, ClockError, DateTime, DisplayError, MatrixDriver, Storage, StorageError,
};
use crate::values::Points;

pub type TestBoard = Board<FakeMatrix, FakeClock, FakeStorage>;

/// Board with default fakes: clock at 2000-01-01, default config, score 0:0
pub fn board() -> TestBoard {
    Board::new(
        Display::new(FakeMatrix::new()),
        FakeClock::new(DateTime::default()),
        FakeStorage::new(),
    )
}

/// Matrix that records what reaches it
#[derive(Debug, Default)]
pub struct FakeMatrix {
    pub pushes: usize,
    pub inits: usize,
    pub brightness: u8,
    pub on: bool,
    pub fail: bool,
    pub frames: Vec<[u8; FRAME_BYTES]>,
}

impl FakeMatrix {
    pub fn new() -> Self {
        Self {
            on: true,
            ..Self::default()
        }
    }

    pub fn last_frame(&self) -> Framebuffer {
        self.frames
            .last()
            .map(|bytes| Framebuffer::from_bytes(*bytes))
            .unwrap_or_default()
    }

    fn check(&self) -> Result<(), DisplayError> {
        if self.fail {
            Err(DisplayError::Bus)
        } else {
            Ok(())
        }
    }
}

impl MatrixDriver for FakeMatrix {
    fn init(&mut self, level: u8) -> Result<(), DisplayError> {
        self.check()?;
        self.inits += 1;
        self.brightness = level;
        self.on = true;
        Ok(())
    }

    fn push_frame(&mut self, frame: &[u8; FRAME_BYTES]) -> Result<(), DisplayError> {
        self.check()?;
        self.pushes += 1;
        self.frames.push(*frame);
        Ok(())
    }

    fn set_brightness(&mut self, level: u8) -> Result<(), DisplayError> {
        self.check()?;
        self.brightness = level;
        Ok(())
    }

    fn power_on(&mut self) -> Result<(), DisplayError> {
        self.check()?;
        self.on = true;
        Ok(())
    }

    fn power_off(&mut self) -> Result<(), DisplayError> {
        self.check()?;
        self.on = false;
        Ok(())
    }
}

/// Clock that stores whatever was last written
#[derive(Debug)]
pub struct FakeClock {
    pub now: DateTime,
    pub temperature: f32,
    pub writes: usize,
    pub fail: bool,
}

impl FakeClock {
    pub fn new(now: DateTime) -> Self {
        Self {
            now,
            temperature: 21.25,
            writes: 0,
            fail: false,
        }
    }

    fn check(&self) -> Result<(), ClockError> {
        if self.fail {
            Err(ClockError::Bus)
        } else {
            Ok(())
        }
    }
}

impl Clock for FakeClock {
    fn read(&mut self) -> Result<DateTime, ClockError> {
        self.check()?;
        Ok(self.now)
    }

    fn write(&mut self, datetime: &DateTime) -> Result<(), ClockError> {
        self.check()?;
        self.now = *datetime;
        self.writes += 1;
        Ok(())
    }

    fn read_temperature(&mut self) -> Result<f32, ClockError> {
        self.check()?;
        Ok(self.temperature)
    }
}

#[derive(Debug, Default)]
pub struct FakeStorage {
    pub config: Config,
    pub score: Points,
    pub config_writes: usize,
    pub score_writes: usize,
    pub fail: bool,
    /// A write whose cycle has not been reported yet
    pub cycle_pending: bool,
}

/// Write cycle the fake reports after each write
pub const FAKE_WRITE_CYCLE_MS: u32 = 20;

impl FakeStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.fail {
            Err(StorageError::Bus)
        } else {
            Ok(())
        }
    }
}

impl Storage for FakeStorage {
    fn read_config(&mut self) -> Result<Config, StorageError> {
        self.check()?;
        Ok(self.config)
    }

    fn write_config(&mut self, config: &Config) -> Result<(), StorageError> {
        self.check()?;
        self.config = *config;
        self.config_writes += 1;
        self.cycle_pending = true;
        Ok(())
    }

    fn read_last_score(&mut self) -> Result<Points, StorageError> {
        self.check()?;
        Ok(self.score)
    }

    fn write_last_score(&mut self, points: Points) -> Result<(), StorageError> {
        self.check()?;
        self.score = points;
        self.score_writes += 1;
        self.cycle_pending = true;
        Ok(())
    }

    fn take_write_cycle(&mut self) -> Option<u32> {
        core::mem::take(&mut self.cycle_pending).then_some(FAKE_WRITE_CYCLE_MS)
    }
}

/// Async delay on a virtual clock
///
/// Each delay advances the shared clock and yields once, so routines
/// joined under `block_on` interleave without real waiting. Clones share
/// the clock and the log of requested delays.
#[derive(Debug, Clone, Default)]
pub struct FakeDelay {
    elapsed_ms: Rc<Cell<u64>>,
    log: Rc<RefCell<Vec<u32>>>,
}

impl FakeDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms.get()
    }

    /// Every delay requested so far, in milliseconds
    pub fn log(&self) -> Vec<u32> {
        self.log.borrow().clone()
    }
}

impl embedded_hal_async::delay::DelayNs for FakeDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.delay_ms(ns / 1_000_000).await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.elapsed_ms.set(self.elapsed_ms.get() + u64::from(ms));
        self.log.borrow_mut().push(ms);
        embassy_futures::yield_now().await;
    }
}

/// Heartbeat LED that counts toggles
#[derive(Debug, Clone, Default)]
pub struct FakeLed {
    high: Rc<Cell<bool>>,
    toggles: Rc<Cell<usize>>,
}

impl FakeLed {
    pub fn toggles(&self) -> usize {
        self.toggles.get()
    }
}

impl ErrorType for FakeLed {
    type Error = Infallible;
}

impl OutputPin for FakeLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high.set(true);
        Ok(())
    }
}

impl StatefulOutputPin for FakeLed {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high.get())
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high.get())
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        self.toggles.set(self.toggles.get() + 1);
        self.high.set(!self.high.get());
        Ok(())
    }
}
