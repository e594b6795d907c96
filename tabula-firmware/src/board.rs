//! Raspberry Pi Pico wiring
//!
//! | Function          | Pins                      |
//! |-------------------|---------------------------|
//! | RTC + EEPROM I2C1 | SDA GPIO26, SCL GPIO27    |
//! | Matrix SPI1       | CLK GPIO14, MOSI GPIO15, CS GPIO13 |
//! | IR decoder UART0  | TX GPIO0, RX GPIO1        |
//! | Heartbeat LED     | GPIO25                    |

use core::cell::RefCell;

use embassy_rp::gpio::Output;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C1, SPI1};
use embassy_rp::spi::{self, Blocking, Phase, Polarity, Spi};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embedded_hal_bus::i2c::CriticalSectionDevice;
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};

use tabula_core::scheduler::Shared;
use tabula_drivers::{At24c32, Ds3231, Max7219};

pub const I2C_FREQUENCY: u32 = 400_000;
pub const SPI_FREQUENCY: u32 = 5_000_000;
pub const UART_BAUD: u32 = 115_200;

pub type I2cBus = I2c<'static, I2C1, i2c::Blocking>;
pub type I2cBusCell = critical_section::Mutex<RefCell<I2cBus>>;
type SharedI2c = CriticalSectionDevice<'static, I2cBus>;

pub type MatrixSpi = ExclusiveDevice<Spi<'static, SPI1, Blocking>, Output<'static>, NoDelay>;

pub type Matrix = Max7219<MatrixSpi>;
pub type Rtc = Ds3231<SharedI2c>;
pub type Eeprom = At24c32<SharedI2c>;

/// Scoreboard state shared by the remote task and the view routines
pub type SharedBoard = Shared<CriticalSectionRawMutex, Matrix, Rtc, Eeprom>;

pub fn i2c_config() -> i2c::Config {
    let mut config = i2c::Config::default();
    config.frequency = I2C_FREQUENCY;
    config
}

/// SPI mode 2 as the MAX7219 chain was wired and tested
pub fn spi_config() -> spi::Config {
    let mut config = spi::Config::default();
    config.frequency = SPI_FREQUENCY;
    config.polarity = Polarity::IdleHigh;
    config.phase = Phase::CaptureOnFirstTransition;
    config
}
