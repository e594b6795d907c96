//! Tabula - LED Matrix Scoreboard Firmware
//!
//! Main firmware binary for the RP2040 scoreboard: a 32x16 MAX7219
//! matrix, a DS3231 clock with its AT24C32 EEPROM, and an IR remote
//! whose key codes arrive from a decoder over UART.
//!
//! Two executors share one critical-section mutex:
//! - an interrupt executor (SWI_IRQ_1) for remote input, so a press
//!   lands between two animation frames;
//! - the thread-mode executor for the view routines.

#![no_std]
#![no_main]

use core::cell::RefCell;

use cortex_m_rt::entry;
use defmt::*;
use embassy_executor::{Executor, InterruptExecutor};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::I2c;
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::peripherals::UART0;
use embassy_rp::spi::Spi;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embedded_hal_bus::i2c::CriticalSectionDevice;
use embedded_hal_bus::spi::ExclusiveDevice;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use tabula_core::config::Config;
use tabula_core::display::Display;
use tabula_core::scheduler;
use tabula_core::traits::{MatrixDriver, Storage};
use tabula_core::{Board, Scoreboard};
use tabula_drivers::{At24c32, Ds3231, Max7219};

use crate::board::{I2cBusCell, SharedBoard};

mod board;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_LOW: StaticCell<Executor> = StaticCell::new();

// Static cells for everything the tasks borrow (must live forever)
static I2C_BUS: StaticCell<I2cBusCell> = StaticCell::new();
static SHARED: StaticCell<SharedBoard> = StaticCell::new();
static TX_BUF: StaticCell<[u8; 16]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

#[entry]
fn main() -> ! {
    info!("tabula starting");

    let p = embassy_rp::init(Default::default());

    // RTC and EEPROM sit on the same I2C bus
    let i2c = I2c::new_blocking(p.I2C1, p.PIN_27, p.PIN_26, board::i2c_config());
    let i2c_bus: &'static I2cBusCell =
        I2C_BUS.init(critical_section::Mutex::new(RefCell::new(i2c)));
    let rtc = Ds3231::new(CriticalSectionDevice::new(i2c_bus));
    let mut eeprom = At24c32::new(CriticalSectionDevice::new(i2c_bus));
    info!("I2C initialized");

    let config = match eeprom.read_config() {
        Ok(config) => config,
        Err(e) => {
            warn!("Config read failed: {:?}, using defaults", e);
            Config::default()
        }
    };
    debug!("Config: {:?}", config);

    let spi = Spi::new_blocking_txonly(p.SPI1, p.PIN_14, p.PIN_15, board::spi_config());
    let cs = Output::new(p.PIN_13, Level::High);
    let spi = match ExclusiveDevice::new_no_delay(spi, cs) {
        Ok(device) => device,
        Err(never) => match never {},
    };

    let mut matrix = Max7219::new(spi);
    match matrix.init(config.brightness()) {
        Ok(()) => info!("Matrix initialized, brightness {}", config.brightness()),
        Err(e) => error!("Matrix init failed: {:?}", e),
    }

    let board = Board::new(Display::new(matrix), rtc, eeprom);
    let scoreboard = match Scoreboard::new(board) {
        Ok(scoreboard) => scoreboard,
        Err(e) => {
            error!("Scoreboard init failed: {:?}", e);
            park();
        }
    };
    let shared: &'static SharedBoard = SHARED.init(scheduler::shared(scoreboard));

    let mut uart_config = UartConfig::default();
    uart_config.baudrate = board::UART_BAUD;
    let tx_buf = TX_BUF.init([0u8; 16]);
    let rx_buf = RX_BUF.init([0u8; 64]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (_tx, rx) = uart.split();
    info!("UART initialized for the IR decoder");

    let led = Output::new(p.PIN_25, Level::Low);

    // Remote input preempts the views
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let spawner = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
    unwrap!(spawner.spawn(tasks::remote_task(rx, shared)));

    let executor = EXECUTOR_LOW.init(Executor::new());
    executor.run(|spawner| {
        unwrap!(spawner.spawn(tasks::scoreboard_task(shared, led)));
    })
}

fn park() -> ! {
    loop {
        cortex_m::asm::wfi();
    }
}
