//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the collaborator
//! traits defined in tabula-core on top of `embedded-hal` 1.0 buses:
//!
//! - LED matrix (MAX7219, 8 cascaded chips over SPI)
//! - Real-time clock (DS3231 over I2C)
//! - Configuration and score store (AT24C32 EEPROM over I2C)

#![no_std]
#![deny(unsafe_code)]

pub mod at24c32;
pub mod ds3231;
pub mod max7219;

pub use at24c32::At24c32;
pub use ds3231::Ds3231;
pub use max7219::Max7219;
