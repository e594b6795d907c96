//! DS3231 real-time clock
//!
//! Calendar registers 0x00-0x06 hold seconds, minutes, hours, weekday,
//! day, month and year in BCD. The hour register is always written in
//! 24-hour mode; the century bit of the month register is ignored and
//! every year is taken as 20xx.
//!
//! The chip also carries a temperature sensor used for oscillator
//! compensation. Its reading sits in 0x11 (integer part, signed) and
//! the top two bits of 0x12 (quarter degrees).

use embedded_hal::i2c::I2c;
use tabula_core::traits::{Clock, ClockError, DateTime};

/// Fixed 7-bit bus address
pub const ADDRESS: u8 = 0x68;

/// DS3231 register addresses
pub mod reg {
    pub const SECONDS: u8 = 0x00;
    pub const MINUTES: u8 = 0x01;
    pub const HOURS: u8 = 0x02;
    pub const WEEKDAY: u8 = 0x03;
    pub const DAY: u8 = 0x04;
    pub const MONTH: u8 = 0x05;
    pub const YEAR: u8 = 0x06;
    /// Temperature MSB; the LSB follows at 0x12
    pub const TEMPERATURE: u8 = 0x11;
}

const CALENDAR_REGS: usize = 7;
const HOUR_MASK: u8 = 0x3F;
const MONTH_MASK: u8 = 0x1F;
const CENTURY: u16 = 2000;

/// Degrees per temperature LSB
const TEMPERATURE_STEP: f32 = 0.25;

/// Decode one packed BCD byte
pub fn bcd_to_bin(bcd: u8) -> u8 {
    (bcd >> 4) * 10 + (bcd & 0x0F)
}

/// Encode 0-99 as packed BCD
pub fn bin_to_bcd(bin: u8) -> u8 {
    ((bin / 10) << 4) | (bin % 10)
}

/// Decode the seven calendar registers
pub fn decode_datetime(regs: &[u8; CALENDAR_REGS]) -> Result<DateTime, ClockError> {
    let datetime = DateTime {
        second: bcd_to_bin(regs[reg::SECONDS as usize] & 0x7F),
        minute: bcd_to_bin(regs[reg::MINUTES as usize] & 0x7F),
        hour: bcd_to_bin(regs[reg::HOURS as usize] & HOUR_MASK),
        weekday: bcd_to_bin(regs[reg::WEEKDAY as usize] & 0x07),
        day: bcd_to_bin(regs[reg::DAY as usize] & 0x3F),
        month: bcd_to_bin(regs[reg::MONTH as usize] & MONTH_MASK),
        year: CENTURY + bcd_to_bin(regs[reg::YEAR as usize]) as u16,
    };

    let valid = datetime.second < 60
        && datetime.minute < 60
        && datetime.hour < 24
        && (1..=31).contains(&datetime.day)
        && (1..=12).contains(&datetime.month)
        && datetime.year < CENTURY + 100;

    if valid {
        Ok(datetime)
    } else {
        Err(ClockError::InvalidData)
    }
}

/// Encode a record as the seven calendar registers
pub fn encode_datetime(datetime: &DateTime) -> [u8; CALENDAR_REGS] {
    let year = datetime.year.saturating_sub(CENTURY).min(99) as u8;
    [
        bin_to_bcd(datetime.second.min(59)),
        bin_to_bcd(datetime.minute.min(59)),
        bin_to_bcd(datetime.hour.min(23)),
        bin_to_bcd(datetime.weekday.clamp(1, 7)),
        bin_to_bcd(datetime.day.clamp(1, 31)),
        bin_to_bcd(datetime.month.clamp(1, 12)),
        bin_to_bcd(year),
    ]
}

/// Convert the raw temperature register pair to degrees Celsius
pub fn decode_temperature(msb: u8, lsb: u8) -> f32 {
    // 10-bit two's complement, left aligned in the 16-bit pair
    let raw = i16::from_be_bytes([msb, lsb]) >> 6;
    raw as f32 * TEMPERATURE_STEP
}

/// DS3231 on a shared I2C bus
pub struct Ds3231<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> Ds3231<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Give the bus handle back
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> Clock for Ds3231<I2C> {
    fn read(&mut self) -> Result<DateTime, ClockError> {
        let mut regs = [0u8; CALENDAR_REGS];
        self.i2c
            .write_read(ADDRESS, &[reg::SECONDS], &mut regs)
            .map_err(|_| ClockError::Bus)?;
        decode_datetime(&regs)
    }

    fn write(&mut self, datetime: &DateTime) -> Result<(), ClockError> {
        let mut buf = [0u8; CALENDAR_REGS + 1];
        buf[0] = reg::SECONDS;
        buf[1..].copy_from_slice(&encode_datetime(datetime));
        self.i2c.write(ADDRESS, &buf).map_err(|_| ClockError::Bus)
    }

    fn read_temperature(&mut self) -> Result<f32, ClockError> {
        let mut raw = [0u8; 2];
        self.i2c
            .write_read(ADDRESS, &[reg::TEMPERATURE], &mut raw)
            .map_err(|_| ClockError::Bus)?;
        Ok(decode_temperature(raw[0], raw[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};

    /// Mock DS3231 register file behind an I2C interface
    struct MockRtc {
        regs: [u8; 0x13],
        pointer: usize,
        fail: bool,
    }

    impl MockRtc {
        fn new() -> Self {
            Self {
                regs: [0; 0x13],
                pointer: 0,
                fail: false,
            }
        }
    }

    impl ErrorType for MockRtc {
        type Error = ErrorKind;
    }

    impl I2c for MockRtc {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), ErrorKind> {
            if self.fail || address != ADDRESS {
                return Err(ErrorKind::Other);
            }
            for op in operations {
                match op {
                    Operation::Write(bytes) => {
                        if let Some((first, data)) = bytes.split_first() {
                            self.pointer = *first as usize;
                            for byte in data {
                                self.regs[self.pointer] = *byte;
                                self.pointer += 1;
                            }
                        }
                    }
                    Operation::Read(buf) => {
                        for byte in buf.iter_mut() {
                            *byte = self.regs[self.pointer];
                            self.pointer += 1;
                        }
                    }
                }
            }
            Ok(())
        }
    }

    fn sample() -> DateTime {
        DateTime {
            year: 2024,
            month: 3,
            day: 17,
            hour: 21,
            minute: 45,
            second: 9,
            weekday: 7,
        }
    }

    #[test]
    fn test_bcd_conversion() {
        assert_eq!(bcd_to_bin(0x59), 59);
        assert_eq!(bin_to_bcd(59), 0x59);
        assert_eq!(bin_to_bcd(7), 0x07);
    }

    #[test]
    fn test_write_then_read() {
        let mut rtc = Ds3231::new(MockRtc::new());
        rtc.write(&sample()).unwrap();

        assert_eq!(rtc.i2c.regs[..7], [0x09, 0x45, 0x21, 0x07, 0x17, 0x03, 0x24]);
        assert_eq!(rtc.read().unwrap(), sample());
    }

    #[test]
    fn test_read_masks_control_bits() {
        let mut bus = MockRtc::new();
        // century bit on the month, 12/24 bit clear on the hour
        bus.regs[..7].copy_from_slice(&[0x00, 0x30, 0x13, 0x02, 0x01, 0x81, 0x99]);
        let mut rtc = Ds3231::new(bus);

        let datetime = rtc.read().unwrap();
        assert_eq!(datetime.month, 1);
        assert_eq!(datetime.hour, 13);
        assert_eq!(datetime.year, 2099);
    }

    #[test]
    fn test_garbage_is_invalid_data() {
        let mut bus = MockRtc::new();
        bus.regs[..7].copy_from_slice(&[0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00]);
        let mut rtc = Ds3231::new(bus);

        assert_eq!(rtc.read(), Err(ClockError::InvalidData));
    }

    #[test]
    fn test_temperature_decoding() {
        assert_eq!(decode_temperature(0x19, 0x40), 25.25);
        assert_eq!(decode_temperature(0x00, 0xC0), 0.75);
        // -0.25 degrees
        assert_eq!(decode_temperature(0xFF, 0xC0), -0.25);
    }

    #[test]
    fn test_read_temperature_from_registers() {
        let mut bus = MockRtc::new();
        bus.regs[0x11] = 0x15;
        bus.regs[0x12] = 0x80;
        let mut rtc = Ds3231::new(bus);

        assert_eq!(rtc.read_temperature().unwrap(), 21.5);
    }

    #[test]
    fn test_bus_error_is_mapped() {
        let mut bus = MockRtc::new();
        bus.fail = true;
        let mut rtc = Ds3231::new(bus);

        assert_eq!(rtc.read(), Err(ClockError::Bus));
        assert_eq!(rtc.write(&sample()), Err(ClockError::Bus));
        assert_eq!(rtc.read_temperature(), Err(ClockError::Bus));
    }
}
