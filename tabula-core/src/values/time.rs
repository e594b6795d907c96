//! Time of day (hours and minutes)

use crate::graphics::Framebuffer;
use crate::render::{draw_medium_digits, Renderable};
use crate::traits::{Clock, ClockError, DateTime};
use crate::values::date::{cycle_down, cycle_up};

pub const HOUR_RANGE: (u8, u8) = (0, 23);
pub const MINUTE_RANGE: (u8, u8) = (0, 59);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeValue {
    pub hour: u8,
    pub minute: u8,
}

impl From<&DateTime> for TimeValue {
    fn from(dt: &DateTime) -> Self {
        Self {
            hour: dt.hour,
            minute: dt.minute,
        }
    }
}

impl TimeValue {
    pub fn pull<C: Clock>(clock: &mut C) -> Result<Self, ClockError> {
        Ok(Self::from(&clock.read()?))
    }

    /// Write hours and minutes back; seconds restart at zero
    pub fn push<C: Clock>(&self, clock: &mut C) -> Result<(), ClockError> {
        let mut now = clock.read()?;
        now.hour = self.hour;
        now.minute = self.minute;
        now.second = 0;
        clock.write(&now)
    }

    pub fn incr_hour(&mut self) {
        self.hour = cycle_up(self.hour, HOUR_RANGE);
    }

    pub fn decr_hour(&mut self) {
        self.hour = cycle_down(self.hour, HOUR_RANGE);
    }

    pub fn incr_minute(&mut self) {
        self.minute = cycle_up(self.minute, MINUTE_RANGE);
    }

    pub fn decr_minute(&mut self) {
        self.minute = cycle_down(self.minute, MINUTE_RANGE);
    }
}

impl Renderable for TimeValue {
    fn draw(&self, fb: &mut Framebuffer, x: i16) {
        draw_medium_digits(fb, self.hour, x);
        draw_medium_digits(fb, self.minute, x + 18);
        for y in [4, 5, 10, 11] {
            fb.hline(15 + x, y, 2, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeClock;
    use proptest::prelude::*;

    #[test]
    fn test_wraps() {
        let mut time = TimeValue {
            hour: 23,
            minute: 0,
        };
        time.incr_hour();
        time.decr_minute();
        assert_eq!(time, TimeValue { hour: 0, minute: 59 });
    }

    #[test]
    fn test_push_zeroes_seconds() {
        let mut clock = FakeClock::new(DateTime {
            year: 2024,
            month: 6,
            day: 15,
            hour: 1,
            minute: 2,
            second: 33,
            weekday: 6,
        });
        TimeValue {
            hour: 21,
            minute: 45,
        }
        .push(&mut clock)
        .unwrap();

        assert_eq!(clock.now.hour, 21);
        assert_eq!(clock.now.minute, 45);
        assert_eq!(clock.now.second, 0);
        assert_eq!(clock.now.day, 15);
    }

    #[test]
    fn test_colon() {
        let mut fb = Framebuffer::new();
        TimeValue::default().draw(&mut fb, 0);
        for y in [4, 5, 10, 11] {
            assert!(fb.get(15, y) && fb.get(16, y));
        }
        assert!(!fb.get(15, 7));
    }

    proptest! {
        #[test]
        fn prop_hour_decr_incr_inverse(hour in 0u8..=23) {
            let mut time = TimeValue { hour, minute: 0 };
            time.decr_hour();
            prop_assert!(time.hour <= 23);
            time.incr_hour();
            prop_assert_eq!(time.hour, hour);
        }

        #[test]
        fn prop_minute_decr_incr_inverse(minute in 0u8..=59) {
            let mut time = TimeValue { hour: 0, minute };
            time.decr_minute();
            prop_assert!(time.minute <= 59);
            time.incr_minute();
            prop_assert_eq!(time.minute, minute);
        }
    }

    #[test]
    fn test_cycle_edges() {
        let mut time = TimeValue { hour: 0, minute: 0 };
        time.decr_hour();
        time.decr_minute();
        assert_eq!(time, TimeValue { hour: 23, minute: 59 });
        time.incr_hour();
        time.incr_minute();
        assert_eq!(time, TimeValue { hour: 0, minute: 0 });
    }
}
