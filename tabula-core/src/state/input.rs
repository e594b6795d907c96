//! Long-press counting and the repeat-rate gate

/// Repeat frames needed before a long press fires
pub const HOLD_THRESHOLD: u8 = 6;

/// Minimum spacing between accepted score/brightness steps
pub const DEBOUNCE_MS: u32 = 200;

/// Counts repeat frames of a held button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HoldCounter {
    count: u8,
}

impl HoldCounter {
    /// Count one press; true when the long press fires
    ///
    /// The first press plus six repeats fire on the seventh call, after
    /// which the counter starts over.
    pub fn tick(&mut self) -> bool {
        if self.count >= HOLD_THRESHOLD {
            self.count = 0;
            true
        } else {
            self.count += 1;
            false
        }
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    pub fn count(&self) -> u8 {
        self.count
    }
}

/// Lets a change through at most once per [`DEBOUNCE_MS`]
///
/// Times are wrapping millisecond ticks; a negative difference (the
/// tick counter wrapped past the stored value) always passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Debounce {
    last_ms: Option<u32>,
}

impl Debounce {
    pub const fn new() -> Self {
        Self { last_ms: None }
    }

    pub fn accept(&mut self, now_ms: u32) -> bool {
        let pass = match self.last_ms {
            None => true,
            Some(last) => {
                let elapsed = now_ms.wrapping_sub(last) as i32;
                elapsed >= DEBOUNCE_MS as i32 || elapsed < 0
            }
        };
        if pass {
            self.last_ms = Some(now_ms);
        }
        pass
    }
}
