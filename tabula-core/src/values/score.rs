//! Scoreboard value: two sides in 0-99 with single-level undo

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::display::Side;
use crate::graphics::{Font, Framebuffer};
use crate::render::{draw_medium_digits, Renderable};
use crate::traits::{Storage, StorageError};

/// Highest score either side can reach
pub const MAX_SCORE: u8 = 99;

/// Raw left/right pair, as persisted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Points {
    pub left: u8,
    pub right: u8,
}

impl Points {
    pub const fn new(left: u8, right: u8) -> Self {
        Self { left, right }
    }

    fn clamped(self) -> Self {
        Self::new(self.left.min(MAX_SCORE), self.right.min(MAX_SCORE))
    }
}

/// How one side of the score is laid out
///
/// Picked from the numbers alone: the big font fits while both tens
/// digits are 0 or 1; anything from 20 up switches both sides to the
/// medium font so the two digits of a side do not run into each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScoreLayout {
    /// 0-9, one big digit
    OneDigit,
    /// 10-19, big "1" plus a big digit
    LowTwoDigit,
    /// 20-99 on either side, two medium digits
    HighTwoDigit,
}

impl ScoreLayout {
    /// Layouts for the (left, right) sides
    pub fn select(points: Points) -> (Self, Self) {
        if points.left / 10 > 1 || points.right / 10 > 1 {
            return (Self::HighTwoDigit, Self::HighTwoDigit);
        }
        let pick = |value: u8| {
            if value < 10 {
                Self::OneDigit
            } else {
                Self::LowTwoDigit
            }
        };
        (pick(points.left), pick(points.right))
    }

    /// Horizontal offset of the right-hand group
    fn right_offset(self) -> i16 {
        match self {
            Self::OneDigit | Self::LowTwoDigit => 16,
            Self::HighTwoDigit => 18,
        }
    }

    fn draw(self, fb: &mut Framebuffer, value: u8, x: i16) {
        let (tens, ones) = (value / 10, value % 10);
        match self {
            Self::OneDigit => {
                let offset = if ones == 1 { 7 } else { 4 };
                if let Some(glyph) = Font::BigDigit.digit(ones) {
                    glyph.shifted(x + offset).render(fb);
                }
            }
            Self::LowTwoDigit => {
                let ones_offset = if ones == 1 { 12 } else { 6 };
                if let Some(glyph) = Font::BigDigit.digit(tens) {
                    glyph.shifted(x + 2).render(fb);
                }
                if let Some(glyph) = Font::BigDigit.digit(ones) {
                    glyph.shifted(x + ones_offset).render(fb);
                }
            }
            Self::HighTwoDigit => draw_medium_digits(fb, value, x),
        }
    }
}

/// Current score plus what the last change overwrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Score {
    current: Points,
    previous: Points,
    last_changed: Option<Side>,
}

impl Score {
    pub fn new(points: Points) -> Self {
        let points = points.clamped();
        Self {
            current: points,
            previous: points,
            last_changed: None,
        }
    }

    /// Load the last persisted score
    pub fn load<S: Storage>(storage: &mut S) -> Result<Self, StorageError> {
        Ok(Self::new(storage.read_last_score()?))
    }

    pub fn save<S: Storage>(&self, storage: &mut S) -> Result<(), StorageError> {
        storage.write_last_score(self.current)
    }

    pub fn points(&self) -> Points {
        self.current
    }

    pub fn left(&self) -> u8 {
        self.current.left
    }

    pub fn right(&self) -> u8 {
        self.current.right
    }

    /// Side touched by the last change, if it can still be reverted
    pub fn last_changed(&self) -> Option<Side> {
        self.last_changed
    }

    /// Set one side (or both) to `value`, clamped to 0-99
    pub fn set(&mut self, side: Side, value: u8) {
        let value = value.min(MAX_SCORE);
        if matches!(side, Side::Left | Side::Both) {
            self.previous.left = self.current.left;
            self.current.left = value;
        }
        if matches!(side, Side::Right | Side::Both) {
            self.previous.right = self.current.right;
            self.current.right = value;
        }
        self.last_changed = Some(side);
    }

    /// Add one point, saturating at 99
    pub fn incr(&mut self, side: Side) {
        self.step(side, |v| v.saturating_add(1));
    }

    /// Take one point away, saturating at 0
    pub fn decr(&mut self, side: Side) {
        self.step(side, |v| v.saturating_sub(1));
    }

    fn step(&mut self, side: Side, f: impl Fn(u8) -> u8) {
        if matches!(side, Side::Left | Side::Both) {
            self.previous.left = self.current.left;
            self.current.left = f(self.current.left).min(MAX_SCORE);
        }
        if matches!(side, Side::Right | Side::Both) {
            self.previous.right = self.current.right;
            self.current.right = f(self.current.right).min(MAX_SCORE);
        }
        self.last_changed = Some(side);
    }

    /// Zero both sides, remembering the old score for revert
    pub fn reset(&mut self) {
        self.set(Side::Both, 0);
    }

    /// Undo the last change; no-op if there is nothing to undo
    pub fn revert(&mut self) {
        match self.last_changed.take() {
            Some(Side::Left) => self.current.left = self.previous.left,
            Some(Side::Right) => self.current.right = self.previous.right,
            Some(Side::Both) => self.current = self.previous,
            None => {}
        }
    }
}

impl Renderable for Score {
    fn draw(&self, fb: &mut Framebuffer, x: i16) {
        let (left, right) = ScoreLayout::select(self.current);

        left.draw(fb, self.current.left, x);
        fb.hline(15 + x, 7, 2, true);
        fb.hline(15 + x, 8, 2, true);
        right.draw(fb, self.current.right, x + right.right_offset());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rendered(score: &Score) -> Framebuffer {
        let mut fb = Framebuffer::new();
        score.draw(&mut fb, 0);
        fb
    }

    #[test]
    fn test_layout_selection() {
        use ScoreLayout::*;
        assert_eq!(ScoreLayout::select(Points::new(3, 5)), (OneDigit, OneDigit));
        assert_eq!(ScoreLayout::select(Points::new(12, 5)), (LowTwoDigit, OneDigit));
        assert_eq!(ScoreLayout::select(Points::new(19, 19)), (LowTwoDigit, LowTwoDigit));
        assert_eq!(ScoreLayout::select(Points::new(20, 0)), (HighTwoDigit, HighTwoDigit));
        assert_eq!(ScoreLayout::select(Points::new(1, 99)), (HighTwoDigit, HighTwoDigit));
    }

    #[test]
    fn test_single_digit_offsets() {
        let fb = rendered(&Score::new(Points::new(1, 4)));
        // big "1" at x=7 (cols 7-8), right "4" at 16+4 = 20
        assert!(fb.get(7, 0) && fb.get(8, 15));
        assert!(!fb.get(4, 0));
        assert!(fb.get(20, 0));
        // delimiter
        assert!(fb.get(15, 7) && fb.get(16, 8));
    }

    #[test]
    fn test_low_two_digit_ones_offset() {
        let fb = rendered(&Score::new(Points::new(11, 0)));
        // tens "1" at 2, ones "1" at 12
        assert!(fb.get(2, 0) && fb.get(3, 0));
        assert!(fb.get(12, 0) && fb.get(13, 15));
        assert!(!fb.get(6, 0));
    }

    #[test]
    fn test_high_layout_shifts_right_group() {
        let fb = rendered(&Score::new(Points::new(25, 7)));
        // right side "07": tens "0" at 18 uses medium font rows 1-14
        assert!(fb.get(18, 2));
        assert!(!fb.get(18, 0));
        // "7" at 26: top bar row 1
        assert!(fb.get(26, 1));
    }

    #[test]
    fn test_high_layout_narrow_one() {
        let fb = rendered(&Score::new(Points::new(31, 0)));
        // left "31": ones "1" pushed to columns 12-13
        assert!(fb.get(12, 1) && fb.get(13, 14));
        assert!(!fb.get(8, 1));
    }

    #[test]
    fn test_reset_then_revert_restores() {
        let mut score = Score::new(Points::new(7, 12));
        score.reset();
        assert_eq!(score.points(), Points::new(0, 0));
        assert_eq!(score.last_changed(), Some(Side::Both));

        score.revert();
        assert_eq!(score.points(), Points::new(7, 12));
        assert_eq!(score.last_changed(), None);

        // second revert does nothing
        score.revert();
        assert_eq!(score.points(), Points::new(7, 12));
    }

    #[test]
    fn test_revert_single_side() {
        let mut score = Score::new(Points::new(3, 5));
        score.incr(Side::Right);
        score.incr(Side::Left);
        score.revert();
        assert_eq!(score.points(), Points::new(3, 6));
    }

    #[test]
    fn test_new_clamps() {
        assert_eq!(Score::new(Points::new(150, 99)).points(), Points::new(99, 99));
    }

    proptest! {
        #[test]
        fn prop_incr_decr_roundtrip(s in 0u8..=99, left in any::<bool>()) {
            let side = if left { Side::Left } else { Side::Right };
            let mut score = Score::new(Points::new(s, s));
            score.incr(side);
            score.decr(side);
            let value = if left { score.left() } else { score.right() };
            if s == MAX_SCORE {
                prop_assert_eq!(value, MAX_SCORE - 1);
            } else {
                prop_assert_eq!(value, s);
            }
        }

        #[test]
        fn prop_decr_incr_roundtrip(s in 0u8..=99) {
            let mut score = Score::new(Points::new(s, 0));
            score.decr(Side::Left);
            score.incr(Side::Left);
            prop_assert_eq!(score.left(), if s == 0 { 1 } else { s });
        }

        #[test]
        fn prop_stays_in_range(ops in proptest::collection::vec(0u8..4, 0..300)) {
            let mut score = Score::default();
            for op in ops {
                match op {
                    0 => score.incr(Side::Left),
                    1 => score.decr(Side::Left),
                    2 => score.incr(Side::Right),
                    _ => score.decr(Side::Right),
                }
                prop_assert!(score.left() <= MAX_SCORE && score.right() <= MAX_SCORE);
            }
        }
    }
}
