//! Controller modes
//!
//! Exactly one mode is active at a time. The basic view runs only in
//! [`Mode::Basic`]; everything else belongs to the settings view.

use crate::display::{Quadrant, Row, Side};
use crate::values::UsageKind;

/// Value being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditTarget {
    LeftScore,
    RightScore,
    Usage(UsageKind),
    Day,
    Month,
    Year,
    Hour,
    Minute,
    Brightness,
}

/// One-shot signals fired by long presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transient {
    /// "0" held: zero the score
    ScoreReset,
    /// Down held: undo the last score change
    RevertScore,
    /// OK held: leave the main loop
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    #[default]
    Basic,
    Edit(EditTarget),
    Signal(Transient),
}

/// Region blanked during the "off" phase of an editor blink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkRegion {
    Half(Side),
    Quarter(Quadrant),
    Row(Row),
}

impl EditTarget {
    pub fn is_score(self) -> bool {
        matches!(self, EditTarget::LeftScore | EditTarget::RightScore)
    }

    pub fn is_date(self) -> bool {
        matches!(self, EditTarget::Day | EditTarget::Month | EditTarget::Year)
    }

    pub fn is_time(self) -> bool {
        matches!(self, EditTarget::Hour | EditTarget::Minute)
    }

    /// Field that follows on OK in the date/time walk
    pub fn next_field(self) -> Option<Self> {
        match self {
            EditTarget::Day => Some(EditTarget::Month),
            EditTarget::Month => Some(EditTarget::Year),
            EditTarget::Year => Some(EditTarget::Hour),
            EditTarget::Hour => Some(EditTarget::Minute),
            _ => None,
        }
    }

    /// Where the blinking editor blanks its field
    pub fn blink_region(self) -> Option<BlinkRegion> {
        match self {
            EditTarget::LeftScore | EditTarget::Hour => Some(BlinkRegion::Half(Side::Left)),
            EditTarget::RightScore | EditTarget::Minute => Some(BlinkRegion::Half(Side::Right)),
            EditTarget::Day => Some(BlinkRegion::Quarter(Quadrant::TopLeft)),
            EditTarget::Month => Some(BlinkRegion::Quarter(Quadrant::TopRight)),
            EditTarget::Year => Some(BlinkRegion::Row(Row::Bottom)),
            EditTarget::Usage(_) | EditTarget::Brightness => None,
        }
    }
}

impl Mode {
    pub fn is_basic(self) -> bool {
        self == Mode::Basic
    }

    pub fn edit_target(self) -> Option<EditTarget> {
        match self {
            Mode::Edit(target) => Some(target),
            _ => None,
        }
    }

    pub fn is_exit(self) -> bool {
        self == Mode::Signal(Transient::Exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_time_walk() {
        let mut field = EditTarget::Day;
        let mut walked = 1;
        while let Some(next) = field.next_field() {
            field = next;
            walked += 1;
        }
        assert_eq!(field, EditTarget::Minute);
        assert_eq!(walked, 5);
    }

    #[test]
    fn test_blink_regions() {
        assert_eq!(
            EditTarget::Year.blink_region(),
            Some(BlinkRegion::Row(Row::Bottom))
        );
        assert_eq!(
            EditTarget::Minute.blink_region(),
            Some(BlinkRegion::Half(Side::Right))
        );
        assert_eq!(EditTarget::Brightness.blink_region(), None);
    }

    #[test]
    fn test_mode_queries() {
        assert!(Mode::default().is_basic());
        assert!(Mode::Signal(Transient::Exit).is_exit());
        assert_eq!(
            Mode::Edit(EditTarget::Day).edit_target(),
            Some(EditTarget::Day)
        );
        assert_eq!(Mode::Signal(Transient::ScoreReset).edit_target(), None);
    }
}
