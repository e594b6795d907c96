//! Outcomes reported by the dispatcher

use super::mode::{EditTarget, Transient};

/// What a dispatched remote event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Dropped input
    /// Unknown code, or the button means nothing in the current mode
    Ignored,
    /// Input is masked while the revert animation runs
    Masked,
    /// Change rejected by the repeat-rate gate
    Debounced,

    // Long presses
    /// Counted towards a long press (count so far)
    Holding(Transient, u8),
    /// Long press completed and its signal is pending
    Signalled(Transient),

    // Editing
    /// Entered an editor from basic mode
    EditStarted(EditTarget),
    /// Value in the current editor changed
    Adjusted(EditTarget),
    /// Moved from one date/time field to the next
    FieldAdvanced(EditTarget),
    /// Editor committed; back in basic mode
    Committed(EditTarget),

    // Display
    /// Display switched on (true) or off (false)
    PowerToggled(bool),
    /// Display chips re-initialized
    Reinitialized,
}

impl Event {
    /// Check if the event changed the controller mode
    pub fn changes_mode(&self) -> bool {
        matches!(
            self,
            Event::Signalled(_)
                | Event::EditStarted(_)
                | Event::FieldAdvanced(_)
                | Event::Committed(_)
        )
    }

    /// Check if the input was dropped without effect
    pub fn is_dropped(&self) -> bool {
        matches!(self, Event::Ignored | Event::Masked | Event::Debounced)
    }
}
