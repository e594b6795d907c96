//! Crate-level error type

use crate::traits::{ClockError, DisplayError, StorageError};

/// Any failure the core can surface
///
/// Out-of-range values never show up here: they are clamped or wrapped
/// where they are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Matrix driver failure
    Display(DisplayError),
    /// Real-time clock failure
    Clock(ClockError),
    /// Persistent storage failure
    Storage(StorageError),
    /// A circular sequence was built from nothing
    EmptySequence,
}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Error::Display(e)
    }
}

impl From<ClockError> for Error {
    fn from(e: ClockError) -> Self {
        Error::Clock(e)
    }
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Error::Storage(e)
    }
}
