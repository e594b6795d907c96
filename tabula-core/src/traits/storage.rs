//! Non-volatile storage trait

use crate::config::Config;
use crate::values::Points;

/// Errors that can occur with the persistent storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// I2C transfer failed
    Bus,
    /// Device still busy with its previous write
    Busy,
}

/// Trait for the configuration and last-score store
///
/// The byte layout is owned by the implementation; the core only sees
/// the decoded records.
pub trait Storage {
    /// Load the persisted configuration
    fn read_config(&mut self) -> Result<Config, StorageError>;

    /// Persist the configuration
    fn write_config(&mut self, config: &Config) -> Result<(), StorageError>;

    /// Load the score that was showing at last power-down
    fn read_last_score(&mut self) -> Result<Points, StorageError>;

    /// Persist the current score
    fn write_last_score(&mut self, points: Points) -> Result<(), StorageError>;

    /// Milliseconds the last write still needs to complete, reported once
    ///
    /// Callers wait this out after releasing the shared state so the
    /// remote input path is never held off for a write cycle.
    fn take_write_cycle(&mut self) -> Option<u32> {
        None
    }
}
