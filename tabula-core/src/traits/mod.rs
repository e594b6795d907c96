//! Collaborator traits
//!
//! These traits define the interface between the scoreboard logic
//! and the hardware-specific drivers: the LED matrix, the real-time
//! clock and the non-volatile storage.

pub mod clock;
pub mod matrix;
pub mod storage;

pub use clock::{Clock, ClockError, DateTime};
pub use matrix::{DisplayError, MatrixDriver};
pub use storage::{Storage, StorageError};
