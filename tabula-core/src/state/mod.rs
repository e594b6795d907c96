//! Remote-control state machine
//!
//! The [`Controller`] owns the current [`Mode`] and the values being
//! edited. Every decoded remote code goes through
//! [`Controller::dispatch`], which returns the [`Event`] describing what
//! happened. The cooperative routines only read the mode and render.

pub mod buttons;
pub mod controller;
pub mod events;
pub mod input;
pub mod mode;

pub use buttons::Button;
pub use controller::Controller;
pub use events::Event;
pub use input::{Debounce, HoldCounter};
pub use mode::{EditTarget, Mode, Transient};
