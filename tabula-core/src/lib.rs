//! Board-agnostic core logic for the scoreboard firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (matrix driver, real-time clock, storage)
//! - Vector glyph fonts and the 32x16 framebuffer
//! - Renderable value models (score, date, time, temperature, brightness)
//! - Remote-control state machine and button dispatcher
//! - Cooperative routines (heartbeat, basic view, settings view)

#![no_std]
#![deny(unsafe_code)]

pub mod board;
pub mod config;
pub mod display;
pub mod error;
pub mod graphics;
pub mod render;
pub mod scheduler;
pub mod sequence;
pub mod state;
pub mod traits;
pub mod values;

#[cfg(test)]
pub(crate) mod testing;

pub use board::{Board, Scoreboard};
pub use error::Error;
