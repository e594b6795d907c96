//! Remote link protocol
//!
//! Infrared decoding happens on a small companion MCU that forwards
//! each NEC key frame to the scoreboard over UART. Every message is
//! wrapped in a short binary frame:
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────────┐
//! │ START │ LENGTH │ TYPE │ PAYLOAD     │ CHECKSUM │
//! │ 1B    │ 1B     │ 1B   │ 0–16B       │ 1B       │
//! └───────┴────────┴──────┴─────────────┴──────────┘
//! ```
//!
//! The scoreboard only listens; nothing is ever sent back.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod remote;

pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_PAYLOAD_SIZE};
pub use remote::{KeyEvent, RemoteMessage};
