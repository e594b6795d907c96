//! Renderable value models
//!
//! Each model is a plain value with clamping or cyclic mutators and a
//! [`Renderable`](crate::render::Renderable) implementation. Persistence
//! and clock I/O are explicit calls taking the collaborator, so the
//! models stay testable without hardware.

pub mod brightness;
pub mod date;
pub mod score;
pub mod temperature;
pub mod time;
pub mod usage;

pub use brightness::Brightness;
pub use date::DateValue;
pub use score::{Points, Score, ScoreLayout, MAX_SCORE};
pub use temperature::Temperature;
pub use time::TimeValue;
pub use usage::{UsageFlag, UsageKind};
