//! Embassy tasks
//!
//! - `remote_task` runs on the interrupt executor so a button press
//!   preempts whatever view is animating.
//! - `scoreboard_task` runs the cooperative routines in thread mode.

mod remote;
mod scoreboard;

pub use remote::remote_task;
pub use scoreboard::scoreboard_task;
