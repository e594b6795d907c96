//! Cooperative routines and the lock they share with the dispatcher
//!
//! Three long-lived routines (heartbeat, basic view, settings view) are
//! polled together with an exit watcher. They suspend only at fixed
//! millisecond delays. All state they read lives in one [`Shared`]
//! scoreboard; every multi-step render happens inside a single
//! [`with`] call, so the dispatcher (which takes the same lock from a
//! higher-priority context) never observes or interleaves a half-drawn
//! frame. The lock is never held across an `.await`.

pub mod animation;
pub mod routines;

use core::cell::RefCell;

use embassy_futures::select::{select4, Either4};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embedded_hal::digital::StatefulOutputPin;
use embedded_hal_async::delay::DelayNs;

use crate::board::Scoreboard;
use crate::error::Error;
use crate::state::Controller;
use crate::traits::{Clock, MatrixDriver, Storage};

/// Timing of every routine and animation, in milliseconds
pub mod timing {
    pub const HEARTBEAT_MS: u32 = 500;
    pub const EXIT_POLL_MS: u32 = 2000;
    /// Poll period of a routine whose mode is inactive
    pub const IDLE_POLL_MS: u32 = 10;

    pub const SCROLL_IN_STEP_MS: u32 = 10;
    pub const SCROLL_THROUGH_STEP_MS: u32 = 5;
    pub const ALTERNATE_MS: u32 = 2000;
    pub const LABEL_SCROLL_STEP_MS: u32 = 20;

    pub const BLINK_OFF_MS: u32 = 300;
    pub const BLINK_ON_MS: u32 = 650;
    pub const BRIGHTNESS_POLL_MS: u32 = 20;
    pub const REINIT_FLASH_MS: u32 = 300;

    pub const RESET_PAUSE_MS: u32 = 1500;
    /// Show, blank the side, show, then show the reverted score
    pub const REVERT_STEPS_MS: [u32; 4] = [400, 300, 400, 900];
}

/// Scoreboard behind a blocking mutex
///
/// On target the raw mutex is a critical section, which masks the
/// remote-input interrupt for the duration of each access.
pub type Shared<M, D, C, S> = Mutex<M, RefCell<Scoreboard<D, C, S>>>;

pub fn shared<M, D, C, S>(scoreboard: Scoreboard<D, C, S>) -> Shared<M, D, C, S>
where
    M: RawMutex,
    D: MatrixDriver,
    C: Clock,
    S: Storage,
{
    Mutex::new(RefCell::new(scoreboard))
}

/// Run `f` with exclusive access to the scoreboard
pub fn with<M, D, C, S, R>(
    shared: &Shared<M, D, C, S>,
    f: impl FnOnce(&mut Scoreboard<D, C, S>) -> R,
) -> R
where
    M: RawMutex,
    D: MatrixDriver,
    C: Clock,
    S: Storage,
{
    shared.lock(|cell| f(&mut cell.borrow_mut()))
}

/// Sleep, then report whether the caller's mode is still active
///
/// The active routine also honours a pending re-init flash here by
/// holding the bar on screen a little longer before it draws again.
pub(crate) async fn pause<M, D, C, S, T>(
    shared: &Shared<M, D, C, S>,
    delay: &mut T,
    ms: u32,
    live: impl Fn(&Controller) -> bool,
) -> bool
where
    M: RawMutex,
    D: MatrixDriver,
    C: Clock,
    S: Storage,
    T: DelayNs,
{
    delay.delay_ms(ms).await;

    let flash = with(shared, |sb| {
        live(&sb.controller) && sb.controller.take_reinit_flash()
    });
    if flash {
        delay.delay_ms(timing::REINIT_FLASH_MS).await;
    }

    with(shared, |sb| live(&sb.controller))
}

/// Wait out a storage write cycle with the lock released
///
/// Call after any locked section that may have written to storage.
pub async fn settle_storage<M, D, C, S, T>(shared: &Shared<M, D, C, S>, delay: &mut T)
where
    M: RawMutex,
    D: MatrixDriver,
    C: Clock,
    S: Storage,
    T: DelayNs,
{
    if let Some(ms) = with(shared, |sb| sb.board.storage.take_write_cycle()) {
        delay.delay_ms(ms).await;
    }
}

/// Run every routine until the exit signal (or a collaborator error)
///
/// The exit watcher polls the pending `Exit` signal; the other routines
/// only ever finish with an error.
pub async fn run<M, D, C, S, L, T>(
    shared: &Shared<M, D, C, S>,
    led: L,
    delay: T,
) -> Result<(), Error>
where
    M: RawMutex,
    D: MatrixDriver,
    C: Clock,
    S: Storage,
    L: StatefulOutputPin,
    T: DelayNs + Clone,
{
    let outcome = select4(
        routines::heartbeat(led, delay.clone()),
        routines::basic_view(shared, delay.clone()),
        routines::settings_view(shared, delay.clone()),
        routines::exit_watcher(shared, delay),
    )
    .await;

    match outcome {
        Either4::First(never) => match never {},
        Either4::Second(result) | Either4::Third(result) => result.map(|never| match never {}),
        Either4::Fourth(()) => Ok(()),
    }
}
