//! The long-lived routines
//!
//! Each routine loops forever; only [`exit_watcher`] finishes normally.
//! A routine whose mode is inactive idles at [`IDLE_POLL_MS`].

use core::convert::Infallible;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal::digital::StatefulOutputPin;
use embedded_hal_async::delay::DelayNs;

use super::animation;
use super::timing::{
    ALTERNATE_MS, BLINK_OFF_MS, BLINK_ON_MS, BRIGHTNESS_POLL_MS, EXIT_POLL_MS, HEARTBEAT_MS,
    IDLE_POLL_MS, RESET_PAUSE_MS, REVERT_STEPS_MS,
};
use super::{pause, settle_storage, with, Shared};
use crate::board::Scoreboard;
use crate::error::Error;
use crate::render::{Info, Renderable};
use crate::sequence::CircularSequence;
use crate::state::mode::BlinkRegion;
use crate::state::{Controller, EditTarget, Mode, Transient};
use crate::traits::{Clock, DisplayError, MatrixDriver, Storage};

/// Toggle the on-board LED forever
pub async fn heartbeat<L, T>(mut led: L, mut delay: T) -> Infallible
where
    L: StatefulOutputPin,
    T: DelayNs,
{
    loop {
        // a stuck LED is not worth stopping the board for
        let _ = led.toggle();
        delay.delay_ms(HEARTBEAT_MS).await;
    }
}

/// Finish once the exit signal is pending
pub async fn exit_watcher<M, D, C, S, T>(shared: &Shared<M, D, C, S>, mut delay: T)
where
    M: RawMutex,
    D: MatrixDriver,
    C: Clock,
    S: Storage,
    T: DelayNs,
{
    while !with(shared, |sb| sb.controller.is_exit_pending()) {
        delay.delay_ms(EXIT_POLL_MS).await;
    }
}

/// Rotate through the enabled infos while in basic mode
///
/// The configuration is re-read every time basic mode is (re-)entered,
/// so a usage or scroll change takes effect on return from its editor.
pub async fn basic_view<M, D, C, S, T>(
    shared: &Shared<M, D, C, S>,
    mut delay: T,
) -> Result<Infallible, Error>
where
    M: RawMutex,
    D: MatrixDriver,
    C: Clock,
    S: Storage,
    T: DelayNs,
{
    loop {
        if !with(shared, |sb| sb.controller.basic_mode()) {
            delay.delay_ms(IDLE_POLL_MS).await;
            continue;
        }

        let config = with(shared, |sb| sb.board.storage.read_config())?;
        let infos = Info::enabled(&config);
        if infos.is_empty() {
            with(shared, |sb| {
                sb.board.display.fill(false);
                sb.board.display.push_frame()
            })?;
            pause(shared, &mut delay, ALTERNATE_MS, Controller::basic_mode).await;
            continue;
        }

        let mut sequence = CircularSequence::new(infos)?;
        if config.scroll {
            animation::scroll_infos(shared, &mut sequence, &mut delay).await?;
        } else {
            animation::alternate_infos(shared, &mut sequence, &mut delay).await?;
        }
    }
}

/// Drive whatever editor or signal is active outside basic mode
pub async fn settings_view<M, D, C, S, T>(
    shared: &Shared<M, D, C, S>,
    mut delay: T,
) -> Result<Infallible, Error>
where
    M: RawMutex,
    D: MatrixDriver,
    C: Clock,
    S: Storage,
    T: DelayNs,
{
    loop {
        match with(shared, |sb| sb.controller.mode()) {
            Mode::Basic | Mode::Signal(Transient::Exit) => {
                delay.delay_ms(IDLE_POLL_MS).await;
            }
            Mode::Edit(EditTarget::Usage(_)) => {
                let live = |c: &Controller| matches!(c.mode(), Mode::Edit(EditTarget::Usage(_)));
                animation::scroll_label(shared, &mut delay, live).await?;
            }
            Mode::Edit(EditTarget::Brightness) => brightness_step(shared, &mut delay).await?,
            Mode::Edit(target) => blink_step(shared, &mut delay, target).await?,
            Mode::Signal(Transient::ScoreReset) => score_reset(shared, &mut delay).await?,
            Mode::Signal(Transient::RevertScore) => score_revert(shared, &mut delay).await?,
        }
    }
}

fn render_field<D, C, S>(sb: &mut Scoreboard<D, C, S>, target: EditTarget) -> Result<(), Error>
where
    D: MatrixDriver,
    C: Clock,
    S: Storage,
{
    let display = &mut sb.board.display;
    if target.is_score() {
        sb.controller.score().render(display, 0, true, true)?;
    } else if target.is_date() {
        sb.controller.date().render_setting(display)?;
    } else if target.is_time() {
        sb.controller.time().render(display, 0, true, true)?;
    }
    Ok(())
}

/// One off/on cycle of the blinking field editor
async fn blink_step<M, D, C, S, T>(
    shared: &Shared<M, D, C, S>,
    delay: &mut T,
    target: EditTarget,
) -> Result<(), Error>
where
    M: RawMutex,
    D: MatrixDriver,
    C: Clock,
    S: Storage,
    T: DelayNs,
{
    let Some(region) = target.blink_region() else {
        delay.delay_ms(IDLE_POLL_MS).await;
        return Ok(());
    };
    let live = move |c: &Controller| c.mode() == Mode::Edit(target);

    let blanked = with(shared, |sb| -> Result<bool, Error> {
        if !live(&sb.controller) {
            return Ok(false);
        }
        let display = &mut sb.board.display;
        match region {
            BlinkRegion::Half(side) => display.clear_half(side)?,
            BlinkRegion::Quarter(quadrant) => display.clear_quarter(quadrant)?,
            BlinkRegion::Row(row) => display.clear_row(row)?,
        }
        Ok(true)
    })?;
    if !blanked || !pause(shared, delay, BLINK_OFF_MS, live).await {
        return Ok(());
    }

    with(shared, |sb| render_field(sb, target))?;
    pause(shared, delay, BLINK_ON_MS, live).await;
    Ok(())
}

/// Apply and redraw a pending brightness change, then poll again
async fn brightness_step<M, D, C, S, T>(shared: &Shared<M, D, C, S>, delay: &mut T) -> Result<(), Error>
where
    M: RawMutex,
    D: MatrixDriver,
    C: Clock,
    S: Storage,
    T: DelayNs,
{
    let live = |c: &Controller| c.mode() == Mode::Edit(EditTarget::Brightness);

    with(shared, |sb| {
        if live(&sb.controller) {
            sb.controller.flush_brightness(&mut sb.board.display)?;
        }
        Ok::<_, DisplayError>(())
    })?;
    pause(shared, delay, BRIGHTNESS_POLL_MS, live).await;
    Ok(())
}

async fn score_reset<M, D, C, S, T>(shared: &Shared<M, D, C, S>, delay: &mut T) -> Result<(), Error>
where
    M: RawMutex,
    D: MatrixDriver,
    C: Clock,
    S: Storage,
    T: DelayNs,
{
    with(shared, |sb| -> Result<(), Error> {
        sb.controller.reset_score(&mut sb.board.storage)?;
        sb.controller.score().render(&mut sb.board.display, 0, true, true)?;
        Ok(())
    })?;
    settle_storage(shared, delay).await;
    delay.delay_ms(RESET_PAUSE_MS).await;
    with(shared, |sb| sb.controller.finish_signal());
    Ok(())
}

/// Show the score, blink the side about to change, then revert it
///
/// Input stays masked from the moment the long press fired until the
/// reverted score has been on screen for the final pause.
async fn score_revert<M, D, C, S, T>(shared: &Shared<M, D, C, S>, delay: &mut T) -> Result<(), Error>
where
    M: RawMutex,
    D: MatrixDriver,
    C: Clock,
    S: Storage,
    T: DelayNs,
{
    let [show_ms, blank_ms, reshow_ms, settle_ms] = REVERT_STEPS_MS;
    let show = |sb: &mut Scoreboard<D, C, S>| {
        sb.controller
            .score()
            .render(&mut sb.board.display, 0, true, true)
    };

    with(shared, show)?;
    delay.delay_ms(show_ms).await;

    with(shared, |sb| match sb.controller.score().last_changed() {
        Some(side) => sb.board.display.clear_half(side),
        None => Ok(()),
    })?;
    delay.delay_ms(blank_ms).await;

    with(shared, show)?;
    delay.delay_ms(reshow_ms).await;

    with(shared, |sb| -> Result<(), Error> {
        sb.controller.revert_score(&mut sb.board.storage)?;
        show(sb)?;
        Ok(())
    })?;
    settle_storage(shared, delay).await;
    delay.delay_ms(settle_ms).await;

    with(shared, |sb| {
        sb.controller.unmask_input();
        sb.controller.finish_signal();
    });
    Ok(())
}
