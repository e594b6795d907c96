//! Scroll and alternate animations
//!
//! Every frame is drawn from scratch under the lock: renderables only set
//! bits, so the framebuffer is blanked before each composite frame.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;

use super::timing::{
    ALTERNATE_MS, LABEL_SCROLL_STEP_MS, SCROLL_IN_STEP_MS, SCROLL_THROUGH_STEP_MS,
};
use super::{pause, with, Shared};
use crate::error::Error;
use crate::graphics::text::CHAR_WIDTH;
use crate::graphics::WIDTH;
use crate::render::{Info, Renderable};
use crate::sequence::CircularSequence;
use crate::state::Controller;
use crate::traits::{Clock, MatrixDriver, Storage};

/// Pixel gap between two scrolling infos
pub const ITEM_GAP: i16 = 8;

/// Distance from one info's origin to the next
pub const ITEM_PITCH: i16 = WIDTH + ITEM_GAP;

/// Slide `info` in from the right edge until it sits at offset 0
///
/// Returns false as soon as the mode check fails.
pub async fn scroll_in<M, D, C, S, T>(
    shared: &Shared<M, D, C, S>,
    info: Info,
    delay: &mut T,
    live: impl Fn(&Controller) -> bool + Copy,
) -> Result<bool, Error>
where
    M: RawMutex,
    D: MatrixDriver,
    C: Clock,
    S: Storage,
    T: DelayNs,
{
    for x in (1..=WIDTH).rev() {
        with(shared, |sb| info.render(sb, x, true, true))?;
        if !pause(shared, delay, SCROLL_IN_STEP_MS, live).await {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Slide `current` out to the left while `next` follows one pitch behind
pub async fn scroll_through<M, D, C, S, T>(
    shared: &Shared<M, D, C, S>,
    current: Info,
    next: Info,
    delay: &mut T,
    live: impl Fn(&Controller) -> bool + Copy,
) -> Result<bool, Error>
where
    M: RawMutex,
    D: MatrixDriver,
    C: Clock,
    S: Storage,
    T: DelayNs,
{
    for x in (1 - ITEM_PITCH..=0).rev() {
        with(shared, |sb| {
            sb.board.display.fill(false);
            current.render(sb, x, false, false)?;
            next.render(sb, x + ITEM_PITCH, false, false)?;
            sb.board.display.push_frame().map_err(Error::from)
        })?;
        if !pause(shared, delay, SCROLL_THROUGH_STEP_MS, live).await {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Scroll endlessly through the sequence while basic mode lasts
pub async fn scroll_infos<M, D, C, S, T, const N: usize>(
    shared: &Shared<M, D, C, S>,
    sequence: &mut CircularSequence<Info, N>,
    delay: &mut T,
) -> Result<(), Error>
where
    M: RawMutex,
    D: MatrixDriver,
    C: Clock,
    S: Storage,
    T: DelayNs,
{
    let live = Controller::basic_mode;

    let mut current = sequence.next();
    if !scroll_in(shared, current, delay, live).await? {
        return Ok(());
    }
    loop {
        let next = sequence.next();
        if !scroll_through(shared, current, next, delay, live).await? {
            return Ok(());
        }
        current = next;
    }
}

/// Show each info for a fixed period while basic mode lasts
pub async fn alternate_infos<M, D, C, S, T, const N: usize>(
    shared: &Shared<M, D, C, S>,
    sequence: &mut CircularSequence<Info, N>,
    delay: &mut T,
) -> Result<(), Error>
where
    M: RawMutex,
    D: MatrixDriver,
    C: Clock,
    S: Storage,
    T: DelayNs,
{
    loop {
        let info = sequence.next();
        with(shared, |sb| info.render(sb, 0, true, true))?;
        if !pause(shared, delay, ALTERNATE_MS, Controller::basic_mode).await {
            return Ok(());
        }
    }
}

fn label_len<M, D, C, S>(shared: &Shared<M, D, C, S>) -> i16
where
    M: RawMutex,
    D: MatrixDriver,
    C: Clock,
    S: Storage,
{
    with(shared, |sb| sb.controller.usage().text_len() as i16)
}

/// Scroll the usage-flag text for as long as its editor is open
///
/// The first pass brings the text in from one character right of the
/// edge until its tail is visible. Every later pass draws a second copy
/// one gap behind, so the label loops seamlessly. The ON/OFF text is
/// re-read on every frame.
pub async fn scroll_label<M, D, C, S, T>(
    shared: &Shared<M, D, C, S>,
    delay: &mut T,
    live: impl Fn(&Controller) -> bool + Copy,
) -> Result<(), Error>
where
    M: RawMutex,
    D: MatrixDriver,
    C: Clock,
    S: Storage,
    T: DelayNs,
{
    let screen_chars = WIDTH / CHAR_WIDTH;
    let tail = |len: i16| -((len - screen_chars + 1) * CHAR_WIDTH);

    for x in (tail(label_len(shared)) + 1..=CHAR_WIDTH).rev() {
        with(shared, |sb| {
            let flag = *sb.controller.usage();
            flag.render(&mut sb.board.display, x, true, true)
        })?;
        if !pause(shared, delay, LABEL_SCROLL_STEP_MS, live).await {
            return Ok(());
        }
    }

    loop {
        let len = label_len(shared);
        let start = tail(len);
        let travel = ITEM_GAP + len * CHAR_WIDTH;
        for x in (start - travel + 1..=start).rev() {
            with(shared, |sb| {
                let flag = *sb.controller.usage();
                let display = &mut sb.board.display;
                display.fill(false);
                flag.render(display, x + travel, false, false)?;
                flag.render(display, x, false, false)?;
                display.push_frame()
            })?;
            if !pause(shared, delay, LABEL_SCROLL_STEP_MS, live).await {
                return Ok(());
            }
        }
    }
}
