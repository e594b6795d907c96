//! Button dispatcher and the values it edits
//!
//! The controller runs from the remote input path, which on target
//! preempts the views. It only flips the mode, mutates working copies
//! and performs short immediate renders; the blinking, scrolling and
//! timed animations belong to the routines in [`crate::scheduler`].

use crate::board::Board;
use crate::display::{Display, Side};
use crate::error::Error;
use crate::render::Renderable;
use crate::traits::{Clock, DisplayError, MatrixDriver, Storage, StorageError};
use crate::values::{Brightness, DateValue, Points, Score, TimeValue, UsageFlag, UsageKind};

use super::buttons::Button;
use super::events::Event;
use super::input::{Debounce, HoldCounter};
use super::mode::{EditTarget, Mode, Transient};

/// Remote-control state plus the working copies being edited
#[derive(Debug, Clone)]
pub struct Controller {
    mode: Mode,
    last_button: Option<Button>,
    reset_hold: HoldCounter,
    revert_hold: HoldCounter,
    exit_hold: HoldCounter,
    debounce: Debounce,
    input_masked: bool,
    reinit_flash: bool,
    score: Score,
    date: DateValue,
    time: TimeValue,
    brightness: Brightness,
    usage: UsageFlag,
}

fn score_side(target: EditTarget) -> Side {
    if target == EditTarget::LeftScore {
        Side::Left
    } else {
        Side::Right
    }
}

impl Controller {
    pub fn new(score: Points, brightness: u8) -> Self {
        Self {
            mode: Mode::Basic,
            last_button: None,
            reset_hold: HoldCounter::default(),
            revert_hold: HoldCounter::default(),
            exit_hold: HoldCounter::default(),
            debounce: Debounce::new(),
            input_masked: false,
            reinit_flash: false,
            score: Score::new(score),
            date: DateValue::default(),
            time: TimeValue::default(),
            brightness: Brightness::new(brightness),
            usage: UsageFlag::new(UsageKind::Score, true),
        }
    }

    /// Boot state from persisted score and configuration
    pub fn load<D: MatrixDriver, C: Clock, S: Storage>(
        board: &mut Board<D, C, S>,
    ) -> Result<Self, Error> {
        let score = board.storage.read_last_score()?;
        let config = board.storage.read_config()?;
        Ok(Self::new(score, config.brightness()))
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// True iff no editor is open and no signal is pending
    pub fn basic_mode(&self) -> bool {
        self.mode.is_basic()
    }

    pub fn is_exit_pending(&self) -> bool {
        self.mode.is_exit()
    }

    pub fn is_input_masked(&self) -> bool {
        self.input_masked
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn date(&self) -> &DateValue {
        &self.date
    }

    pub fn time(&self) -> &TimeValue {
        &self.time
    }

    pub fn brightness(&self) -> &Brightness {
        &self.brightness
    }

    pub fn usage(&self) -> &UsageFlag {
        &self.usage
    }

    /// Consume the "hold the re-init bar" request left by Hash
    pub fn take_reinit_flash(&mut self) -> bool {
        core::mem::take(&mut self.reinit_flash)
    }

    /// Dispatch one decoded remote event
    ///
    /// A repeat frame re-dispatches the last accepted button, but only
    /// for the hold-repeatable ones (Up, Down, "0", OK). A fresh press
    /// restarts every long-press counter before it is handled.
    pub fn dispatch<D: MatrixDriver, C: Clock, S: Storage>(
        &mut self,
        board: &mut Board<D, C, S>,
        now_ms: u32,
        code: u8,
        repeat: bool,
    ) -> Result<Event, Error> {
        if self.input_masked {
            return Ok(Event::Masked);
        }

        let button = if repeat {
            match self.last_button {
                Some(button) if button.repeats() => button,
                _ => return Ok(Event::Ignored),
            }
        } else {
            self.reset_hold.reset();
            self.revert_hold.reset();
            self.exit_hold.reset();
            self.last_button = Button::from_code(code);
            match self.last_button {
                Some(button) => button,
                None => return Ok(Event::Ignored),
            }
        };

        self.handle(board, now_ms, button, repeat)
    }

    fn handle<D: MatrixDriver, C: Clock, S: Storage>(
        &mut self,
        board: &mut Board<D, C, S>,
        now_ms: u32,
        button: Button,
        repeat: bool,
    ) -> Result<Event, Error> {
        match button {
            Button::Num0 => self.on_zero(board),
            Button::Num1 | Button::Num2 => Ok(Event::Ignored),
            Button::Num3 => self.start_usage_edit(board, UsageKind::Score),
            Button::Num4 => self.start_usage_edit(board, UsageKind::Date),
            Button::Num5 => self.start_usage_edit(board, UsageKind::Time),
            Button::Num6 => self.start_usage_edit(board, UsageKind::Temperature),
            Button::Num7 => self.start_usage_edit(board, UsageKind::Scroll),
            Button::Num8 => self.start_date_edit(board),
            Button::Num9 => Ok(self.start_brightness_edit()),
            Button::Left => self.start_score_edit(board, EditTarget::LeftScore),
            Button::Right => self.start_score_edit(board, EditTarget::RightScore),
            Button::Up => self.on_step(board, now_ms, true),
            Button::Down => self.on_step(board, now_ms, false),
            Button::Star => self.toggle_power(board),
            Button::Hash => self.reinit(board),
            // Holding OK must not race through the date/time fields
            Button::Ok if repeat && !self.mode.is_basic() => Ok(Event::Ignored),
            Button::Ok => self.on_ok(board),
        }
    }

    /// Count a long-press frame; fire the signal at the threshold
    fn hold(&mut self, transient: Transient) -> Event {
        let counter = match transient {
            Transient::ScoreReset => &mut self.reset_hold,
            Transient::RevertScore => &mut self.revert_hold,
            Transient::Exit => &mut self.exit_hold,
        };
        if !counter.tick() {
            return Event::Holding(transient, counter.count());
        }

        self.mode = Mode::Signal(transient);
        if transient == Transient::RevertScore {
            self.input_masked = true;
        }
        Event::Signalled(transient)
    }

    fn start_score_edit<D: MatrixDriver, C: Clock, S: Storage>(
        &mut self,
        board: &mut Board<D, C, S>,
        target: EditTarget,
    ) -> Result<Event, Error> {
        if !self.mode.is_basic() {
            return Ok(Event::Ignored);
        }
        self.mode = Mode::Edit(target);
        self.score.render(&mut board.display, 0, true, true)?;
        Ok(Event::EditStarted(target))
    }

    fn start_usage_edit<D: MatrixDriver, C: Clock, S: Storage>(
        &mut self,
        board: &mut Board<D, C, S>,
        kind: UsageKind,
    ) -> Result<Event, Error> {
        if !self.mode.is_basic() {
            return Ok(Event::Ignored);
        }
        self.usage = UsageFlag::load(kind, &mut board.storage)?;
        let target = EditTarget::Usage(kind);
        self.mode = Mode::Edit(target);
        Ok(Event::EditStarted(target))
    }

    fn start_date_edit<D: MatrixDriver, C: Clock, S: Storage>(
        &mut self,
        board: &mut Board<D, C, S>,
    ) -> Result<Event, Error> {
        if !self.mode.is_basic() {
            return Ok(Event::Ignored);
        }
        self.date = DateValue::pull(&mut board.clock)?;
        self.mode = Mode::Edit(EditTarget::Day);
        self.date.render_setting(&mut board.display)?;
        Ok(Event::EditStarted(EditTarget::Day))
    }

    fn start_brightness_edit(&mut self) -> Event {
        if !self.mode.is_basic() {
            return Event::Ignored;
        }
        self.brightness.mark_changed();
        self.mode = Mode::Edit(EditTarget::Brightness);
        Event::EditStarted(EditTarget::Brightness)
    }

    fn on_zero<D: MatrixDriver, C: Clock, S: Storage>(
        &mut self,
        board: &mut Board<D, C, S>,
    ) -> Result<Event, Error> {
        let target = match self.mode {
            Mode::Basic => return Ok(self.hold(Transient::ScoreReset)),
            Mode::Edit(target) => target,
            Mode::Signal(_) => return Ok(Event::Ignored),
        };

        match target {
            EditTarget::LeftScore | EditTarget::RightScore => {
                let side = score_side(target);
                self.change_score(&mut board.storage, |score| score.set(side, 0))?;
                self.score.render(&mut board.display, 0, true, true)?;
            }
            EditTarget::Hour | EditTarget::Minute => {
                if target == EditTarget::Hour {
                    self.time.hour = 0;
                } else {
                    self.time.minute = 0;
                }
                self.time.render(&mut board.display, 0, true, true)?;
            }
            EditTarget::Brightness => {
                self.brightness.set(0);
                self.brightness.mark_changed();
            }
            _ => return Ok(Event::Ignored),
        }
        Ok(Event::Adjusted(target))
    }

    fn on_step<D: MatrixDriver, C: Clock, S: Storage>(
        &mut self,
        board: &mut Board<D, C, S>,
        now_ms: u32,
        up: bool,
    ) -> Result<Event, Error> {
        let target = match self.mode {
            Mode::Basic if !up => return Ok(self.hold(Transient::RevertScore)),
            Mode::Edit(target) => target,
            _ => return Ok(Event::Ignored),
        };

        match target {
            EditTarget::LeftScore | EditTarget::RightScore => {
                if !self.debounce.accept(now_ms) {
                    return Ok(Event::Debounced);
                }
                let side = score_side(target);
                self.change_score(&mut board.storage, |score| {
                    if up {
                        score.incr(side)
                    } else {
                        score.decr(side)
                    }
                })?;
                self.score.render(&mut board.display, 0, true, true)?;
            }
            EditTarget::Usage(_) => self.usage.enabled = up,
            EditTarget::Day | EditTarget::Month | EditTarget::Year => {
                match (target, up) {
                    (EditTarget::Day, true) => self.date.incr_day(),
                    (EditTarget::Day, false) => self.date.decr_day(),
                    (EditTarget::Month, true) => self.date.incr_month(),
                    (EditTarget::Month, false) => self.date.decr_month(),
                    (_, true) => self.date.incr_year(),
                    (_, false) => self.date.decr_year(),
                }
                self.date.render_setting(&mut board.display)?;
            }
            EditTarget::Hour | EditTarget::Minute => {
                match (target, up) {
                    (EditTarget::Hour, true) => self.time.incr_hour(),
                    (EditTarget::Hour, false) => self.time.decr_hour(),
                    (_, true) => self.time.incr_minute(),
                    (_, false) => self.time.decr_minute(),
                }
                self.time.render(&mut board.display, 0, true, true)?;
            }
            EditTarget::Brightness => {
                if !self.debounce.accept(now_ms) {
                    return Ok(Event::Debounced);
                }
                if up {
                    self.brightness.incr();
                } else {
                    self.brightness.decr();
                }
                self.brightness.mark_changed();
            }
        }
        Ok(Event::Adjusted(target))
    }

    fn on_ok<D: MatrixDriver, C: Clock, S: Storage>(
        &mut self,
        board: &mut Board<D, C, S>,
    ) -> Result<Event, Error> {
        let target = match self.mode {
            Mode::Basic => return Ok(self.hold(Transient::Exit)),
            Mode::Edit(target) => target,
            Mode::Signal(_) => return Ok(Event::Ignored),
        };

        match target {
            EditTarget::LeftScore | EditTarget::RightScore => {
                self.score.save(&mut board.storage)?;
            }
            EditTarget::Usage(_) => self.usage.save(&mut board.storage)?,
            EditTarget::Day | EditTarget::Month => {
                self.date.validate_max_days();
                return Ok(self.advance(target));
            }
            EditTarget::Year => {
                self.date.push(&mut board.clock)?;
                self.time = TimeValue::pull(&mut board.clock)?;
                return Ok(self.advance(target));
            }
            EditTarget::Hour => return Ok(self.advance(target)),
            EditTarget::Minute => self.time.push(&mut board.clock)?,
            EditTarget::Brightness => self.brightness.save(&mut board.storage)?,
        }

        self.mode = Mode::Basic;
        Ok(Event::Committed(target))
    }

    fn advance(&mut self, from: EditTarget) -> Event {
        match from.next_field() {
            Some(next) => {
                self.mode = Mode::Edit(next);
                Event::FieldAdvanced(next)
            }
            None => Event::Ignored,
        }
    }

    fn toggle_power<D: MatrixDriver, C: Clock, S: Storage>(
        &mut self,
        board: &mut Board<D, C, S>,
    ) -> Result<Event, Error> {
        if board.display.is_powered() {
            board.display.power_off()?;
        } else {
            board.display.power_on()?;
        }
        Ok(Event::PowerToggled(board.display.is_powered()))
    }

    fn reinit<D: MatrixDriver, C: Clock, S: Storage>(
        &mut self,
        board: &mut Board<D, C, S>,
    ) -> Result<Event, Error> {
        board.display.reinit(self.brightness.level())?;
        self.reinit_flash = true;
        Ok(Event::Reinitialized)
    }

    // Routine-side operations

    /// Apply and redraw a pending brightness change
    pub fn flush_brightness<D: MatrixDriver>(
        &mut self,
        display: &mut Display<D>,
    ) -> Result<bool, DisplayError> {
        if !self.brightness.take_changed() {
            return Ok(false);
        }
        self.brightness.apply(display)?;
        self.brightness.render(display, 0, true, true)?;
        Ok(true)
    }

    /// Zero both sides and persist
    pub fn reset_score<S: Storage>(&mut self, storage: &mut S) -> Result<(), StorageError> {
        self.change_score(storage, Score::reset)
    }

    /// Undo the last score change and persist
    pub fn revert_score<S: Storage>(&mut self, storage: &mut S) -> Result<(), StorageError> {
        self.change_score(storage, Score::revert)
    }

    /// Apply `change` and persist it, rolling back if the write fails
    fn change_score<S: Storage>(
        &mut self,
        storage: &mut S,
        change: impl FnOnce(&mut Score),
    ) -> Result<(), StorageError> {
        let before = self.score;
        change(&mut self.score);
        if let Err(e) = self.score.save(storage) {
            self.score = before;
            return Err(e);
        }
        Ok(())
    }

    /// Re-enable input after the revert animation
    pub fn unmask_input(&mut self) {
        self.input_masked = false;
    }

    /// Return to basic mode once a reset/revert animation has played
    ///
    /// A pending exit is never cleared.
    pub fn finish_signal(&mut self) {
        if matches!(
            self.mode,
            Mode::Signal(Transient::ScoreReset | Transient::RevertScore)
        ) {
            self.mode = Mode::Basic;
        }
    }
}
