//! Hardware handles shared by the controller and the routines

use crate::display::Display;
use crate::error::Error;
use crate::state::{Controller, Event};
use crate::traits::{Clock, MatrixDriver, Storage};

/// The three collaborators, passed explicitly instead of living in globals
pub struct Board<D: MatrixDriver, C: Clock, S: Storage> {
    pub display: Display<D>,
    pub clock: C,
    pub storage: S,
}

impl<D: MatrixDriver, C: Clock, S: Storage> Board<D, C, S> {
    pub fn new(display: Display<D>, clock: C, storage: S) -> Self {
        Self {
            display,
            clock,
            storage,
        }
    }
}

/// Everything the dispatcher and the views touch, kept behind one lock
pub struct Scoreboard<D: MatrixDriver, C: Clock, S: Storage> {
    pub controller: Controller,
    pub board: Board<D, C, S>,
}

impl<D: MatrixDriver, C: Clock, S: Storage> Scoreboard<D, C, S> {
    /// Load the persisted score and brightness and start in basic mode
    pub fn new(mut board: Board<D, C, S>) -> Result<Self, Error> {
        let controller = Controller::load(&mut board)?;
        Ok(Self { controller, board })
    }

    /// Feed one decoded remote event through the dispatcher
    pub fn dispatch(&mut self, now_ms: u32, code: u8, repeat: bool) -> Result<Event, Error> {
        self.controller.dispatch(&mut self.board, now_ms, code, repeat)
    }
}
