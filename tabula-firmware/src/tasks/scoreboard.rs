//! View routines task

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::Delay;

use tabula_core::scheduler::{self, with};

use crate::board::SharedBoard;

#[embassy_executor::task]
pub async fn scoreboard_task(shared: &'static SharedBoard, led: Output<'static>) {
    info!("Running");

    match scheduler::run(shared, led, Delay).await {
        Ok(()) => info!("Exit"),
        Err(e) => error!("Scoreboard stopped: {:?}", e),
    }

    if let Err(e) = with(shared, |sb| sb.board.display.power_off()) {
        warn!("Display power off failed: {:?}", e);
    }
}
