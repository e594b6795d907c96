//! IR decoder UART receive task
//!
//! Receives key frames from the decoder and feeds them to the
//! dispatcher under the scoreboard lock. EEPROM write cycles are
//! waited out after the lock is released.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embassy_time::{Delay, Instant};
use embedded_io_async::Read;

use tabula_core::scheduler::{settle_storage, with};
use tabula_core::state::Event;
use tabula_protocol::{FrameParser, KeyEvent, RemoteMessage};

use crate::board::SharedBoard;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 32;

#[embassy_executor::task]
pub async fn remote_task(mut rx: BufferedUartRx, shared: &'static SharedBoard) {
    info!("Remote task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];
    let mut delay = Delay;

    loop {
        let n = match rx.read(&mut buf).await {
            Ok(n) => n,
            Err(e) => {
                warn!("UART read error: {:?}", e);
                continue;
            }
        };

        for &byte in &buf[..n] {
            match parser.feed(byte) {
                Ok(Some(frame)) => match RemoteMessage::from_frame(&frame) {
                    Some(RemoteMessage::Key(key)) => {
                        handle_key(shared, key);
                        settle_storage(shared, &mut delay).await;
                    }
                    Some(RemoteMessage::Ping) => trace!("PING received"),
                    None => warn!("Unknown frame type {:#x}", frame.kind),
                },
                Ok(None) => {}
                Err(e) => warn!("Frame parse error: {:?}", e),
            }
        }
    }
}

fn handle_key(shared: &SharedBoard, key: KeyEvent) {
    let now_ms = Instant::now().as_millis() as u32;
    let result = with(shared, |sb| sb.dispatch(now_ms, key.command, key.repeat));

    match result {
        Ok(Event::Signalled(transient)) => info!("Signal: {:?}", transient),
        Ok(event) => debug!("Key {:#x}: {:?}", key.command, event),
        Err(e) => warn!("Dispatch failed: {:?}", e),
    }
}
