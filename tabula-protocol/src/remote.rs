//! Messages sent by the IR decoder

use crate::frame::Frame;

/// Message type identifiers
pub mod kind {
    /// Decoder is alive, no payload
    pub const PING: u8 = 0x01;
    /// One decoded NEC frame: `[address, command, flags]`
    pub const KEY: u8 = 0x30;
}

/// `flags` bit set on NEC repeat codes (button still held)
pub const FLAG_REPEAT: u8 = 0x01;

const KEY_PAYLOAD_LEN: usize = 3;

/// A decoded remote key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    /// NEC address byte of the remote
    pub address: u8,
    /// NEC command byte identifying the button
    pub command: u8,
    /// Repeat code rather than a fresh press
    pub repeat: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RemoteMessage {
    Ping,
    Key(KeyEvent),
}

impl RemoteMessage {
    /// Interpret a frame; unknown types and malformed payloads give `None`
    pub fn from_frame(frame: &Frame) -> Option<Self> {
        match (frame.kind, frame.payload.as_slice()) {
            (kind::PING, []) => Some(RemoteMessage::Ping),
            (kind::KEY, &[address, command, flags]) => Some(RemoteMessage::Key(KeyEvent {
                address,
                command,
                repeat: flags & FLAG_REPEAT != 0,
            })),
            _ => None,
        }
    }

    pub fn to_frame(&self) -> Frame {
        let mut payload = [0u8; KEY_PAYLOAD_LEN];
        let (kind, len) = match self {
            RemoteMessage::Ping => (kind::PING, 0),
            RemoteMessage::Key(key) => {
                payload = [key.address, key.command, u8::from(key.repeat)];
                (kind::KEY, KEY_PAYLOAD_LEN)
            }
        };
        Frame {
            kind,
            payload: heapless::Vec::from_slice(&payload[..len]).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameParser;

    fn parse(bytes: &[u8]) -> Option<RemoteMessage> {
        let mut parser = FrameParser::new();
        let mut message = None;
        for &byte in bytes {
            if let Ok(Some(frame)) = parser.feed(byte) {
                message = RemoteMessage::from_frame(&frame);
            }
        }
        message
    }

    #[test]
    fn test_key_event_from_wire() {
        // OK button, fresh press
        let checksum = 3 ^ kind::KEY ^ 0x1C;
        let message = parse(&[0xAA, 3, kind::KEY, 0x00, 0x1C, 0x00, checksum]);

        assert_eq!(
            message,
            Some(RemoteMessage::Key(KeyEvent {
                address: 0x00,
                command: 0x1C,
                repeat: false,
            }))
        );
    }

    #[test]
    fn test_repeat_flag() {
        let frame = Frame::new(kind::KEY, &[0x00, 0x18, 0x81]).unwrap();
        let Some(RemoteMessage::Key(key)) = RemoteMessage::from_frame(&frame) else {
            panic!("expected a key event");
        };
        assert!(key.repeat);
        assert_eq!(key.command, 0x18);
    }

    #[test]
    fn test_ping() {
        assert_eq!(parse(&[0xAA, 0, kind::PING, kind::PING]), Some(RemoteMessage::Ping));
    }

    #[test]
    fn test_malformed_payloads_are_dropped() {
        let short = Frame::new(kind::KEY, &[0x00, 0x18]).unwrap();
        let ping_with_data = Frame::new(kind::PING, &[0x01]).unwrap();
        let unknown = Frame::new(0x7F, &[]).unwrap();

        assert_eq!(RemoteMessage::from_frame(&short), None);
        assert_eq!(RemoteMessage::from_frame(&ping_with_data), None);
        assert_eq!(RemoteMessage::from_frame(&unknown), None);
    }

    #[test]
    fn test_to_frame_matches_from_frame() {
        let key = RemoteMessage::Key(KeyEvent {
            address: 0x00,
            command: 0x5A,
            repeat: true,
        });

        assert_eq!(RemoteMessage::from_frame(&key.to_frame()), Some(key));
        assert_eq!(
            RemoteMessage::from_frame(&RemoteMessage::Ping.to_frame()),
            Some(RemoteMessage::Ping)
        );
    }
}
