//! Frame encoding and byte-wise parsing
//!
//! The checksum is the XOR of LENGTH, TYPE and every payload byte.
//! START is not covered so a stray 0xAA inside a payload is harmless.

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xAA;

/// Largest payload the link carries
pub const MAX_PAYLOAD_SIZE: usize = 16;

/// START + LENGTH + TYPE + payload + CHECKSUM
pub const MAX_FRAME_SIZE: usize = MAX_PAYLOAD_SIZE + 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// LENGTH byte or payload over [`MAX_PAYLOAD_SIZE`]
    PayloadTooLarge,
    /// Checksum byte did not match the frame contents
    InvalidChecksum,
}

/// One framed message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub kind: u8,
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

fn checksum(kind: u8, payload: &[u8]) -> u8 {
    payload
        .iter()
        .fold(payload.len() as u8 ^ kind, |acc, byte| acc ^ byte)
}

impl Frame {
    pub fn new(kind: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { kind, payload })
    }

    /// Serialize to wire bytes
    pub fn encode(&self) -> Vec<u8, MAX_FRAME_SIZE> {
        let mut out = Vec::new();
        // capacity covers the largest payload, pushes cannot fail
        let _ = out.push(FRAME_START);
        let _ = out.push(self.payload.len() as u8);
        let _ = out.push(self.kind);
        let _ = out.extend_from_slice(&self.payload);
        let _ = out.push(checksum(self.kind, &self.payload));
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Length,
    Kind { len: u8 },
    Payload { len: u8, kind: u8 },
    Checksum { kind: u8 },
}

/// Byte-at-a-time frame parser
///
/// Bytes outside a frame are dropped until the next START. A bad
/// LENGTH or checksum reports an error and resynchronizes.
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: State,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    pub const fn new() -> Self {
        Self {
            state: State::Idle,
            payload: Vec::new(),
        }
    }

    /// Drop any partial frame
    pub fn reset(&mut self) {
        self.state = State::Idle;
        self.payload.clear();
    }

    /// Whether the parser is between frames
    pub fn is_idle(&self) -> bool {
        self.state == State::Idle
    }

    /// Consume one byte; yields a frame on its checksum byte
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        let state = self.state;
        self.state = match state {
            State::Idle if byte == FRAME_START => State::Length,
            State::Idle => State::Idle,
            State::Length if byte as usize > MAX_PAYLOAD_SIZE => {
                self.reset();
                return Err(FrameError::PayloadTooLarge);
            }
            State::Length => State::Kind { len: byte },
            State::Kind { len: 0 } => State::Checksum { kind: byte },
            State::Kind { len } => {
                self.payload.clear();
                State::Payload { len, kind: byte }
            }
            State::Payload { len, kind } => {
                let _ = self.payload.push(byte);
                if self.payload.len() == len as usize {
                    State::Checksum { kind }
                } else {
                    State::Payload { len, kind }
                }
            }
            State::Checksum { kind } => {
                let valid = byte == checksum(kind, &self.payload);
                let payload = core::mem::take(&mut self.payload);
                self.reset();
                return if valid {
                    Ok(Some(Frame { kind, payload }))
                } else {
                    Err(FrameError::InvalidChecksum)
                };
            }
        };
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parse_all(parser: &mut FrameParser, bytes: &[u8]) -> Vec<Result<Frame, FrameError>, 8> {
        let mut out = Vec::new();
        for &byte in bytes {
            match parser.feed(byte) {
                Ok(Some(frame)) => out.push(Ok(frame)).unwrap(),
                Ok(None) => {}
                Err(e) => out.push(Err(e)).unwrap(),
            }
        }
        out
    }

    #[test]
    fn test_encode_layout() {
        let frame = Frame::new(0x30, &[0x00, 0x1C, 0x01]).unwrap();
        let bytes = frame.encode();

        assert_eq!(bytes[..], [0xAA, 3, 0x30, 0x00, 0x1C, 0x01, 3 ^ 0x30 ^ 0x1C ^ 0x01]);
    }

    #[test]
    fn test_empty_payload() {
        let frame = Frame::new(0x01, &[]).unwrap();
        let bytes = frame.encode();
        assert_eq!(bytes[..], [0xAA, 0, 0x01, 0x01]);

        let mut parser = FrameParser::new();
        let parsed = parse_all(&mut parser, &bytes);
        assert_eq!(parsed[..], [Ok(frame)]);
        assert!(parser.is_idle());
    }

    #[test]
    fn test_resync_after_garbage() {
        let frame = Frame::new(0x30, &[0x00, 0x45, 0x00]).unwrap();
        let mut data = Vec::<u8, 32>::from_slice(&[0x00, 0x13, 0xFF]).unwrap();
        data.extend_from_slice(&frame.encode()).unwrap();

        let mut parser = FrameParser::new();
        assert_eq!(parse_all(&mut parser, &data)[..], [Ok(frame)]);
    }

    #[test]
    fn test_bad_checksum_then_recovery() {
        let frame = Frame::new(0x30, &[0x00, 0x18, 0x01]).unwrap();
        let mut corrupt = frame.encode();
        let last = corrupt.len() - 1;
        corrupt[last] ^= 0x5A;

        let mut data = Vec::<u8, 32>::from_slice(&corrupt).unwrap();
        data.extend_from_slice(&frame.encode()).unwrap();

        let mut parser = FrameParser::new();
        assert_eq!(
            parse_all(&mut parser, &data)[..],
            [Err(FrameError::InvalidChecksum), Ok(frame)]
        );
    }

    #[test]
    fn test_oversized_length_is_rejected() {
        let mut parser = FrameParser::new();
        assert_eq!(parser.feed(FRAME_START), Ok(None));
        assert_eq!(parser.feed(17), Err(FrameError::PayloadTooLarge));
        assert!(parser.is_idle());
    }

    #[test]
    fn test_payload_too_large() {
        assert_eq!(
            Frame::new(0x30, &[0; MAX_PAYLOAD_SIZE + 1]),
            Err(FrameError::PayloadTooLarge)
        );
    }

    proptest! {
        #[test]
        fn prop_frames_survive_leading_noise(
            noise in proptest::collection::vec(0u8..0xAA, 0..12),
            kind in any::<u8>(),
            payload in proptest::collection::vec(any::<u8>(), 0..=MAX_PAYLOAD_SIZE),
        ) {
            let frame = Frame::new(kind, &payload).unwrap();
            let mut parser = FrameParser::new();
            for byte in noise {
                prop_assert_eq!(parser.feed(byte), Ok(None));
            }

            let mut parsed = None;
            for byte in frame.encode() {
                if let Some(f) = parser.feed(byte).unwrap() {
                    parsed = Some(f);
                }
            }
            prop_assert_eq!(parsed, Some(frame));
        }
    }
}
