//! Serial wire format.
//!
//! Every event is two bytes: the command code, then a line feed. The only
//! other traffic is the boot banner, sent once. [`Decoder`] splits a
//! received stream back into frames for host-side consumers.

use crate::command::Command;

pub const LINE_FEED: u8 = b'\n';

/// Sent once after the settling delay at boot.
pub const BOOT_BANNER: &[u8] = b"START\n";

const BANNER_TEXT: &[u8] = b"START";

// longest line the decoder keeps; anything longer is reported as garbage
const MAX_LINE: usize = 8;

pub const fn encode(command: Command) -> [u8; 2] {
    [command.code(), LINE_FEED]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Command(Command),
    Banner,
    /// A terminated line that is neither; carries its length
    Unknown(usize),
}

pub struct Decoder {
    line: [u8; MAX_LINE],
    len: usize,
}

impl Decoder {
    pub const fn new() -> Self {
        Self {
            line: [0; MAX_LINE],
            len: 0,
        }
    }

    /// Feed one received byte; returns a frame at each line feed.
    pub fn push(&mut self, byte: u8) -> Option<Frame> {
        if byte != LINE_FEED {
            if self.len < MAX_LINE {
                self.line[self.len] = byte;
            }
            self.len = self.len.saturating_add(1);
            return None;
        }

        let len = self.len;
        self.len = 0;

        if len > MAX_LINE {
            return Some(Frame::Unknown(len));
        }
        let line = &self.line[..len];
        if line == BANNER_TEXT {
            return Some(Frame::Banner);
        }
        match line {
            [code] => Some(
                Command::from_code(*code)
                    .map(Frame::Command)
                    .unwrap_or(Frame::Unknown(1)),
            ),
            _ => Some(Frame::Unknown(len)),
        }
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> Vec<Frame> {
        let mut decoder = Decoder::new();
        bytes.iter().filter_map(|&b| decoder.push(b)).collect()
    }

    #[test]
    fn every_command_is_two_bytes() {
        for cmd in Command::ALL {
            let frame = encode(cmd);
            assert_eq!(frame.len(), 2);
            assert_eq!(frame[1], LINE_FEED);
        }
    }

    #[test]
    fn decodes_boot_then_events() {
        let frames = decode(b"START\nD\nH\nA\n");
        assert_eq!(
            frames,
            [
                Frame::Banner,
                Frame::Command(Command::Down),
                Frame::Command(Command::Heartbeat),
                Frame::Command(Command::ActionA),
            ]
        );
    }

    #[test]
    fn unknown_lines_are_reported() {
        assert_eq!(decode(b"x\n"), [Frame::Unknown(1)]);
        assert_eq!(decode(b"UD\n"), [Frame::Unknown(2)]);
        assert_eq!(decode(b"0123456789AB\n"), [Frame::Unknown(12)]);
        assert_eq!(decode(b"\n"), [Frame::Unknown(0)]);
    }

    #[test]
    fn partial_line_yields_nothing() {
        assert!(decode(b"STA").is_empty());
    }
}
