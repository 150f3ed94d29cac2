//! Command codes carried by the serial link.
//!
//! Each logical event is one ASCII byte on the wire. The mapping is fixed
//! at compile time; receivers match on the byte, not on pin numbers.

use core::fmt;

/// Every event the firmware can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Up,
    Down,
    Right,
    Left,
    ActionA,
    ActionB,
    /// Liveness signal from the main loop, not a button
    Heartbeat,
}

impl Command {
    pub const ALL: [Command; 7] = [
        Command::Up,
        Command::Down,
        Command::Right,
        Command::Left,
        Command::ActionA,
        Command::ActionB,
        Command::Heartbeat,
    ];

    /// Wire byte for this command.
    pub const fn code(self) -> u8 {
        match self {
            Command::Up => b'U',
            Command::Down => b'D',
            Command::Right => b'R',
            Command::Left => b'L',
            Command::ActionA => b'A',
            Command::ActionB => b'B',
            Command::Heartbeat => b'H',
        }
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            b'U' => Some(Command::Up),
            b'D' => Some(Command::Down),
            b'R' => Some(Command::Right),
            b'L' => Some(Command::Left),
            b'A' => Some(Command::ActionA),
            b'B' => Some(Command::ActionB),
            b'H' => Some(Command::Heartbeat),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Command::Up => "Up",
            Command::Down => "Down",
            Command::Right => "Right",
            Command::Left => "Left",
            Command::ActionA => "Action A",
            Command::ActionB => "Action B",
            Command::Heartbeat => "Heartbeat",
        }
    }

    pub const fn is_button(self) -> bool {
        !matches!(self, Command::Heartbeat)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
