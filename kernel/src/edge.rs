// Falling-edge detection per port group
//
// Buttons idle high through pull-ups and read low while pressed, so a
// press is a 1 -> 0 transition of the pin's bit in the group snapshot.
// Each group keeps its own previous snapshot; groups share nothing.
//
// Snapshot bit positions follow the original port wiring:
//   B3 Down, B4 Right | C2 Left, C3 Up | D2 Action B, D5 Action A
// Pins are declared in ascending bit order and simultaneous edges in one
// group are reported in that order.

use embedded_hal::digital::InputPin;

use crate::command::Command;

pub const PINS_PER_GROUP: usize = 2;

/// Snapshot value with every monitored pin released.
pub const ALL_RELEASED: u8 = 0xFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupId {
    B,
    C,
    D,
}

impl GroupId {
    pub const ALL: [GroupId; 3] = [GroupId::B, GroupId::C, GroupId::D];

    pub const fn index(self) -> usize {
        match self {
            GroupId::B => 0,
            GroupId::C => 1,
            GroupId::D => 2,
        }
    }

    pub const fn group(self) -> &'static PortGroup {
        match self {
            GroupId::B => &GROUP_B,
            GroupId::C => &GROUP_C,
            GroupId::D => &GROUP_D,
        }
    }
}

/// One monitored pin: its bit in the group snapshot and what a press sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinBinding {
    pub bit: u8,
    pub command: Command,
}

impl PinBinding {
    pub const fn mask(self) -> u8 {
        1 << self.bit
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct PortGroup {
    pub id: GroupId,
    pub pins: [PinBinding; PINS_PER_GROUP],
}

impl PortGroup {
    /// Bits of the snapshot this group watches.
    pub const fn mask(&self) -> u8 {
        self.pins[0].mask() | self.pins[1].mask()
    }

    pub fn command_for(&self, bit: u8) -> Option<Command> {
        self.pins.iter().find(|p| p.bit == bit).map(|p| p.command)
    }
}

pub static GROUP_B: PortGroup = PortGroup {
    id: GroupId::B,
    pins: [
        PinBinding { bit: 3, command: Command::Down },
        PinBinding { bit: 4, command: Command::Right },
    ],
};

pub static GROUP_C: PortGroup = PortGroup {
    id: GroupId::C,
    pins: [
        PinBinding { bit: 2, command: Command::Left },
        PinBinding { bit: 3, command: Command::Up },
    ],
};

pub static GROUP_D: PortGroup = PortGroup {
    id: GroupId::D,
    pins: [
        PinBinding { bit: 2, command: Command::ActionB },
        PinBinding { bit: 5, command: Command::ActionA },
    ],
};

/// Commands produced by one evaluation, at most one per pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Presses {
    buf: [Option<Command>; PINS_PER_GROUP],
}

impl Presses {
    pub const fn new() -> Self {
        Self {
            buf: [None; PINS_PER_GROUP],
        }
    }

    fn push(&mut self, command: Command) {
        for slot in self.buf.iter_mut() {
            if slot.is_none() {
                *slot = Some(command);
                return;
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buf.iter().all(|s| s.is_none())
    }

    pub fn len(&self) -> usize {
        self.buf.iter().filter(|s| s.is_some()).count()
    }
}

impl Iterator for Presses {
    type Item = Command;

    fn next(&mut self) -> Option<Command> {
        for slot in self.buf.iter_mut() {
            if let Some(command) = slot.take() {
                return Some(command);
            }
        }
        None
    }
}

/// Previous-snapshot state for one group.
///
/// Owned by exactly one interrupt context. `evaluate` always stores the
/// new snapshot, edge or not, so the next comparison starts from what the
/// hardware last showed.
#[derive(Debug, Clone, Copy)]
pub struct EdgeDetector {
    group: &'static PortGroup,
    previous: u8,
}

impl EdgeDetector {
    /// Starts from [`ALL_RELEASED`] until primed with live levels.
    pub const fn new(group: &'static PortGroup) -> Self {
        Self {
            group,
            previous: ALL_RELEASED,
        }
    }

    /// Seed the previous snapshot, typically from the pins at boot.
    pub fn prime(&mut self, current: u8) {
        self.previous = current;
    }

    pub fn previous(&self) -> u8 {
        self.previous
    }

    pub fn group(&self) -> &'static PortGroup {
        self.group
    }

    pub fn evaluate(&mut self, current: u8) -> Presses {
        let changed = current ^ self.previous;
        let mut presses = Presses::new();

        for pin in self.group.pins.iter() {
            let mask = pin.mask();
            if changed & mask != 0 && current & mask == 0 {
                presses.push(pin.command);
            }
        }

        self.previous = current;
        presses
    }
}

/// Packs the physical input pins of one group into its snapshot byte.
///
/// Pins are given in the group's declared order. Bits outside the group
/// mask read as 0. A pin that fails to read counts as released, so a
/// read error can never look like a press.
pub struct PortReader<P> {
    group: &'static PortGroup,
    pins: [P; PINS_PER_GROUP],
}

impl<P: InputPin> PortReader<P> {
    pub fn new(group: &'static PortGroup, pins: [P; PINS_PER_GROUP]) -> Self {
        Self { group, pins }
    }

    pub fn group(&self) -> GroupId {
        self.group.id
    }

    pub fn snapshot(&mut self) -> u8 {
        let mut levels = 0u8;
        for (binding, pin) in self.group.pins.iter().zip(self.pins.iter_mut()) {
            if pin.is_high().unwrap_or(true) {
                levels |= binding.mask();
            }
        }
        levels
    }

    pub fn pins_mut(&mut self) -> &mut [P; PINS_PER_GROUP] {
        &mut self.pins
    }
}
