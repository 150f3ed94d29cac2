//! Top-level link context.
//!
//! One `Link` holds all state shared between the interrupt handlers and
//! the main loop: the transmitter, one edge detector per port group and
//! the tick counter. The firmware keeps a single `static` of it; each
//! hardware event maps to one method:
//!
//! | event                  | method            | touches              |
//! |------------------------|-------------------|----------------------|
//! | pin change in group G  | `on_pin_change`   | detector G, tx head  |
//! | UART byte sent         | `on_tx_complete`  | tx tail, flag        |
//! | timer period elapsed   | `signal_tick`     | tick count           |
//!
//! Detectors are private to their group's handler and never touched from
//! anywhere else once primed.

use core::cell::Cell;

use critical_section::Mutex;
use log::trace;

use crate::command::Command;
use crate::edge::{EdgeDetector, GROUP_B, GROUP_C, GROUP_D, GroupId};
use crate::serial::{SharedTransmitter, TxRegister, TxStats};
use crate::wake::TickSignal;
use crate::wire::BOOT_BANNER;

pub struct Link<R, const N: usize> {
    tx: SharedTransmitter<R, N>,
    ports: [Mutex<Cell<EdgeDetector>>; 3],
    ticks: TickSignal,
}

impl<R: TxRegister, const N: usize> Link<R, N> {
    pub const fn new() -> Self {
        Self {
            tx: SharedTransmitter::new(),
            ports: [
                Mutex::new(Cell::new(EdgeDetector::new(&GROUP_B))),
                Mutex::new(Cell::new(EdgeDetector::new(&GROUP_C))),
                Mutex::new(Cell::new(EdgeDetector::new(&GROUP_D))),
            ],
            ticks: TickSignal::new(),
        }
    }

    pub fn bind(&self, register: R) {
        self.tx.bind(register);
    }

    /// Seed a group's previous snapshot before its interrupt is enabled.
    pub fn prime(&self, group: GroupId, snapshot: u8) {
        critical_section::with(|cs| {
            let cell = self.ports[group.index()].borrow(cs);
            let mut detector = cell.get();
            detector.prime(snapshot);
            cell.set(detector);
        });
        trace!("edge: group {:?} primed {:#010b}", group, snapshot);
    }

    /// Pin-change handler body for one group.
    ///
    /// Evaluates inside a critical section, then enqueues outside it so a
    /// full queue can drain while this context waits.
    pub fn on_pin_change(&self, group: GroupId, snapshot: u8) {
        let presses = critical_section::with(|cs| {
            let cell = self.ports[group.index()].borrow(cs);
            let mut detector = cell.get();
            let presses = detector.evaluate(snapshot);
            cell.set(detector);
            presses
        });

        for command in presses {
            trace!("edge: {:?} -> {}", group, command);
            self.tx.send_command(command);
        }
    }

    /// Last snapshot seen for `group`.
    pub fn snapshot(&self, group: GroupId) -> u8 {
        critical_section::with(|cs| self.ports[group.index()].borrow(cs).get().previous())
    }

    pub fn on_tx_complete(&self) {
        self.tx.on_tx_complete();
    }

    /// Boot banner, sent once after the settling delay.
    pub fn announce(&self) {
        self.tx.send(BOOT_BANNER);
    }

    pub fn send_command(&self, command: Command) {
        self.tx.send_command(command);
    }

    pub fn signal_tick(&self) {
        self.ticks.signal();
    }

    pub fn take_ticks(&self) -> u32 {
        self.ticks.take()
    }

    pub fn stats(&self) -> TxStats {
        self.tx.stats()
    }

    pub fn transmitter(&self) -> &SharedTransmitter<R, N> {
        &self.tx
    }
}

impl<R: TxRegister, const N: usize> Default for Link<R, N> {
    fn default() -> Self {
        Self::new()
    }
}
