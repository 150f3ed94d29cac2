// Transmitter shared between interrupt contexts
//
// Every queue operation runs in its own short critical section. The
// blocking enqueue waits *between* attempts, outside the critical section,
// so the completion interrupt can get in and drain. Backpressure never
// drops or reorders: a stalled producer retries the same byte.

use core::cell::RefCell;
use core::convert::Infallible;

use critical_section::Mutex;
use log::{debug, info};

use super::transmitter::{Transmitter, TxRegister, TxStats};
use crate::command::Command;
use crate::wire;

// spins double per failed attempt, capped at 1 << SPIN_LIMIT
const SPIN_LIMIT: u32 = 6;

struct Backoff {
    step: u32,
}

impl Backoff {
    const fn new() -> Self {
        Self { step: 0 }
    }

    fn snooze(&mut self) {
        for _ in 0..(1u32 << self.step) {
            core::hint::spin_loop();
        }
        if self.step < SPIN_LIMIT {
            self.step += 1;
        }
    }
}

pub struct SharedTransmitter<R, const N: usize> {
    inner: Mutex<RefCell<Transmitter<R, N>>>,
}

impl<R: TxRegister, const N: usize> SharedTransmitter<R, N> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Transmitter::new())),
        }
    }

    pub fn bind(&self, register: R) {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).bind(register));
        info!("tx: register bound, {} slots", N);
    }

    pub fn try_enqueue(&self, byte: u8) -> nb::Result<(), Infallible> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).try_enqueue(byte))
    }

    /// Queue one byte, waiting for room if the ring is full.
    ///
    /// Hangs for as long as the channel cannot drain. Must not be called
    /// from a context that blocks the completion interrupt.
    pub fn enqueue(&self, byte: u8) {
        let mut backoff = Backoff::new();
        let mut stalled = false;
        loop {
            match self.try_enqueue(byte) {
                Ok(()) => return,
                Err(nb::Error::WouldBlock) => {
                    if !stalled {
                        stalled = true;
                        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).note_stall());
                        debug!("tx: queue full, waiting to send {:#04x}", byte);
                    }
                    backoff.snooze();
                }
                Err(nb::Error::Other(never)) => match never {},
            }
        }
    }

    /// One `enqueue` per byte. Other producers may interleave between bytes.
    pub fn send(&self, bytes: &[u8]) {
        for &byte in bytes {
            self.enqueue(byte);
        }
    }

    /// Command byte followed by the line terminator.
    pub fn send_command(&self, command: Command) {
        self.send(&wire::encode(command));
    }

    pub fn on_tx_complete(&self) {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).on_tx_complete());
    }

    pub fn stats(&self) -> TxStats {
        critical_section::with(|cs| self.inner.borrow_ref(cs).stats())
    }

    pub fn is_transmitting(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow_ref(cs).is_transmitting())
    }

    /// Run `f` on the transmitter inside one critical section.
    pub fn with<T>(&self, f: impl FnOnce(&mut Transmitter<R, N>) -> T) -> T {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }
}

impl<R: TxRegister, const N: usize> Default for SharedTransmitter<R, N> {
    fn default() -> Self {
        Self::new()
    }
}
