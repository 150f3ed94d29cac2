// Transmitter state machine
//
//   Idle --enqueue--> Transmitting --complete, bytes left--> Transmitting
//                     Transmitting --complete, ring empty--> Idle
//
// Exactly one byte is in flight while Transmitting. The completion
// interrupt hands over the next one; the first byte after Idle is handed
// over by whoever enqueued it.

use core::convert::Infallible;

use super::queue::TxQueue;

/// Hardware side of the link: a one-byte-at-a-time output channel that
/// reports completion through an interrupt.
pub trait TxRegister {
    /// Start shifting out `byte`. Only called while no byte is in flight.
    fn load(&mut self, byte: u8);

    /// Clear the completion flag that raised the interrupt.
    fn acknowledge(&mut self) {}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TxStats {
    /// Bytes handed to the register since boot (wrapping)
    pub bytes_out: u32,
    /// Enqueue calls that had to wait for room
    pub stalls: u32,
    pub pending: usize,
    pub transmitting: bool,
}

pub struct Transmitter<R, const N: usize> {
    queue: TxQueue<N>,
    register: Option<R>,
    transmitting: bool,
    bytes_out: u32,
    stalls: u32,
}

impl<R: TxRegister, const N: usize> Transmitter<R, N> {
    /// Unbound transmitter. Bytes queue up until [`bind`](Self::bind).
    pub const fn new() -> Self {
        Self {
            queue: TxQueue::new(),
            register: None,
            transmitting: false,
            bytes_out: 0,
            stalls: 0,
        }
    }

    pub fn with_register(register: R) -> Self {
        let mut tx = Self::new();
        tx.bind(register);
        tx
    }

    /// Install the hardware register and start on anything already queued.
    pub fn bind(&mut self, register: R) {
        self.register = Some(register);
        self.transmitting = false;
        self.start_if_idle();
    }

    /// `WouldBlock` while the ring is full; nothing is written then.
    pub fn try_enqueue(&mut self, byte: u8) -> nb::Result<(), Infallible> {
        self.queue.push(byte).map_err(|_| nb::Error::WouldBlock)?;
        self.start_if_idle();
        Ok(())
    }

    fn start_if_idle(&mut self) {
        if self.transmitting {
            return;
        }
        let Some(register) = self.register.as_mut() else {
            return;
        };
        if let Some(byte) = self.queue.pop() {
            self.transmitting = true;
            register.load(byte);
            self.bytes_out = self.bytes_out.wrapping_add(1);
        }
    }

    /// Completion interrupt body: next byte out, or back to idle.
    pub fn on_tx_complete(&mut self) {
        let Some(register) = self.register.as_mut() else {
            return;
        };
        register.acknowledge();

        // spurious completion with nothing in flight
        if !self.transmitting {
            return;
        }

        match self.queue.pop() {
            Some(byte) => {
                register.load(byte);
                self.bytes_out = self.bytes_out.wrapping_add(1);
            }
            None => self.transmitting = false,
        }
    }

    pub(crate) fn note_stall(&mut self) {
        self.stalls = self.stalls.wrapping_add(1);
    }

    pub fn is_transmitting(&self) -> bool {
        self.transmitting
    }

    pub fn is_full(&self) -> bool {
        self.queue.is_full()
    }

    /// Bytes waiting behind the one in flight.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_bound(&self) -> bool {
        self.register.is_some()
    }

    pub fn register(&self) -> Option<&R> {
        self.register.as_ref()
    }

    pub fn register_mut(&mut self) -> Option<&mut R> {
        self.register.as_mut()
    }

    pub fn stats(&self) -> TxStats {
        TxStats {
            bytes_out: self.bytes_out,
            stalls: self.stalls,
            pending: self.queue.len(),
            transmitting: self.transmitting,
        }
    }
}

impl<R: TxRegister, const N: usize> Default for Transmitter<R, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Probe {
        loaded: Vec<u8>,
        acks: usize,
    }

    impl TxRegister for Probe {
        fn load(&mut self, byte: u8) {
            self.loaded.push(byte);
        }

        fn acknowledge(&mut self) {
            self.acks += 1;
        }
    }

    #[test]
    fn first_byte_goes_straight_out() {
        let mut tx: Transmitter<Probe, 8> = Transmitter::with_register(Probe::default());
        assert!(!tx.is_transmitting());

        tx.try_enqueue(b'U').unwrap();
        assert!(tx.is_transmitting());
        assert_eq!(tx.pending(), 0);
        assert_eq!(tx.register().unwrap().loaded, b"U");
    }

    #[test]
    fn completion_drains_then_idles() {
        let mut tx: Transmitter<Probe, 8> = Transmitter::with_register(Probe::default());
        for &b in b"L\n" {
            tx.try_enqueue(b).unwrap();
        }
        assert_eq!(tx.pending(), 1);

        tx.on_tx_complete();
        assert!(tx.is_transmitting());
        tx.on_tx_complete();
        assert!(!tx.is_transmitting());
        assert_eq!(tx.register().unwrap().loaded, b"L\n");
        assert_eq!(tx.register().unwrap().acks, 2);
    }

    #[test]
    fn unbound_holds_bytes_until_bind() {
        let mut tx: Transmitter<Probe, 8> = Transmitter::new();
        tx.try_enqueue(b'S').unwrap();
        tx.try_enqueue(b'T').unwrap();
        tx.on_tx_complete();
        assert!(!tx.is_transmitting());
        assert_eq!(tx.pending(), 2);

        tx.bind(Probe::default());
        assert!(tx.is_transmitting());
        assert_eq!(tx.register().unwrap().loaded, b"S");
        assert_eq!(tx.pending(), 1);
    }

    #[test]
    fn spurious_completion_while_idle_is_ignored() {
        let mut tx: Transmitter<Probe, 8> = Transmitter::with_register(Probe::default());
        tx.on_tx_complete();
        assert!(!tx.is_transmitting());
        assert!(tx.register().unwrap().loaded.is_empty());
        assert_eq!(tx.stats().bytes_out, 0);
    }

    #[test]
    fn full_ring_would_block() {
        let mut tx: Transmitter<Probe, 4> = Transmitter::with_register(Probe::default());
        // one in flight + three queued
        for b in 0..4 {
            tx.try_enqueue(b).unwrap();
        }
        assert!(tx.is_full());
        assert_eq!(tx.try_enqueue(9), Err(nb::Error::WouldBlock));
        assert_eq!(tx.stats().pending, 3);
    }
}
