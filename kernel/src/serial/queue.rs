// Transmit ring buffer
// head = next write slot, tail = next read slot, both mod N.
// One slot always stays empty: head == tail is empty, head + 1 == tail is
// full. No len counter, so the producer side only ever writes head.

pub struct TxQueue<const N: usize> {
    buf: [u8; N],
    head: usize,
    tail: usize,
}

impl<const N: usize> TxQueue<N> {
    pub const fn new() -> Self {
        assert!(N >= 2, "transmit queue needs at least two slots");
        Self {
            buf: [0; N],
            head: 0,
            tail: 0,
        }
    }

    /// Returns the byte back if the ring is full. Never overwrites.
    pub fn push(&mut self, byte: u8) -> Result<(), u8> {
        let next = (self.head + 1) % N;
        if next == self.tail {
            return Err(byte);
        }
        self.buf[self.head] = byte;
        self.head = next;
        Ok(())
    }

    pub fn pop(&mut self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }
        let byte = self.buf[self.tail];
        self.tail = (self.tail + 1) % N;
        Some(byte)
    }

    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    pub fn is_full(&self) -> bool {
        (self.head + 1) % N == self.tail
    }

    pub fn len(&self) -> usize {
        (self.head + N - self.tail) % N
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Bytes that fit at once: capacity - 1.
    pub const fn usable(&self) -> usize {
        N - 1
    }
}

impl<const N: usize> Default for TxQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}
