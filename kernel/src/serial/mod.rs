// Interrupt-driven serial transmitter
//
// queue:       fixed ring of pending bytes, one slot sacrificed
// transmitter: ring + idle/transmitting state + the hardware register
// shared:      critical-section wrapper with the blocking enqueue
//
// Producers (pin ISRs, main loop) only advance head; the completion
// handler only advances tail.

pub mod queue;
pub mod shared;
pub mod transmitter;

pub use queue::TxQueue;
pub use shared::SharedTransmitter;
pub use transmitter::{Transmitter, TxRegister, TxStats};
