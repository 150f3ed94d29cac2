// no_std core for button-link
//
// Edge detection, the transmit ring and the heartbeat counter live here,
// free of any HAL. The firmware crate binds esp-hal pins and the UART to
// the InputPin and TxRegister seams; tests bind mocks.

#![cfg_attr(not(test), no_std)]

pub mod command;
pub mod config;
pub mod edge;
pub mod heartbeat;
pub mod link;
pub mod serial;
pub mod wake;
pub mod wire;

pub use command::Command;
pub use edge::{EdgeDetector, GroupId, PortGroup, PortReader, Presses};
pub use heartbeat::Heartbeat;
pub use link::Link;
pub use serial::{SharedTransmitter, Transmitter, TxQueue, TxRegister, TxStats};
pub use wake::TickSignal;
