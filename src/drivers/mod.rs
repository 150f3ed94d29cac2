// esp-hal bindings for the kernel seams
//
// buttons: pin groups -> snapshots, pending-edge bookkeeping
// uart:    UART1 as the transmitter's one-byte register

pub mod buttons;
pub mod uart;
