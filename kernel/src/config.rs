// Compile-time configuration. There is no runtime config surface; pin
// assignments live with the board in the firmware crate.

/// Command link rate. Frames are 8 data bits, no parity, 1 stop bit.
pub const BAUD_RATE: u32 = 9600;

/// Transmit ring slots. One slot always stays empty, so N - 1 bytes fit.
pub const TX_QUEUE_CAPACITY: usize = 32;

/// Main-loop tick period (ms)
pub const TICK_MS: u64 = 10;

/// Ticks between heartbeats: 1000 * 10ms = 10s
pub const HEARTBEAT_TICKS: u32 = 1000;

/// Delay between interrupts going live and the boot banner (ms)
pub const SETTLE_DELAY_MS: u32 = 500;
