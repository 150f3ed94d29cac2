//! GPIO |     Function     |      Notes
//! -----+------------------+----------------------------------
//!  0   | Button DOWN      | group B bit 3, active LOW, internal pullup
//!  1   | Button RIGHT     | group B bit 4, active LOW, internal pullup
//!  3   | Button LEFT      | group C bit 2, active LOW, internal pullup
//!  4   | Button UP        | group C bit 3, active LOW, internal pullup
//!  5   | Button ACTION_B  | group D bit 2, active LOW, internal pullup
//!  6   | Button ACTION_A  | group D bit 5, active LOW, internal pullup
//!  7   | UART1 TXD        | command link, 9600 8N1, no RX
//!
//! GPIO2/8/9 are strapping pins and stay unused. Logs go out over
//! USB serial/JTAG, never over the command link.

// ----- Group B -----
pub const BTN_DOWN: u8 = 0;
pub const BTN_RIGHT: u8 = 1;

// ----- Group C -----
pub const BTN_LEFT: u8 = 3;
pub const BTN_UP: u8 = 4;

// ----- Group D -----
pub const BTN_ACTION_B: u8 = 5;
pub const BTN_ACTION_A: u8 = 6;

// ----- Command link -----
pub const LINK_TX: u8 = 7;
