// button-link: six buttons to one-byte commands over UART (ESP32-C3)

#![no_std]

pub mod board;
pub mod drivers;
