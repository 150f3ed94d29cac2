// UART1 as the transmitter's one-byte register
//
// Each load writes a single byte into the TX FIFO. TxDone fires once the
// FIFO is empty and the stop bit has gone out, which is the completion
// signal the transmitter waits for.

use esp_hal::Blocking;
use esp_hal::interrupt::InterruptHandler;
use esp_hal::uart::{Uart, UartInterrupt};
use log::warn;

use button_link_kernel::serial::TxRegister;

pub struct UartRegister {
    uart: Uart<'static, Blocking>,
}

impl UartRegister {
    pub fn new(mut uart: Uart<'static, Blocking>) -> Self {
        // TxDone reads as set on an idle line; drop it before listening
        uart.clear_interrupts(UartInterrupt::TxDone.into());
        uart.listen(UartInterrupt::TxDone);
        Self { uart }
    }

    pub fn set_interrupt_handler(&mut self, handler: InterruptHandler) {
        self.uart.set_interrupt_handler(handler);
    }
}

impl TxRegister for UartRegister {
    fn load(&mut self, byte: u8) {
        // the FIFO is empty whenever the transmitter loads, so one byte fits
        if let Err(err) = self.uart.write(&[byte]) {
            warn!("uart: write failed: {:?}", err);
        }
    }

    fn acknowledge(&mut self) {
        self.uart.clear_interrupts(UartInterrupt::TxDone.into());
    }
}
