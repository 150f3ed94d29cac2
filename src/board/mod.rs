//! button-link board support
//!
//! Maps the physical pins to port groups and brings up the command UART
//! and the tick timer. Nothing outside this module knows GPIO numbers;
//! see [`pins`] for the table.

pub mod pins;

use esp_hal::{
    Blocking,
    gpio::{Input, InputConfig, Io, Pull},
    peripherals::{GPIO0, GPIO1, GPIO3, GPIO4, GPIO5, GPIO6, GPIO7, Peripherals, UART1},
    timer::{PeriodicTimer, timg::TimerGroup},
    uart::{Config as UartConfig, DataBits, Parity, StopBits, Uart},
};

use button_link_kernel::config::BAUD_RATE;
use button_link_kernel::edge::{GROUP_B, GROUP_C, GROUP_D, PortReader};

use crate::drivers::buttons::ButtonPorts;
use crate::drivers::uart::UartRegister;

pub type TickTimer = PeriodicTimer<'static, Blocking>;

/// Complete board hardware, ready for handler installation.
pub struct Board {
    pub io: Io<'static>,
    pub buttons: ButtonPorts,
    pub uart: UartRegister,
    pub timer: TickTimer,
}

impl Board {
    pub fn init(p: Peripherals) -> Self {
        let io = Io::new(p.IO_MUX);
        let buttons = Self::init_buttons(p.GPIO0, p.GPIO1, p.GPIO3, p.GPIO4, p.GPIO5, p.GPIO6);
        let uart = Self::init_uart(p.UART1, p.GPIO7);

        let timg0 = TimerGroup::new(p.TIMG0);
        let timer = PeriodicTimer::new(timg0.timer0);

        Board {
            io,
            buttons,
            uart,
            timer,
        }
    }

    fn init_buttons(
        down: GPIO0<'static>,
        right: GPIO1<'static>,
        left: GPIO3<'static>,
        up: GPIO4<'static>,
        action_b: GPIO5<'static>,
        action_a: GPIO6<'static>,
    ) -> ButtonPorts {
        // idle high, pressed pulls low
        let cfg = InputConfig::default().with_pull(Pull::Up);

        // pins in each group's declared (ascending bit) order
        let b = PortReader::new(&GROUP_B, [Input::new(down, cfg), Input::new(right, cfg)]);
        let c = PortReader::new(&GROUP_C, [Input::new(left, cfg), Input::new(up, cfg)]);
        let d = PortReader::new(
            &GROUP_D,
            [Input::new(action_b, cfg), Input::new(action_a, cfg)],
        );

        ButtonPorts::new(b, c, d)
    }

    fn init_uart(uart1: UART1<'static>, tx: GPIO7<'static>) -> UartRegister {
        let cfg = UartConfig::default()
            .with_baudrate(BAUD_RATE)
            .with_data_bits(DataBits::_8)
            .with_parity(Parity::None)
            .with_stop_bits(StopBits::_1);

        let uart = Uart::new(uart1, cfg).expect("uart1 init").with_tx(tx);

        UartRegister::new(uart)
    }
}
