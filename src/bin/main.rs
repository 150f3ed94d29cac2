// button-link entry point and main loop
//
// Boot sequence: logger -> board -> handlers -> bind UART -> prime
// detectors -> listen -> settle -> START banner.
// Main loop: WFI -> take timer ticks -> heartbeat every 1000 ticks.
//
// Interrupt priorities: UART (3) > GPIO (2) > timer (1). A GPIO handler
// stalled on a full transmit queue gets preempted by the UART handler
// that drains it, so backpressure cannot deadlock the link.

#![no_std]
#![no_main]

use esp_backtrace as _;
use esp_hal::clock::CpuClock;
use esp_hal::delay::Delay;
use esp_hal::interrupt::Priority;
use esp_hal::time::Duration;
use log::{debug, info};

use core::cell::RefCell;
use critical_section::Mutex;

use button_link::board::{Board, TickTimer};
use button_link::drivers::buttons::ButtonPorts;
use button_link::drivers::uart::UartRegister;
use button_link_kernel::config::{HEARTBEAT_TICKS, SETTLE_DELAY_MS, TICK_MS, TX_QUEUE_CAPACITY};
use button_link_kernel::edge::GroupId;
use button_link_kernel::wake::wait_for_interrupt;
use button_link_kernel::{Command, Heartbeat, Link};

esp_bootloader_esp_idf::esp_app_desc!();

static LINK: Link<UartRegister, TX_QUEUE_CAPACITY> = Link::new();

static BUTTONS: Mutex<RefCell<Option<ButtonPorts>>> = Mutex::new(RefCell::new(None));

static TIMER0: Mutex<RefCell<Option<TickTimer>>> = Mutex::new(RefCell::new(None));

#[esp_hal::handler(priority = Priority::Priority1)]
fn timer0_handler() {
    critical_section::with(|cs| {
        if let Some(timer) = TIMER0.borrow_ref_mut(cs).as_mut() {
            timer.clear_interrupt();
        }
    });
    LINK.signal_tick();
}

#[esp_hal::handler(priority = Priority::Priority2)]
fn gpio_handler() {
    let changed = critical_section::with(|cs| {
        BUTTONS
            .borrow_ref_mut(cs)
            .as_mut()
            .map(|ports| ports.take_changed())
            .unwrap_or_default()
    });

    // enqueue outside the critical section: may wait on a full queue
    for (group, snapshot) in changed.into_iter().flatten() {
        LINK.on_pin_change(group, snapshot);
    }
}

#[esp_hal::handler(priority = Priority::Priority3)]
fn uart_handler() {
    LINK.on_tx_complete();
}

#[esp_hal::main]
fn main() -> ! {
    esp_println::logger::init_logger_from_env();
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    info!("booting...");

    let Board {
        mut io,
        mut buttons,
        mut uart,
        mut timer,
    } = Board::init(peripherals);

    uart.set_interrupt_handler(uart_handler);
    LINK.bind(uart);
    info!("uart initialized.");

    // seed every detector with live levels so a button held at boot is
    // not reported as a press
    for group in GroupId::ALL {
        LINK.prime(group, buttons.snapshot(group));
    }
    io.set_interrupt_handler(gpio_handler);
    critical_section::with(|cs| {
        buttons.listen();
        BUTTONS.borrow_ref_mut(cs).replace(buttons);
    });
    info!("buttons initialized.");

    critical_section::with(|cs| {
        timer.set_interrupt_handler(timer0_handler);
        timer
            .start(Duration::from_millis(TICK_MS))
            .expect("timer0 start");
        timer.listen();
        TIMER0.borrow_ref_mut(cs).replace(timer);
    });
    info!("timer initialized.");

    Delay::new().delay_millis(SETTLE_DELAY_MS);
    LINK.announce();
    info!("link ready.");

    // heartbeat counts from the banner, not from timer start
    let _ = LINK.take_ticks();
    let mut heartbeat = Heartbeat::new(HEARTBEAT_TICKS);

    loop {
        wait_for_interrupt();

        for _ in 0..LINK.take_ticks() {
            if heartbeat.tick() {
                LINK.send_command(Command::Heartbeat);

                let stats = LINK.stats();
                debug!(
                    "heartbeat: {} bytes out, {} stalls, {} pending",
                    stats.bytes_out, stats.stalls, stats.pending
                );
            }
        }
    }
}
