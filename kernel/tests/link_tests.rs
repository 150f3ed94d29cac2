//! Link context tests: pin changes, heartbeat and boot banner end to end

use button_link_kernel::config::{HEARTBEAT_TICKS, TX_QUEUE_CAPACITY};
use button_link_kernel::edge::GroupId;
use button_link_kernel::serial::TxRegister;
use button_link_kernel::wire::{Decoder, Frame};
use button_link_kernel::{Command, Heartbeat, Link};

#[derive(Default)]
struct Wire(Vec<u8>);

impl TxRegister for Wire {
    fn load(&mut self, byte: u8) {
        self.0.push(byte);
    }
}

type TestLink = Link<Wire, TX_QUEUE_CAPACITY>;

fn bound_link() -> TestLink {
    let link = TestLink::new();
    link.bind(Wire::default());
    link
}

// Run completion interrupts until idle, then return everything sent.
fn flush(link: &TestLink) -> Vec<u8> {
    while link.transmitter().is_transmitting() {
        link.on_tx_complete();
    }
    link.transmitter()
        .with(|t| t.register().map(|w| w.0.clone()).unwrap_or_default())
}

fn frames(bytes: &[u8]) -> Vec<Frame> {
    let mut decoder = Decoder::new();
    bytes.iter().filter_map(|&b| decoder.push(b)).collect()
}

#[test]
fn test_down_press_on_group_b() {
    let link = bound_link();
    link.prime(GroupId::B, 0b0001_1000);

    link.on_pin_change(GroupId::B, 0b0001_0000);

    assert_eq!(flush(&link), b"D\n");
    assert_eq!(link.snapshot(GroupId::B), 0b0001_0000);
}

#[test]
fn test_groups_keep_separate_snapshots() {
    let link = bound_link();
    for group in GroupId::ALL {
        link.prime(group, 0xFF);
    }

    link.on_pin_change(GroupId::C, 0b1111_0111); // C3 Up
    link.on_pin_change(GroupId::D, 0b1101_1111); // D5 Action A
    link.on_pin_change(GroupId::C, 0xFF); // release Up

    assert_eq!(link.snapshot(GroupId::B), 0xFF);
    assert_eq!(link.snapshot(GroupId::C), 0xFF);
    assert_eq!(link.snapshot(GroupId::D), 0b1101_1111);
    assert_eq!(flush(&link), b"U\nA\n");
}

#[test]
fn test_no_output_without_falling_edge() {
    let link = bound_link();
    link.prime(GroupId::D, 0b0000_0000);

    link.on_pin_change(GroupId::D, 0b0010_0100);
    link.on_pin_change(GroupId::D, 0b0010_0100);

    assert!(flush(&link).is_empty());
}

#[test]
fn test_thousand_ticks_one_heartbeat() {
    let link = bound_link();
    let mut heartbeat = Heartbeat::new(HEARTBEAT_TICKS);

    for _ in 0..1000 {
        link.signal_tick();
        for _ in 0..link.take_ticks() {
            if heartbeat.tick() {
                link.send_command(Command::Heartbeat);
            }
        }
    }

    assert_eq!(flush(&link), b"H\n");
}

#[test]
fn test_ticks_missed_by_main_loop_still_count() {
    let link = bound_link();
    let mut heartbeat = Heartbeat::new(HEARTBEAT_TICKS);

    for _ in 0..2500 {
        link.signal_tick();
    }
    let beats = heartbeat.advance(link.take_ticks());

    assert_eq!(beats, 2);
    assert_eq!(heartbeat.elapsed(), 500);
    assert_eq!(link.take_ticks(), 0);
}

#[test]
fn test_boot_sequence_on_the_wire() {
    let link = bound_link();
    for group in GroupId::ALL {
        link.prime(group, 0xFF);
    }

    link.announce();
    link.on_pin_change(GroupId::B, 0b1110_1111); // B4 Right
    link.send_command(Command::Heartbeat);
    link.on_pin_change(GroupId::D, 0b1111_1011); // D2 Action B

    let out = flush(&link);
    assert_eq!(out, b"START\nR\nH\nB\n");
    assert_eq!(
        frames(&out),
        [
            Frame::Banner,
            Frame::Command(Command::Right),
            Frame::Command(Command::Heartbeat),
            Frame::Command(Command::ActionB),
        ]
    );
    assert_eq!(link.stats().bytes_out, out.len() as u32);
}

#[test]
fn test_press_before_bind_is_held_not_lost() {
    let link = TestLink::new();
    link.prime(GroupId::C, 0xFF);
    link.on_pin_change(GroupId::C, 0b1111_1011); // C2 Left

    assert_eq!(link.stats().pending, 2);
    link.bind(Wire::default());

    assert_eq!(flush(&link), b"L\n");
}
