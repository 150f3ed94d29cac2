// Button inputs grouped into ports B, C and D
//
// The ESP32-C3 raises every GPIO edge on one interrupt vector. The
// handler asks which groups had an edge, clears the pending bits and
// reads each such group once; the kernel then evaluates groups
// independently, in B, C, D order.

use esp_hal::gpio::{Event, Input};

use button_link_kernel::edge::{GroupId, PortReader};

pub type ButtonPort = PortReader<Input<'static>>;

/// Snapshot per group that saw an edge since the last call, indexed by
/// `GroupId::index`.
pub type Changed = [Option<(GroupId, u8)>; 3];

pub struct ButtonPorts {
    ports: [ButtonPort; 3],
}

impl ButtonPorts {
    pub fn new(b: ButtonPort, c: ButtonPort, d: ButtonPort) -> Self {
        Self { ports: [b, c, d] }
    }

    /// Enable any-edge interrupts on all six inputs.
    pub fn listen(&mut self) {
        for port in self.ports.iter_mut() {
            for pin in port.pins_mut().iter_mut() {
                pin.listen(Event::AnyEdge);
            }
        }
    }

    pub fn snapshot(&mut self, group: GroupId) -> u8 {
        self.ports[group.index()].snapshot()
    }

    // Pending bits are cleared before reading, so an edge landing after
    // the read raises the interrupt again instead of being lost.
    pub fn take_changed(&mut self) -> Changed {
        let mut changed: Changed = [None; 3];

        for (slot, port) in changed.iter_mut().zip(self.ports.iter_mut()) {
            let mut pending = false;
            for pin in port.pins_mut().iter_mut() {
                if pin.is_interrupt_set() {
                    pin.clear_interrupt();
                    pending = true;
                }
            }
            if pending {
                *slot = Some((port.group(), port.snapshot()));
            }
        }

        changed
    }
}
