// Tick signaling between the timer ISR and the main loop
//
// The ISR adds one tick per timer interrupt; the main loop takes the
// accumulated count. Ticks pile up rather than collapse into a flag, so
// a main loop held up by transmit backpressure still sees every tick.
// Critical section guards riscv32imc (no atomic RMW).

use core::cell::Cell;

use critical_section::Mutex;

pub struct TickSignal {
    pending: Mutex<Cell<u32>>,
}

impl TickSignal {
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(Cell::new(0)),
        }
    }

    #[inline]
    pub fn signal(&self) {
        critical_section::with(|cs| {
            let ticks = self.pending.borrow(cs);
            ticks.set(ticks.get().saturating_add(1));
        });
    }

    /// Ticks since the last take.
    pub fn take(&self) -> u32 {
        critical_section::with(|cs| self.pending.borrow(cs).replace(0))
    }
}

impl Default for TickSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
pub fn wait_for_interrupt() {
    #[cfg(target_arch = "riscv32")]
    unsafe {
        core::arch::asm!("wfi", options(nomem, nostack));
    }

    #[cfg(not(target_arch = "riscv32"))]
    {
        core::hint::spin_loop();
    }
}
