// Coarse heartbeat timer counted in main-loop ticks
// NOTE: a tick is whatever the caller says it is. The firmware feeds
// hardware timer ticks (10ms), so the interval no longer drifts with the
// time spent in the loop body.

pub struct Heartbeat {
    period: u32,
    count: u32,
}

impl Heartbeat {
    /// A period of 0 is treated as 1 (beat on every tick).
    pub const fn new(period_ticks: u32) -> Self {
        Self {
            period: if period_ticks == 0 { 1 } else { period_ticks },
            count: 0,
        }
    }

    /// Count one tick; true when the period completes.
    pub fn tick(&mut self) -> bool {
        self.count += 1;

        if self.count >= self.period {
            self.count = 0;
            true
        } else {
            false
        }
    }

    /// Count several ticks at once, returning how many beats fell due.
    pub fn advance(&mut self, ticks: u32) -> u32 {
        let mut beats = 0;
        for _ in 0..ticks {
            if self.tick() {
                beats += 1;
            }
        }
        beats
    }

    pub fn period(&self) -> u32 {
        self.period
    }

    // ticks since the last beat
    pub fn elapsed(&self) -> u32 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beats_on_the_last_tick_of_each_period() {
        let mut hb = Heartbeat::new(3);
        assert!(!hb.tick());
        assert!(!hb.tick());
        assert!(hb.tick());
        assert_eq!(hb.elapsed(), 0);
        assert!(!hb.tick());
    }

    #[test]
    fn advance_counts_every_beat() {
        let mut hb = Heartbeat::new(10);
        assert_eq!(hb.advance(25), 2);
        assert_eq!(hb.elapsed(), 5);
        assert_eq!(hb.advance(5), 1);
    }

    #[test]
    fn zero_period_beats_every_tick() {
        let mut hb = Heartbeat::new(0);
        assert_eq!(hb.period(), 1);
        assert!(hb.tick());
        assert!(hb.tick());
    }
}
