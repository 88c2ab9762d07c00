//! Wake pulses on the BRC line
//!
//! The robot powers down its serial receiver after a period without
//! activity. Pulsing the BRC (baud rate change) line high keeps it awake.
//! [`WakePulse`] remembers when the next pulse is due; the driver checks it
//! from its poll tick.

use embedded_hal::delay::DelayNs;
use roomba_hal::{Duration, Instant, OutputPin};

/// Wake pulse schedule
#[derive(Debug, Clone, Copy)]
pub struct WakePulse {
    /// `None` until the first pulse, which is always due
    next_due: Option<Instant>,
    interval: Duration,
    width: Duration,
}

impl WakePulse {
    pub fn new(interval: Duration, width: Duration) -> Self {
        Self {
            next_due: None,
            interval,
            width,
        }
    }

    /// When the next pulse is due, if one has been sent already
    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    /// Whether `now` has reached the due time
    ///
    /// Uses fugit's wrap-aware ordering, so a due time just past the
    /// counter rollover still compares correctly.
    pub fn is_due(&self, now: Instant) -> bool {
        match self.next_due {
            None => true,
            Some(due) => now >= due,
        }
    }

    /// Pulse the line and schedule the next pulse one interval after `now`
    ///
    /// The line is held high for the pulse width, then left low for the
    /// same time so the robot sees a clean edge before any command follows.
    pub fn pulse<P: OutputPin, D: DelayNs>(&mut self, pin: &mut P, delay: &mut D, now: Instant) {
        debug!("wake pulse at {} ms", now.ticks());
        pin.set_high();
        delay.delay_ms(self.width.to_millis());
        pin.set_low();
        delay.delay_ms(self.width.to_millis());
        self.next_due = Some(now + self.interval);
    }

    /// Pulse if due. Returns true if a pulse was sent.
    pub fn poll<P: OutputPin, D: DelayNs>(&mut self, pin: &mut P, delay: &mut D, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.pulse(pin, delay, now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockDelay, MockPin};

    fn at(ms: u32) -> Instant {
        Instant::from_ticks(ms)
    }

    fn schedule() -> WakePulse {
        WakePulse::new(Duration::millis(30_000), Duration::millis(200))
    }

    #[test]
    fn test_first_poll_pulses() {
        let mut wake = schedule();
        let mut pin = MockPin::default();
        let mut delay = MockDelay::default();

        assert!(wake.is_due(at(0)));
        assert!(wake.poll(&mut pin, &mut delay, at(5)));
        assert_eq!(pin.transitions, vec![true, false]);
        assert_eq!(delay.total_ms(), 400);
        assert_eq!(wake.next_due(), Some(at(30_005)));
    }

    #[test]
    fn test_not_due_before_interval() {
        let mut wake = schedule();
        let mut pin = MockPin::default();
        let mut delay = MockDelay::default();

        wake.poll(&mut pin, &mut delay, at(0));
        assert!(!wake.poll(&mut pin, &mut delay, at(29_999)));
        assert_eq!(pin.transitions.len(), 2);
    }

    #[test]
    fn test_due_at_exact_time() {
        let mut wake = schedule();
        let mut pin = MockPin::default();
        let mut delay = MockDelay::default();

        wake.poll(&mut pin, &mut delay, at(0));
        assert!(wake.poll(&mut pin, &mut delay, at(30_000)));
        assert_eq!(wake.next_due(), Some(at(60_000)));
    }

    #[test]
    fn test_due_across_counter_wrap() {
        let mut wake = schedule();
        let mut pin = MockPin::default();
        let mut delay = MockDelay::default();

        // Next pulse lands just past the rollover
        let start = at(u32::MAX - 10_000);
        wake.poll(&mut pin, &mut delay, start);
        let due = start + Duration::millis(30_000);
        assert_eq!(due.ticks(), 19_999);

        assert!(!wake.is_due(at(u32::MAX)));
        assert!(!wake.is_due(at(19_998)));
        assert!(wake.is_due(at(19_999)));
        assert!(wake.is_due(at(25_000)));
    }
}
