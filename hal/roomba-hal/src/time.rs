//! Monotonic time
//!
//! Time is a wrapping 32-bit millisecond counter. The types are re-exported
//! from [fugit], whose instant ordering is wrap-aware: an instant compares
//! greater than another when it lies less than half the counter range ahead
//! of it, so deadlines keep working across the rollover.

pub use fugit::ExtU32 as DurationExtU32;

/// Millisecond instant on a wrapping 32-bit counter
pub type Instant = fugit::TimerInstantU32<1_000>;

/// Millisecond duration
pub type Duration = fugit::MillisDurationU32;

/// Monotonic millisecond clock
pub trait Clock {
    /// Current time
    fn now(&self) -> Instant;

    /// Time elapsed since `earlier`, zero if `earlier` is in the future
    fn elapsed_since(&self, earlier: Instant) -> Duration {
        self.now()
            .checked_duration_since(earlier)
            .unwrap_or(Duration::from_ticks(0))
    }
}
