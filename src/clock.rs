//! Wrapping time arithmetic.
//!
//! Timestamps are "time since boot" counters compared by subtraction. The
//! helpers here never panic when the counter rolls over between two readings.

use embassy_time::{Duration, Instant};

/// Time elapsed from `earlier` to `now`, tolerating counter rollover.
#[inline]
pub const fn since(now: Instant, earlier: Instant) -> Duration {
    Duration::from_ticks(now.as_ticks().wrapping_sub(earlier.as_ticks()))
}

/// Returns true once `now` is at or past `deadline`.
///
/// Deadlines further than half the counter range in the past are treated as
/// being in the future, which is the only reading that stays consistent
/// across a rollover.
#[inline]
pub const fn reached(now: Instant, deadline: Instant) -> bool {
    now.as_ticks().wrapping_sub(deadline.as_ticks()) <= u64::MAX / 2
}

/// `instant + duration`, wrapping at the end of the counter range.
#[inline]
pub const fn advance(instant: Instant, duration: Duration) -> Instant {
    Instant::from_ticks(instant.as_ticks().wrapping_add(duration.as_ticks()))
}
