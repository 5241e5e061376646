//! Time management for the protection loop
//!
//! The controller is driven by a free-running millisecond counter, the kind
//! every microcontroller SDK exposes (`millis()` and friends). Such counters
//! are 32 bits wide and wrap after ~49.7 days, so every elapsed-time
//! computation in this crate goes through [`elapsed`], which uses wrapping
//! subtraction. Comparing raw timestamps with `<` is never correct here.

/// Milliseconds since boot from a free-running 32-bit counter
pub type Timestamp = u32;

/// Milliseconds elapsed from `earlier` to `now`, correct across counter rollover
#[inline]
pub fn elapsed(now: Timestamp, earlier: Timestamp) -> u32 {
    now.wrapping_sub(earlier)
}

/// True once at least `interval_ms` has passed since `earlier`
#[inline]
pub fn has_elapsed(now: Timestamp, earlier: Timestamp, interval_ms: u32) -> bool {
    elapsed(now, earlier) >= interval_ms
}

/// Millisecond counter the controller can be polled against
///
/// Firmware wraps its SDK's `millis()`; host code uses [`MonotonicClock`] or
/// the manually stepped [`FixedTime`].
pub trait TimeSource {
    /// Milliseconds on the wrapping 32-bit counter
    fn now(&self) -> Timestamp;
}

/// Wall-clock millis for host runs, counted from construction
///
/// Truncated to 32 bits on purpose so host runs see the same rollover
/// behaviour as the firmware counter.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl MonotonicClock {
    /// Counter starting at zero now
    pub fn start() -> Self {
        Self { origin: std::time::Instant::now() }
    }
}

#[cfg(feature = "std")]
impl Default for MonotonicClock {
    fn default() -> Self {
        Self::start()
    }
}

#[cfg(feature = "std")]
impl TimeSource for MonotonicClock {
    fn now(&self) -> Timestamp {
        self.origin.elapsed().as_millis() as Timestamp
    }
}

/// Counter that only moves when told to; for tests and simulation
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedTime(Timestamp);

impl FixedTime {
    /// Clock reading `at` until moved
    pub fn new(at: Timestamp) -> Self {
        Self(at)
    }

    /// Jump to an absolute counter value
    pub fn set(&mut self, at: Timestamp) {
        self.0 = at;
    }

    /// Advance the clock, wrapping like the hardware counter
    pub fn advance(&mut self, ms: u32) {
        self.0 = self.0.wrapping_add(ms);
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.0
    }
}
