//! Time-Related Constants
//!
//! Cadences of the control loop. All durations are milliseconds on the
//! 32-bit wrapping counter described in `crate::time`.

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: u32 = 1000;

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: u32 = 60;

// ===== CONTROL LOOP =====

/// Sustained recovery required before the load is reconnected (ms).
pub const DEFAULT_REARM_DELAY_MS: u32 = 60_000;

/// Voltage sampling cadence (ms).
///
/// Independent of how often `tick` is called.
pub const DEFAULT_SAMPLE_INTERVAL_MS: u32 = 1000;

/// Wait between closing the relay and the verifying re-read (ms).
///
/// Chosen empirically on the reference board: long enough for the terminal
/// voltage to sag under a typical load, short enough that a weak battery is
/// not drained noticeably.
pub const DEFAULT_SETTLE_MS: u32 = 100;

/// Time the override button level must hold before it counts (ms).
pub const DEFAULT_DEBOUNCE_MS: u32 = 50;

/// Green LED toggle period while a rearm countdown runs (ms).
pub const DEFAULT_BLINK_INTERVAL_MS: u32 = 500;

/// Display refresh period while a countdown is shown (ms).
pub const COUNTDOWN_REFRESH_MS: u32 = 1000;
