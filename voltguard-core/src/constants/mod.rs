//! Constants for VoltGuard Core
//!
//! Every tunable number in the controller lives here, named with its unit.
//! `ProtectorConfig::default()` is assembled from these values, so changing a
//! default means changing exactly one line in this module.
//!
//! ## Organization
//!
//! - **Protection**: thresholds and alarm tone
//! - **Time**: cadences and delays of the control loop
//! - **Board**: pin map, divider network and ADC of the reference board
//!
//! ## Usage Guidelines
//!
//! 1. Use these constants instead of magic numbers
//! 2. Include the unit in every name (`_V`, `_MS`, `_HZ`, `_OHMS`)
//! 3. Say where a value came from when it was measured rather than derived

/// Voltage thresholds and alarm parameters.
pub mod protection;

/// Loop cadences, delays and time conversions.
pub mod time;

/// Reference board wiring (WeMos D1 mini + 16x2 I2C LCD).
pub mod board;

pub use protection::{
    DEFAULT_CUTOFF_V, DEFAULT_REARM_V,
    DEFAULT_ALARM_FREQUENCY_HZ, DEFAULT_ALARM_DURATION_MS,
};

pub use time::{
    MS_PER_SECOND, SECONDS_PER_MINUTE,
    DEFAULT_REARM_DELAY_MS, DEFAULT_SAMPLE_INTERVAL_MS, DEFAULT_SETTLE_MS,
    DEFAULT_DEBOUNCE_MS, DEFAULT_BLINK_INTERVAL_MS, COUNTDOWN_REFRESH_MS,
};

pub use board::{
    ADC_REFERENCE_V, ADC_MAX_COUNT,
    DIVIDER_R_TOP_OHMS, DIVIDER_R_BOTTOM_OHMS, SENSOR_CALIBRATION,
    LCD_COLUMNS, LCD_ROWS,
};
