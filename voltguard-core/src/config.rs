//! Controller configuration
//!
//! `ProtectorConfig` is a plain value assembled from `crate::constants` and
//! adjusted with `with_*` builders. Nothing is checked until [`validate`],
//! which `Protector::new` calls before touching any hardware.
//!
//! [`validate`]: ProtectorConfig::validate

use crate::constants::{
    DEFAULT_ALARM_DURATION_MS, DEFAULT_ALARM_FREQUENCY_HZ, DEFAULT_BLINK_INTERVAL_MS,
    DEFAULT_CUTOFF_V, DEFAULT_DEBOUNCE_MS, DEFAULT_REARM_DELAY_MS, DEFAULT_REARM_V,
    DEFAULT_SAMPLE_INTERVAL_MS, DEFAULT_SETTLE_MS,
};
use crate::errors::{ConfigError, ConfigResult};

/// Cutoff/rearm pair with a guaranteed hysteresis gap
///
/// Can only be built through [`Thresholds::new`], so holding one proves
/// `rearm_volts > cutoff_volts`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Thresholds {
    cutoff_volts: f32,
    rearm_volts: f32,
}

impl Thresholds {
    /// Check and build a threshold pair
    pub fn new(cutoff_volts: f32, rearm_volts: f32) -> ConfigResult<Self> {
        if !cutoff_volts.is_finite() || !rearm_volts.is_finite() {
            return Err(ConfigError::NonFiniteThreshold);
        }

        // Equal thresholds collapse the hysteresis band and the relay chatters
        if rearm_volts <= cutoff_volts {
            return Err(ConfigError::InvertedThresholds {
                cutoff: cutoff_volts,
                rearm: rearm_volts,
            });
        }

        Ok(Self { cutoff_volts, rearm_volts })
    }

    /// Disconnect below this voltage
    pub fn cutoff_volts(&self) -> f32 {
        self.cutoff_volts
    }

    /// Start the rearm countdown at or above this voltage
    pub fn rearm_volts(&self) -> f32 {
        self.rearm_volts
    }

    /// Width of the hysteresis band
    pub fn hysteresis_volts(&self) -> f32 {
        self.rearm_volts - self.cutoff_volts
    }

    pub(crate) fn is_below_cutoff(&self, volts: f32) -> bool {
        volts < self.cutoff_volts
    }

    pub(crate) fn is_at_rearm(&self, volts: f32) -> bool {
        volts >= self.rearm_volts
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            cutoff_volts: DEFAULT_CUTOFF_V,
            rearm_volts: DEFAULT_REARM_V,
        }
    }
}

/// Buzzer tone fired once per cutoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmTone {
    /// Tone frequency in Hz
    pub frequency_hz: u16,
    /// How long the alarm sounds before stopping by itself
    pub duration_ms: u32,
}

impl Default for AlarmTone {
    fn default() -> Self {
        Self {
            frequency_hz: DEFAULT_ALARM_FREQUENCY_HZ,
            duration_ms: DEFAULT_ALARM_DURATION_MS,
        }
    }
}

/// Everything the controller needs to know at construction
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProtectorConfig {
    /// Disconnect below this voltage
    pub cutoff_volts: f32,

    /// Begin the rearm countdown at or above this voltage
    pub rearm_volts: f32,

    /// Sustained recovery needed before reconnecting (ms)
    pub rearm_delay_ms: u32,

    /// Voltage sampling cadence (ms)
    pub sample_interval_ms: u32,

    /// Wait between closing the relay and the verifying re-read (ms)
    pub settle_ms: u32,

    /// Override button debounce time (ms)
    pub debounce_ms: u32,

    /// Green LED toggle period during a countdown (ms)
    pub blink_interval_ms: u32,

    /// Tone fired on every ARMED to CUTOFF transition
    pub alarm: AlarmTone,
}

impl Default for ProtectorConfig {
    fn default() -> Self {
        Self {
            cutoff_volts: DEFAULT_CUTOFF_V,
            rearm_volts: DEFAULT_REARM_V,
            rearm_delay_ms: DEFAULT_REARM_DELAY_MS,
            sample_interval_ms: DEFAULT_SAMPLE_INTERVAL_MS,
            settle_ms: DEFAULT_SETTLE_MS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            blink_interval_ms: DEFAULT_BLINK_INTERVAL_MS,
            alarm: AlarmTone::default(),
        }
    }
}

impl ProtectorConfig {
    /// Set cutoff and rearm voltages
    pub fn with_thresholds(mut self, cutoff_volts: f32, rearm_volts: f32) -> Self {
        self.cutoff_volts = cutoff_volts;
        self.rearm_volts = rearm_volts;
        self
    }

    /// Set the sustained-recovery delay
    pub fn with_rearm_delay_ms(mut self, rearm_delay_ms: u32) -> Self {
        self.rearm_delay_ms = rearm_delay_ms;
        self
    }

    /// Set the voltage sampling cadence
    pub fn with_sample_interval_ms(mut self, sample_interval_ms: u32) -> Self {
        self.sample_interval_ms = sample_interval_ms;
        self
    }

    /// Set the post-close settle wait
    pub fn with_settle_ms(mut self, settle_ms: u32) -> Self {
        self.settle_ms = settle_ms;
        self
    }

    /// Set the override debounce time
    pub fn with_debounce_ms(mut self, debounce_ms: u32) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    /// Set the countdown blink period
    pub fn with_blink_interval_ms(mut self, blink_interval_ms: u32) -> Self {
        self.blink_interval_ms = blink_interval_ms;
        self
    }

    /// Set the cutoff alarm tone
    pub fn with_alarm(mut self, alarm: AlarmTone) -> Self {
        self.alarm = alarm;
        self
    }

    /// Reject configurations the controller cannot run safely
    ///
    /// Returns the checked threshold pair on success.
    pub fn validate(&self) -> ConfigResult<Thresholds> {
        let thresholds = Thresholds::new(self.cutoff_volts, self.rearm_volts)?;

        // Settle and debounce may legitimately be zero; these may not
        let cadences = [
            ("sample_interval_ms", self.sample_interval_ms),
            ("blink_interval_ms", self.blink_interval_ms),
        ];
        for (name, value) in cadences {
            if value == 0 {
                return Err(ConfigError::ZeroInterval { name });
            }
        }

        Ok(thresholds)
    }
}
