//! Protection Thresholds
//!
//! Defaults target a 12V lead-acid bank. Lithium (LiFePO4) banks usually want
//! a higher cutoff and a rearm point closer to the resting voltage; pass those
//! through `ProtectorConfig::with_thresholds` instead of editing these.

// ===== VOLTAGE THRESHOLDS =====

/// Default cutoff voltage (V).
///
/// Below this the load is disconnected. 11.0V under load is roughly 10-20%
/// state of charge for a flooded lead-acid battery.
pub const DEFAULT_CUTOFF_V: f32 = 11.0;

/// Default rearm voltage (V).
///
/// The battery must recover to at least this before a rearm countdown starts.
/// 12.8V is above the resting voltage of a fully charged lead-acid cell string,
/// so reaching it normally means a charger is connected.
pub const DEFAULT_REARM_V: f32 = 12.8;

// ===== ALARM =====

/// Buzzer tone frequency on cutoff (Hz).
pub const DEFAULT_ALARM_FREQUENCY_HZ: u16 = 1000;

/// Buzzer sounding time on cutoff (ms).
pub const DEFAULT_ALARM_DURATION_MS: u32 = 5000;
