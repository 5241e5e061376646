//! Protection state types

use core::fmt;

use crate::time::Timestamp;

/// Which side of the disconnect the load is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtectionState {
    /// Relay closed, load connected
    Armed,
    /// Relay open, load disconnected
    Cutoff,
}

impl fmt::Display for ProtectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Armed => f.write_str("ARMED"),
            Self::Cutoff => f.write_str("CUTOFF"),
        }
    }
}

/// Progress towards an automatic rearm; meaningful only in CUTOFF
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RearmTimer {
    /// No countdown
    #[default]
    Idle,
    /// Voltage at or above rearm since `started_at`
    Counting {
        /// When the countdown began
        started_at: Timestamp,
    },
    /// Delay served and relay closed at `closed_at`; waiting for the settle
    /// re-read to confirm the battery holds up under load
    Settling {
        /// When the countdown began
        started_at: Timestamp,
        /// When the relay was closed for verification
        closed_at: Timestamp,
    },
}

impl RearmTimer {
    /// True while a countdown (or its verification) is in progress
    pub fn is_waiting(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// When the running countdown began
    pub fn started_at(&self) -> Option<Timestamp> {
        match *self {
            Self::Idle => None,
            Self::Counting { started_at } | Self::Settling { started_at, .. } => Some(started_at),
        }
    }
}

/// Most recent voltage reading
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VoltageSample {
    /// Battery voltage, already sanitised (non-finite readings become 0.0)
    pub volts: f32,
    /// When it was taken
    pub taken_at: Timestamp,
}
