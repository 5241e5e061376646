//! Error Types for Configuration and Pin Access
//!
//! ## Design Philosophy
//!
//! The protection loop itself never fails: every transition is a total function
//! of (state, voltage, elapsed time, override signal). Errors only exist at the
//! two edges of the system:
//!
//! 1. **Construction**: a configuration whose thresholds would let the relay
//!    chatter, or whose cadences are zero, is rejected before any relay moves.
//!
//! 2. **Pin access**: a hardware pin may refuse an operation (wrong mode, HAL
//!    fault). Drivers log these and carry on; the controller never sees them.
//!
//! Both enums are `Copy` and carry only inline data, so they can be returned
//! from hot paths without allocation.
//!
//! ```rust
//! use voltguard_core::{ConfigError, ProtectorConfig};
//!
//! let config = ProtectorConfig::default().with_thresholds(12.0, 11.5);
//! match config.validate() {
//!     Err(ConfigError::InvertedThresholds { cutoff, rearm }) => {
//!         assert!(rearm <= cutoff);
//!     }
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for configuration checks
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for pin operations
pub type PinResult<T> = Result<T, PinError>;

/// Configuration rejected at construction
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Rearm threshold does not sit above the cutoff threshold
    #[error("Rearm threshold {rearm}V must be above cutoff threshold {cutoff}V")]
    InvertedThresholds {
        /// Configured cutoff voltage
        cutoff: f32,
        /// Configured rearm voltage
        rearm: f32,
    },

    /// A threshold is NaN or infinite
    #[error("Threshold is not a finite number")]
    NonFiniteThreshold,

    /// A cadence or duration that must advance was configured as zero
    #[error("Interval {name} must be non-zero")]
    ZeroInterval {
        /// Name of the offending field
        name: &'static str,
    },
}

/// Pin operation failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinError {
    /// The pin does not offer this capability (e.g. analog read on a relay output)
    #[error("Pin capability not supported")]
    Unsupported,

    /// The pin is configured in a mode that forbids the operation
    #[error("Pin is in the wrong mode for this operation")]
    InvalidMode,

    /// The underlying HAL reported a fault
    #[error("Hardware fault on pin")]
    Hardware,
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvertedThresholds { cutoff, rearm } =>
                defmt::write!(fmt, "Rearm {}V not above cutoff {}V", rearm, cutoff),
            Self::NonFiniteThreshold =>
                defmt::write!(fmt, "Non-finite threshold"),
            Self::ZeroInterval { name } =>
                defmt::write!(fmt, "Zero interval: {}", name),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PinError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Unsupported => defmt::write!(fmt, "Pin capability unsupported"),
            Self::InvalidMode => defmt::write!(fmt, "Pin in wrong mode"),
            Self::Hardware => defmt::write!(fmt, "Pin hardware fault"),
        }
    }
}
