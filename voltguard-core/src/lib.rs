//! Low-voltage disconnect controller for battery banks
//!
//! Protects a lead-acid or lithium bank from deep discharge: the load relay
//! opens when the battery falls below a cutoff voltage and closes again only
//! after the battery has held above a higher rearm voltage for a configured
//! delay and survived a short re-check under load.
//!
//! Key constraints:
//! - Runs on small MCUs (ESP8266 class), `no_std` without `alloc`
//! - Single-threaded cooperative loop; no call blocks
//! - Millisecond counter wraps every ~49.7 days and everything copes
//!
//! ```no_run
//! use voltguard_core::devices::{Button, Buzzer, Led, NoDisplay, Relay, VoltageSensor};
//! use voltguard_core::hal::Pin;
//! use voltguard_core::{Peripherals, Protector, ProtectorConfig};
//!
//! fn run<P: Pin>(adc: P, relay: P, green: P, red: P, buzzer: P, button: P, millis: impl Fn() -> u32) {
//!     let peripherals = Peripherals {
//!         sensor: VoltageSensor::reference_board(adc),
//!         relay: Relay::new(relay),
//!         green_led: Led::new(green),
//!         red_led: Led::new(red),
//!         buzzer: Buzzer::new(buzzer),
//!         override_input: Button::new(button),
//!         display: None::<NoDisplay>,
//!     };
//!
//!     let Ok(mut protector) = Protector::new(ProtectorConfig::default(), peripherals, millis()) else {
//!         return;
//!     };
//!     loop {
//!         protector.tick(millis());
//!     }
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod config;
pub mod constants;
pub mod debounce;
pub mod devices;
pub mod errors;
pub mod hal;
pub mod indicator;
pub mod protector;
pub mod state;
pub mod status;
pub mod time;

#[cfg(feature = "std")]
pub mod mock;

// Public API
pub use config::{AlarmTone, ProtectorConfig, Thresholds};
pub use errors::{ConfigError, ConfigResult, PinError, PinResult};
pub use protector::{Peripherals, Protector};
pub use state::{ProtectionState, RearmTimer, VoltageSample};
pub use status::{StatusLines, StatusReport};
pub use time::{TimeSource, Timestamp};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
