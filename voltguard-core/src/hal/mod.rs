//! Pin Capability Abstraction
//!
//! Every driver in `crate::devices` talks to hardware through one small trait,
//! [`Pin`], which bundles the four things a pin of the reference board can do:
//! change mode, drive a level, sense a level, and sample an analog voltage.
//!
//! ## Implementations
//!
//! - [`OutputAdapter`], [`InputAdapter`], [`AdcAdapter`]: wrap typed
//!   `embedded-hal` 0.2 pins so any HAL can drive the controller. Each adapter
//!   supports the capabilities its HAL type offers and reports
//!   [`PinError::Unsupported`] for the rest.
//! - `crate::mock::MockPin` (feature `std`): shared, inspectable state for
//!   host tests.
//!
//! ## Safety Invariants
//!
//! - One owner per pin instance
//! - No concurrent access from multiple contexts
//! - Mode changes must go through [`Pin::set_mode`] so adapters can refuse
//!   modes their HAL type cannot represent

mod adapters;

pub use adapters::{AdcAdapter, InputAdapter, OutputAdapter};

use crate::errors::{PinError, PinResult};

/// Pin mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Input mode (high impedance)
    Input,
    /// Input mode with pull-up resistor
    InputPullUp,
    /// Output mode (push-pull)
    Output,
    /// Analog input routed to the ADC
    Analog,
}

impl PinMode {
    /// True for modes that sense a digital level
    pub fn is_input(self) -> bool {
        matches!(self, Self::Input | Self::InputPullUp)
    }
}

/// Digital logic level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    #[default]
    Low,
    /// Logic 1
    High,
}

impl Level {
    /// True for [`Level::High`]
    pub fn is_high(self) -> bool {
        self == Self::High
    }

    /// The opposite level
    pub fn toggled(self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::High => Self::Low,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Self::High } else { Self::Low }
    }
}

/// Capability interface of a single hardware pin
pub trait Pin {
    /// Configure the pin
    ///
    /// # Errors
    ///
    /// Returns [`PinError::InvalidMode`] if the implementation cannot
    /// represent `mode`.
    fn set_mode(&mut self, mode: PinMode) -> PinResult<()>;

    /// Drive the pin to `level`
    ///
    /// Only valid in [`PinMode::Output`].
    fn write_digital(&mut self, level: Level) -> PinResult<()>;

    /// Sense the current level
    fn read_digital(&self) -> PinResult<Level>;

    /// Sample the pin with the ADC, returning raw counts
    ///
    /// Non-blocking: returns `nb::Error::WouldBlock` while a conversion is in
    /// flight.
    fn read_analog(&mut self) -> nb::Result<u16, PinError>;
}
