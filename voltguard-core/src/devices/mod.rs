//! Collaborator Contracts and Pin-Backed Drivers
//!
//! ## Overview
//!
//! The protection controller never touches a pin. It issues commands through
//! the six traits in this module, one per collaborator on the board:
//!
//! | trait | driver | role |
//! |---|---|---|
//! | [`VoltageRead`] | [`VoltageSensor`] | calibrated battery voltage |
//! | [`LoadSwitch`] | [`Relay`] | connects/disconnects the load |
//! | [`Indicator`] | [`Led`] | green "armed" and red "cutoff" LEDs |
//! | [`Alarm`] | [`Buzzer`] | one-shot cutoff alarm |
//! | [`OverrideInput`] | [`Button`] | manual override push button |
//! | [`CharDisplay`] | (external LCD driver) | optional two-line readout |
//!
//! The drivers are generic over [`crate::hal::Pin`], so the same code runs
//! against `embedded-hal` adapters on the board and `MockPin` on the host.
//!
//! ## Error Policy
//!
//! Collaborator calls are side-effect-only and infallible from the
//! controller's point of view. A driver that gets a [`crate::errors::PinError`]
//! logs it and carries on; the only fault with a defined consequence is a
//! failed voltage read, which reports 0V so the controller fails safe.

mod button;
mod buzzer;
mod display;
mod led;
mod relay;
mod sensor;

pub use button::Button;
pub use buzzer::Buzzer;
pub use display::{CharDisplay, NoDisplay};
pub use led::Led;
pub use relay::Relay;
pub use sensor::{divider_ratio, VoltageSensor};

use crate::config::AlarmTone;
use crate::time::Timestamp;

/// Battery voltage source
pub trait VoltageRead {
    /// Prepare the sensor; `false` means reads will return degraded values
    fn init(&mut self) -> bool;

    /// Current battery voltage in volts, 0.0 if unavailable
    fn read_volts(&mut self) -> f32;
}

/// Load relay; no feedback signal
pub trait LoadSwitch {
    /// Close the relay, connecting the load
    fn turn_on(&mut self);

    /// Open the relay, disconnecting the load
    fn turn_off(&mut self);
}

/// Status LED
pub trait Indicator {
    /// Light steadily, cancelling any blink
    fn on(&mut self);

    /// Go dark, cancelling any blink
    fn off(&mut self);

    /// Invert the current state, cancelling any blink
    fn toggle(&mut self);

    /// Start blinking with the given half-period
    fn blink(&mut self, interval_ms: u32, now: Timestamp);

    /// Progress an active blink; call every tick
    fn update(&mut self, now: Timestamp);

    /// Whether the LED is currently lit
    fn is_lit(&self) -> bool;
}

/// Audible alarm with auto-stop
pub trait Alarm {
    /// Start sounding `tone` for its configured duration
    ///
    /// `tone.frequency_hz` is advisory: drivers for self-oscillating buzzers
    /// ignore it and only honour the duration.
    fn start_alarm(&mut self, tone: AlarmTone, now: Timestamp);

    /// Silence immediately
    fn stop(&mut self);

    /// Stop once the duration has elapsed; call every tick
    fn update(&mut self, now: Timestamp);

    /// Whether the alarm is currently sounding
    fn is_sounding(&self) -> bool;
}

/// Manual override input, sampled raw (debouncing is the controller's job)
pub trait OverrideInput {
    /// True while the input is held
    fn is_pressed(&self) -> bool;
}
