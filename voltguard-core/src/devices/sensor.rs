//! Battery voltage sensor (ADC behind a resistor divider)
//!
//! Converts raw ADC counts to battery volts:
//!
//! ```text
//! v_pin     = counts / ADC_MAX_COUNT * ADC_REFERENCE_V
//! v_battery = v_pin / divider_ratio * calibration
//! ```
//!
//! The divider ratio is resolved up front with [`divider_ratio`]; the sensor
//! itself only ever sees the ratio and a calibration factor.

use super::VoltageRead;
use crate::constants::{
    ADC_MAX_COUNT, ADC_REFERENCE_V, DIVIDER_R_BOTTOM_OHMS, DIVIDER_R_TOP_OHMS,
    SENSOR_CALIBRATION,
};
use crate::hal::{Pin, PinMode};

/// Ratio of the sensed node to the battery voltage
///
/// The sense node is measured across `r_top_ohms`, the resistor tied to
/// battery positive. Returns 0.0 for a degenerate (zero total) network.
pub fn divider_ratio(r_top_ohms: f32, r_bottom_ohms: f32) -> f32 {
    let total = r_top_ohms + r_bottom_ohms;
    if total <= 0.0 {
        return 0.0;
    }
    r_top_ohms / total
}

/// Voltage sensor on an analog pin
#[derive(Debug)]
pub struct VoltageSensor<P> {
    pin: P,
    divider_ratio: f32,
    calibration: f32,
    initialized: bool,
}

impl<P: Pin> VoltageSensor<P> {
    /// Sensor with a pre-resolved divider ratio and calibration multiplier
    pub fn new(pin: P, divider_ratio: f32, calibration: f32) -> Self {
        Self {
            pin,
            divider_ratio,
            calibration,
            initialized: false,
        }
    }

    /// Sensor wired like the reference board
    pub fn reference_board(pin: P) -> Self {
        Self::new(
            pin,
            divider_ratio(DIVIDER_R_TOP_OHMS, DIVIDER_R_BOTTOM_OHMS),
            SENSOR_CALIBRATION,
        )
    }

    /// Scale raw ADC counts to battery volts
    pub fn counts_to_volts(&self, counts: u16) -> f32 {
        if self.divider_ratio <= 0.0 {
            return 0.0;
        }
        let pin_volts = counts as f32 / ADC_MAX_COUNT as f32 * ADC_REFERENCE_V;
        pin_volts / self.divider_ratio * self.calibration
    }

    /// Whether `init` succeeded
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Access the underlying pin
    pub fn pin(&self) -> &P {
        &self.pin
    }
}

impl<P: Pin> VoltageRead for VoltageSensor<P> {
    fn init(&mut self) -> bool {
        self.initialized = self.pin.set_mode(PinMode::Analog).is_ok();
        self.initialized
    }

    fn read_volts(&mut self) -> f32 {
        if !self.initialized {
            return 0.0;
        }

        match nb::block!(self.pin.read_analog()) {
            Ok(counts) => self.counts_to_volts(counts),
            Err(e) => {
                log_warn!("ADC read failed: {}", e);
                0.0
            }
        }
    }
}
