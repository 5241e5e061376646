//! Override push button, active low

use super::OverrideInput;
use crate::hal::{Level, Pin, PinMode};

/// Push button to ground with the pin's pull-up enabled
///
/// Reports the raw level only; debouncing happens in `crate::debounce`.
#[derive(Debug)]
pub struct Button<P> {
    pin: P,
}

impl<P: Pin> Button<P> {
    /// Configure the pin as input with pull-up
    pub fn new(mut pin: P) -> Self {
        if let Err(e) = pin.set_mode(PinMode::InputPullUp) {
            log_warn!("button pin mode rejected: {}", e);
        }
        Self { pin }
    }
}

impl<P: Pin> OverrideInput for Button<P> {
    fn is_pressed(&self) -> bool {
        // An unreadable button counts as released
        matches!(self.pin.read_digital(), Ok(Level::Low))
    }
}
