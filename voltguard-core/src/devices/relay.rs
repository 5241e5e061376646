//! Load relay driven by a digital output

use super::LoadSwitch;
use crate::hal::{Level, Pin, PinMode};

/// Relay module on an output pin; high closes the contact
#[derive(Debug)]
pub struct Relay<P> {
    pin: P,
    closed: bool,
}

impl<P: Pin> Relay<P> {
    /// Configure the pin as output and start with the relay open
    pub fn new(mut pin: P) -> Self {
        if let Err(e) = pin.set_mode(PinMode::Output) {
            log_error!("relay pin mode rejected: {}", e);
        }
        let mut relay = Self { pin, closed: false };
        relay.drive(Level::Low);
        relay
    }

    /// Last commanded state (no feedback from the contact itself)
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn drive(&mut self, level: Level) {
        match self.pin.write_digital(level) {
            Ok(()) => self.closed = level.is_high(),
            Err(e) => log_error!("relay write failed: {}", e),
        }
    }
}

impl<P: Pin> LoadSwitch for Relay<P> {
    fn turn_on(&mut self) {
        self.drive(Level::High);
    }

    fn turn_off(&mut self) {
        self.drive(Level::Low);
    }
}
