//! Status LED with optional self-timed blinking

use super::Indicator;
use crate::constants::DEFAULT_BLINK_INTERVAL_MS;
use crate::hal::{Level, Pin, PinMode};
use crate::time::{has_elapsed, Timestamp};

#[derive(Debug, Clone, Copy)]
struct Blink {
    interval_ms: u32,
    last_toggle: Timestamp,
}

/// LED on an output pin; high lights it
#[derive(Debug)]
pub struct Led<P> {
    pin: P,
    lit: bool,
    blink: Option<Blink>,
}

impl<P: Pin> Led<P> {
    /// Configure the pin as output and start dark
    pub fn new(mut pin: P) -> Self {
        if let Err(e) = pin.set_mode(PinMode::Output) {
            log_warn!("LED pin mode rejected: {}", e);
        }
        let mut led = Self { pin, lit: false, blink: None };
        led.write(false);
        led
    }

    /// Whether a self-timed blink is active
    pub fn is_blinking(&self) -> bool {
        self.blink.is_some()
    }

    fn write(&mut self, lit: bool) {
        match self.pin.write_digital(Level::from(lit)) {
            Ok(()) => self.lit = lit,
            Err(e) => log_warn!("LED write failed: {}", e),
        }
    }
}

impl<P: Pin> Indicator for Led<P> {
    fn on(&mut self) {
        self.blink = None;
        self.write(true);
    }

    fn off(&mut self) {
        self.blink = None;
        self.write(false);
    }

    fn toggle(&mut self) {
        self.blink = None;
        let lit = !self.lit;
        self.write(lit);
    }

    fn blink(&mut self, interval_ms: u32, now: Timestamp) {
        let interval_ms = if interval_ms == 0 { DEFAULT_BLINK_INTERVAL_MS } else { interval_ms };
        self.blink = Some(Blink { interval_ms, last_toggle: now });
    }

    fn update(&mut self, now: Timestamp) {
        let Some(mut blink) = self.blink else {
            return;
        };

        if has_elapsed(now, blink.last_toggle, blink.interval_ms) {
            let lit = !self.lit;
            self.write(lit);
            blink.last_toggle = now;
            self.blink = Some(blink);
        }
    }

    fn is_lit(&self) -> bool {
        self.lit
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::mock::MockPin;

    #[test]
    fn on_off_toggle() {
        let pin = MockPin::new();
        let probe = pin.clone();
        let mut led = Led::new(pin);
        assert!(!led.is_lit());

        led.on();
        assert!(led.is_lit());
        assert_eq!(probe.level(), Level::High);

        led.toggle();
        assert!(!led.is_lit());

        led.toggle();
        led.off();
        assert!(!led.is_lit());
        assert_eq!(probe.level(), Level::Low);
    }

    #[test]
    fn blink_follows_interval() {
        let mut led = Led::new(MockPin::new());
        led.blink(500, 1000);

        led.update(1499);
        assert!(!led.is_lit());

        led.update(1500);
        assert!(led.is_lit());

        led.update(1999);
        assert!(led.is_lit());

        led.update(2000);
        assert!(!led.is_lit());
    }

    #[test]
    fn steady_command_cancels_blink() {
        let mut led = Led::new(MockPin::new());
        led.blink(100, 0);
        assert!(led.is_blinking());

        led.on();
        assert!(!led.is_blinking());

        led.update(10_000);
        assert!(led.is_lit());
    }

    #[test]
    fn blink_across_counter_rollover() {
        let mut led = Led::new(MockPin::new());
        led.blink(500, u32::MAX - 200);

        led.update(298);
        assert!(!led.is_lit());

        led.update(299);
        assert!(led.is_lit());
    }
}
