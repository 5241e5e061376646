//! LED Indicator Policy
//!
//! The two LEDs are a pure function of (state, waiting):
//!
//! | state  | waiting | green           | red |
//! |--------|---------|-----------------|-----|
//! | ARMED  | n/a     | solid on        | off |
//! | CUTOFF | true    | blink @ 500ms   | on  |
//! | CUTOFF | false   | off             | on  |
//!
//! Blinking is timed here, not by the LED driver: [`BlinkTimer`] keeps the
//! last toggle time and only advances it once a full interval has passed, so
//! the blink phase survives irregular tick spacing.

use crate::devices::Indicator;
use crate::state::ProtectionState;
use crate::time::{has_elapsed, Timestamp};

/// What one LED should be doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedPattern {
    /// Steadily lit
    On,
    /// Dark
    Off,
    /// Toggling at the blink interval
    Blink,
}

/// Patterns for both LEDs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndicatorPattern {
    /// Green "armed" LED
    pub green: LedPattern,
    /// Red "cutoff" LED
    pub red: LedPattern,
}

/// LED patterns for a protection state
pub fn pattern(state: ProtectionState, waiting: bool) -> IndicatorPattern {
    match (state, waiting) {
        (ProtectionState::Armed, _) => IndicatorPattern {
            green: LedPattern::On,
            red: LedPattern::Off,
        },
        (ProtectionState::Cutoff, true) => IndicatorPattern {
            green: LedPattern::Blink,
            red: LedPattern::On,
        },
        (ProtectionState::Cutoff, false) => IndicatorPattern {
            green: LedPattern::Off,
            red: LedPattern::On,
        },
    }
}

/// Toggle clock for [`LedPattern::Blink`]
#[derive(Debug, Clone)]
pub struct BlinkTimer {
    interval_ms: u32,
    last_toggle: Timestamp,
}

impl BlinkTimer {
    /// Timer toggling every `interval_ms`, phase starting at `now`
    pub fn new(interval_ms: u32, now: Timestamp) -> Self {
        Self { interval_ms, last_toggle: now }
    }

    /// True (and restarts the interval) when a toggle is due
    pub fn due(&mut self, now: Timestamp) -> bool {
        if has_elapsed(now, self.last_toggle, self.interval_ms) {
            self.last_toggle = now;
            true
        } else {
            false
        }
    }

    /// Time of the last toggle
    pub fn last_toggle(&self) -> Timestamp {
        self.last_toggle
    }
}

/// Drive both LEDs to `pattern`
///
/// Steady patterns are re-asserted on every call.
pub fn apply<L: Indicator>(
    pattern: IndicatorPattern,
    green: &mut L,
    red: &mut L,
    timer: &mut BlinkTimer,
    now: Timestamp,
) {
    drive(pattern.green, green, timer, now);
    drive(pattern.red, red, timer, now);
    green.update(now);
    red.update(now);
}

fn drive<L: Indicator>(pattern: LedPattern, led: &mut L, timer: &mut BlinkTimer, now: Timestamp) {
    match pattern {
        LedPattern::On => led.on(),
        LedPattern::Off => led.off(),
        LedPattern::Blink => {
            if timer.due(now) {
                led.toggle();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal in-memory LED
    #[derive(Default)]
    struct TestLed {
        lit: bool,
        toggles: u32,
    }

    impl Indicator for TestLed {
        fn on(&mut self) {
            self.lit = true;
        }

        fn off(&mut self) {
            self.lit = false;
        }

        fn toggle(&mut self) {
            self.lit = !self.lit;
            self.toggles += 1;
        }

        fn blink(&mut self, _interval_ms: u32, _now: Timestamp) {}

        fn update(&mut self, _now: Timestamp) {}

        fn is_lit(&self) -> bool {
            self.lit
        }
    }

    #[test]
    fn pattern_table() {
        let armed = pattern(ProtectionState::Armed, false);
        assert_eq!(armed, pattern(ProtectionState::Armed, true));
        assert_eq!(armed.green, LedPattern::On);
        assert_eq!(armed.red, LedPattern::Off);

        let waiting = pattern(ProtectionState::Cutoff, true);
        assert_eq!(waiting.green, LedPattern::Blink);
        assert_eq!(waiting.red, LedPattern::On);

        let idle = pattern(ProtectionState::Cutoff, false);
        assert_eq!(idle.green, LedPattern::Off);
        assert_eq!(idle.red, LedPattern::On);
    }

    #[test]
    fn blink_toggles_on_interval_boundaries() {
        let mut green = TestLed::default();
        let mut red = TestLed::default();
        let mut timer = BlinkTimer::new(500, 0);
        let blinking = pattern(ProtectionState::Cutoff, true);

        // Tick every 100ms for 3 seconds
        for t in (0..=3000).step_by(100) {
            apply(blinking, &mut green, &mut red, &mut timer, t);
            assert!(red.is_lit());
        }

        // Toggled at 500, 1000, ..., 3000
        assert_eq!(green.toggles, 6);
        assert_eq!(red.toggles, 0);
    }

    #[test]
    fn timer_waits_full_interval_with_irregular_ticks() {
        let mut timer = BlinkTimer::new(500, 0);
        assert!(!timer.due(499));
        assert!(timer.due(730));
        assert_eq!(timer.last_toggle(), 730);
        assert!(!timer.due(1229));
        assert!(timer.due(1230));
    }

    #[test]
    fn idle_cutoff_is_steady() {
        let mut green = TestLed { lit: true, toggles: 0 };
        let mut red = TestLed::default();
        let mut timer = BlinkTimer::new(500, 0);

        for t in (0..2000).step_by(250) {
            apply(pattern(ProtectionState::Cutoff, false), &mut green, &mut red, &mut timer, t);
            assert!(!green.is_lit());
            assert!(red.is_lit());
        }
        assert_eq!(green.toggles, 0);
    }
}
