//! Non-blocking debounce for the override button
//!
//! The raw level is sampled once per tick. A change only becomes an [`Edge`]
//! after the new level has held for `debounce_ms`, measured with wrapping
//! time arithmetic. Nothing here waits; a bouncing contact simply keeps
//! restarting the hold timer.
//!
//! ```rust
//! use voltguard_core::debounce::{Debouncer, Edge};
//!
//! let mut button = Debouncer::new(50, false, 0);
//! assert_eq!(button.update(true, 10), None);   // contact closes
//! assert_eq!(button.update(false, 15), None);  // bounce
//! assert_eq!(button.update(true, 20), None);   // closes again, timer restarts
//! assert_eq!(button.update(true, 70), Some(Edge::Pressed));
//! assert_eq!(button.update(true, 500), None);  // held: no re-trigger
//! ```

use crate::time::{has_elapsed, Timestamp};

/// Debounced transition of the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Released to held
    Pressed,
    /// Held to released
    Released,
}

/// Edge detector with a hold-time filter
#[derive(Debug, Clone)]
pub struct Debouncer {
    debounce_ms: u32,
    /// Last confirmed level
    stable: bool,
    /// Level seen on the most recent sample
    raw: bool,
    /// When `raw` last changed
    raw_since: Timestamp,
}

impl Debouncer {
    /// Start out agreeing with the current level, so an input already held at
    /// power-up does not produce an edge until it is released and pressed again
    pub fn new(debounce_ms: u32, initial: bool, now: Timestamp) -> Self {
        Self {
            debounce_ms,
            stable: initial,
            raw: initial,
            raw_since: now,
        }
    }

    /// Feed one raw sample; returns an edge when a change has been confirmed
    pub fn update(&mut self, raw: bool, now: Timestamp) -> Option<Edge> {
        if raw != self.raw {
            self.raw = raw;
            self.raw_since = now;
        }

        if self.raw == self.stable || !has_elapsed(now, self.raw_since, self.debounce_ms) {
            return None;
        }

        self.stable = self.raw;
        Some(if self.stable { Edge::Pressed } else { Edge::Released })
    }

    /// Last confirmed level
    pub fn is_pressed(&self) -> bool {
        self.stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_confirmed_after_hold() {
        let mut d = Debouncer::new(50, false, 0);
        assert_eq!(d.update(true, 100), None);
        assert_eq!(d.update(true, 149), None);
        assert_eq!(d.update(true, 150), Some(Edge::Pressed));
        assert!(d.is_pressed());
    }

    #[test]
    fn single_edge_per_press() {
        let mut d = Debouncer::new(50, false, 0);
        d.update(true, 0);
        assert_eq!(d.update(true, 50), Some(Edge::Pressed));

        for t in (60..5000).step_by(10) {
            assert_eq!(d.update(true, t), None);
        }

        assert_eq!(d.update(false, 5000), None);
        assert_eq!(d.update(false, 5050), Some(Edge::Released));
        assert!(!d.is_pressed());
    }

    #[test]
    fn glitch_shorter_than_debounce_ignored() {
        let mut d = Debouncer::new(50, false, 0);
        assert_eq!(d.update(true, 10), None);
        assert_eq!(d.update(false, 30), None);
        assert_eq!(d.update(false, 200), None);
        assert!(!d.is_pressed());
    }

    #[test]
    fn held_at_power_up_needs_release_first() {
        let mut d = Debouncer::new(50, true, 0);
        assert_eq!(d.update(true, 1000), None);

        d.update(false, 1000);
        assert_eq!(d.update(false, 1050), Some(Edge::Released));
        d.update(true, 1100);
        assert_eq!(d.update(true, 1150), Some(Edge::Pressed));
    }

    #[test]
    fn zero_debounce_is_immediate() {
        let mut d = Debouncer::new(0, false, 0);
        assert_eq!(d.update(true, 7), Some(Edge::Pressed));
        assert_eq!(d.update(false, 8), Some(Edge::Released));
    }

    #[test]
    fn debounce_across_rollover() {
        let mut d = Debouncer::new(50, false, 0);
        assert_eq!(d.update(true, u32::MAX - 19), None);
        assert_eq!(d.update(true, 29), None);
        assert_eq!(d.update(true, 30), Some(Edge::Pressed));
    }
}
