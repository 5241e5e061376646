//! Shared rig for integration tests
//!
//! Wraps a [`MockBoard`] and a [`Protector`] and advances simulated time in
//! fixed steps, the way the firmware main loop would.

#![allow(dead_code)]

use voltguard_core::mock::{MockBoard, MockDisplay, MockPin, MockSensor};
use voltguard_core::devices::{Button, Buzzer, Led, Relay};
use voltguard_core::time::Timestamp;
use voltguard_core::{ProtectionState, Protector, ProtectorConfig};

pub mod scenarios;

/// Protector over a full mock board
pub type MockProtector =
    Protector<MockSensor, Relay<MockPin>, Led<MockPin>, Buzzer<MockPin>, Button<MockPin>, MockDisplay>;

/// Main loop period used by the rig (ms)
pub const LOOP_STEP_MS: u32 = 50;

/// Controller plus probes, with a simulated clock
pub struct Rig {
    pub board: MockBoard,
    pub protector: MockProtector,
    pub now: Timestamp,
}

impl Rig {
    /// Default configuration, battery at `volts`, clock at zero
    pub fn new(volts: f32) -> Self {
        Self::with_config(ProtectorConfig::default(), volts, 0)
    }

    pub fn with_config(config: ProtectorConfig, volts: f32, start: Timestamp) -> Self {
        let board = MockBoard::new(volts);
        let protector = Protector::new(config, board.peripherals(), start)
            .expect("test configuration is valid");
        Self { board, protector, now: start }
    }

    /// Advance the loop by `duration_ms`, ticking every [`LOOP_STEP_MS`]
    pub fn advance(&mut self, duration_ms: u32) {
        let mut remaining = duration_ms;
        while remaining > 0 {
            let step = remaining.min(LOOP_STEP_MS);
            self.now = self.now.wrapping_add(step);
            self.protector.tick(self.now);
            remaining -= step;
        }
    }

    /// Advance while recording whether the relay ever closed
    pub fn advance_watching_relay(&mut self, duration_ms: u32) -> bool {
        let mut closed = false;
        let mut remaining = duration_ms;
        while remaining > 0 {
            let step = remaining.min(LOOP_STEP_MS);
            self.now = self.now.wrapping_add(step);
            self.protector.tick(self.now);
            closed |= self.board.relay_closed();
            remaining -= step;
        }
        closed
    }

    /// Hold the override button long enough to register, then release it
    pub fn tap_override(&mut self) {
        self.board.press();
        self.advance(200);
        self.board.release();
        self.advance(200);
    }

    pub fn state(&self) -> ProtectionState {
        self.protector.state()
    }

    /// Asserts relay, LEDs and state agree with each other
    pub fn assert_consistent(&self) {
        match self.state() {
            ProtectionState::Armed => {
                assert!(self.board.relay_closed(), "ARMED with relay open at t={}", self.now);
                assert!(self.board.green_lit());
                assert!(!self.board.red_lit());
            }
            ProtectionState::Cutoff => {
                assert!(self.board.red_lit(), "CUTOFF without red LED at t={}", self.now);
                if !self.protector.is_waiting() {
                    assert!(!self.board.relay_closed());
                    assert!(!self.board.green_lit());
                }
            }
        }
    }
}
