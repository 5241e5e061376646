//! Battery Protection Controller
//!
//! ## Overview
//!
//! [`Protector`] owns the protection state machine and every collaborator on
//! the board. An external cooperative loop calls [`Protector::tick`] once per
//! iteration with the current millisecond counter; nothing in a tick blocks.
//!
//! ```text
//!             voltage < cutoff  /  override press
//!   ┌───────┐ ─────────────────────────────────▶ ┌────────┐
//!   │ ARMED │                                    │ CUTOFF │
//!   └───────┘ ◀───────────────────────────────── └────────┘
//!             rearm delay served + verified  /  override press
//! ```
//!
//! Inside CUTOFF the rearm path runs through [`RearmTimer`]:
//!
//! ```text
//! Idle ──(v >= rearm)──▶ Counting ──(delay served, re-read >= rearm)──▶ Settling
//!  ▲                        │                                              │
//!  └──────(v < rearm)───────┘                                              │
//!  └──────────────(settle re-read < cutoff: relay re-opened)───────────────┘
//!                                   Settling ──(settle re-read >= cutoff)──▶ ARMED
//! ```
//!
//! ## Tick Order
//!
//! 1. refresh the voltage sample if the sample interval has elapsed
//! 2. process the debounced override input
//! 3. evaluate threshold transitions (skipped on a tick where the override fired)
//! 4. drive the LED pattern
//! 5. let the buzzer auto-stop
//! 6. refresh the display on a voltage change, a transition, or once per
//!    second while a countdown runs
//!
//! ## Example
//!
//! ```rust
//! use voltguard_core::mock::MockBoard;
//! use voltguard_core::{ProtectionState, Protector, ProtectorConfig};
//!
//! let board = MockBoard::new(10.0);
//! let mut protector = Protector::new(ProtectorConfig::default(), board.peripherals(), 0)?;
//! assert_eq!(protector.state(), ProtectionState::Cutoff);
//! assert!(!board.relay_closed());
//!
//! // Override press: held past the debounce window
//! board.press();
//! protector.tick(100);
//! protector.tick(200);
//! assert_eq!(protector.state(), ProtectionState::Armed);
//! assert!(board.relay_closed());
//! # Ok::<(), voltguard_core::ConfigError>(())
//! ```

use crate::config::{ProtectorConfig, Thresholds};
use crate::constants::{COUNTDOWN_REFRESH_MS, LCD_COLUMNS};
use crate::debounce::{Debouncer, Edge};
use crate::devices::{Alarm, CharDisplay, Indicator, LoadSwitch, OverrideInput, VoltageRead};
use crate::errors::ConfigResult;
use crate::indicator::{self, BlinkTimer};
use crate::state::{ProtectionState, RearmTimer, VoltageSample};
use crate::status::{self, StatusLines, StatusReport};
use crate::time::{has_elapsed, TimeSource, Timestamp};

/// Everything the controller drives, one field per collaborator
#[derive(Debug)]
pub struct Peripherals<S, R, L, B, O, D> {
    /// Battery voltage source
    pub sensor: S,
    /// Load relay
    pub relay: R,
    /// "Armed" LED
    pub green_led: L,
    /// "Cutoff" LED
    pub red_led: L,
    /// Cutoff alarm
    pub buzzer: B,
    /// Manual override button
    pub override_input: O,
    /// Two-line status display, if fitted
    pub display: Option<D>,
}

/// Low-voltage disconnect state machine
#[derive(Debug)]
pub struct Protector<S, R, L, B, O, D> {
    config: ProtectorConfig,
    thresholds: Thresholds,
    peripherals: Peripherals<S, R, L, B, O, D>,
    state: ProtectionState,
    rearm: RearmTimer,
    sample: VoltageSample,
    debouncer: Debouncer,
    blink: BlinkTimer,
    /// Centivolts currently on the display
    shown_centivolts: i32,
    last_render: Timestamp,
    render_pending: bool,
}

impl<S, R, L, B, O, D> Protector<S, R, L, B, O, D>
where
    S: VoltageRead,
    R: LoadSwitch,
    L: Indicator,
    B: Alarm,
    O: OverrideInput,
    D: CharDisplay,
{
    /// Validate `config`, bring up the hardware and pick the initial state
    ///
    /// The initial state follows the first reading: CUTOFF below the cutoff
    /// threshold (firing the alarm), ARMED otherwise. Actuation is applied
    /// before returning.
    ///
    /// # Errors
    ///
    /// Any [`crate::ConfigError`] from [`ProtectorConfig::validate`]. No
    /// collaborator is touched when validation fails.
    pub fn new(
        config: ProtectorConfig,
        mut peripherals: Peripherals<S, R, L, B, O, D>,
        now: Timestamp,
    ) -> ConfigResult<Self> {
        let thresholds = config.validate()?;

        if !peripherals.sensor.init() {
            log_error!("voltage sensor init failed, readings will be 0V");
        }

        if let Some(display) = peripherals.display.as_mut() {
            display.init();
            display.backlight();
            display.clear();
        }

        let volts = sanitize(peripherals.sensor.read_volts());
        let pressed = peripherals.override_input.is_pressed();

        let state = if thresholds.is_below_cutoff(volts) {
            ProtectionState::Cutoff
        } else {
            ProtectionState::Armed
        };

        let mut protector = Self {
            config,
            thresholds,
            peripherals,
            state,
            rearm: RearmTimer::Idle,
            sample: VoltageSample { volts, taken_at: now },
            debouncer: Debouncer::new(config.debounce_ms, pressed, now),
            blink: BlinkTimer::new(config.blink_interval_ms, now),
            shown_centivolts: centivolts(volts),
            last_render: now,
            render_pending: false,
        };

        protector.actuate();
        if state == ProtectionState::Cutoff {
            protector.peripherals.buzzer.start_alarm(config.alarm, now);
        }
        log_info!("protector started in {} at {}V", state, volts);

        protector.render(now);
        Ok(protector)
    }

    /// Run one iteration of the control loop
    pub fn tick(&mut self, now: Timestamp) {
        // (a) voltage sample on its own cadence
        if has_elapsed(now, self.sample.taken_at, self.config.sample_interval_ms) {
            self.take_sample(now);
        }

        // (b) override; (c) thresholds, unless the override already acted
        if !self.process_override(now) {
            self.evaluate(now);
        }

        // (d) LEDs
        let pattern = indicator::pattern(self.state, self.rearm.is_waiting());
        let Peripherals { green_led, red_led, .. } = &mut self.peripherals;
        indicator::apply(pattern, green_led, red_led, &mut self.blink, now);

        // (e) alarm auto-stop
        self.peripherals.buzzer.update(now);

        // (f) display
        let countdown_due =
            self.rearm.is_waiting() && has_elapsed(now, self.last_render, COUNTDOWN_REFRESH_MS);
        if self.render_pending || countdown_due || centivolts(self.sample.volts) != self.shown_centivolts {
            self.render(now);
        }
    }

    /// [`Protector::tick`] at the time reported by `clock`
    pub fn poll<T: TimeSource>(&mut self, clock: &T) {
        self.tick(clock.now());
    }

    /// Reconnect the load now, regardless of voltage or countdown
    ///
    /// When already ARMED this only re-asserts the relay and clears any
    /// countdown bookkeeping.
    pub fn rearm(&mut self, now: Timestamp) {
        log_info!("manual rearm at {}V", self.sample.volts);
        self.enter_armed();
        self.render(now);
    }

    /// Disconnect the load now, with the same effects as a threshold cutoff
    ///
    /// In CUTOFF this abandons any rearm in progress, re-opening the relay if
    /// the settle check had closed it. The alarm only fires when leaving ARMED.
    pub fn force_cutoff(&mut self, now: Timestamp) {
        match self.state {
            ProtectionState::Armed => {
                log_info!("manual cutoff at {}V", self.sample.volts);
                self.enter_cutoff(now);
            }
            ProtectionState::Cutoff if self.rearm.is_waiting() => {
                log_info!("manual cutoff, rearm abandoned");
                self.peripherals.relay.turn_off();
                self.cancel_countdown();
            }
            ProtectionState::Cutoff => return,
        }
        self.render(now);
    }

    /// Current protection state
    pub fn state(&self) -> ProtectionState {
        self.state
    }

    /// Rearm countdown progress
    pub fn rearm_timer(&self) -> RearmTimer {
        self.rearm
    }

    /// True while a rearm countdown (or its verification) is in progress
    pub fn is_waiting(&self) -> bool {
        self.rearm.is_waiting()
    }

    /// Most recent voltage sample
    pub fn voltage(&self) -> VoltageSample {
        self.sample
    }

    /// Validated threshold pair
    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Configuration the controller was built with
    pub fn config(&self) -> &ProtectorConfig {
        &self.config
    }

    /// Time left before the rearm verification, `None` when not counting
    pub fn countdown_remaining_ms(&self, now: Timestamp) -> Option<u32> {
        self.rearm
            .started_at()
            .map(|started_at| status::countdown_remaining_ms(self.config.rearm_delay_ms, started_at, now))
    }

    /// Display lines for the current state
    pub fn lines(&self, now: Timestamp) -> StatusLines {
        status::render(
            self.state,
            self.sample.volts,
            self.countdown_remaining_ms(now),
            LCD_COLUMNS,
        )
    }

    /// One-line status summary
    pub fn status(&self, now: Timestamp) -> StatusReport {
        StatusReport {
            state: self.state,
            volts: self.sample.volts,
            thresholds: self.thresholds,
            countdown_ms: self.countdown_remaining_ms(now),
        }
    }

    /// Borrow the collaborators
    pub fn peripherals(&self) -> &Peripherals<S, R, L, B, O, D> {
        &self.peripherals
    }

    /// Mutably borrow the collaborators
    ///
    /// Relay and steady LED levels are only re-asserted on the next state
    /// transition, so commands issued directly persist until then.
    pub fn peripherals_mut(&mut self) -> &mut Peripherals<S, R, L, B, O, D> {
        &mut self.peripherals
    }

    /// Tear down the controller and hand back the collaborators
    pub fn into_peripherals(self) -> Peripherals<S, R, L, B, O, D> {
        self.peripherals
    }

    fn take_sample(&mut self, now: Timestamp) -> f32 {
        let volts = sanitize(self.peripherals.sensor.read_volts());
        self.sample = VoltageSample { volts, taken_at: now };
        volts
    }

    /// Returns true when a debounced press changed the state
    fn process_override(&mut self, now: Timestamp) -> bool {
        let raw = self.peripherals.override_input.is_pressed();
        if self.debouncer.update(raw, now) != Some(Edge::Pressed) {
            return false;
        }

        match self.state {
            ProtectionState::Armed => {
                log_info!("override: forcing cutoff");
                self.enter_cutoff(now);
            }
            ProtectionState::Cutoff => {
                log_info!("override: forcing rearm");
                self.enter_armed();
            }
        }
        true
    }

    fn evaluate(&mut self, now: Timestamp) {
        let volts = self.sample.volts;

        match (self.state, self.rearm) {
            (ProtectionState::Armed, _) => {
                if self.thresholds.is_below_cutoff(volts) {
                    log_warn!("battery at {}V, below cutoff {}V", volts, self.thresholds.cutoff_volts());
                    self.enter_cutoff(now);
                }
            }

            (ProtectionState::Cutoff, RearmTimer::Idle) => {
                if self.thresholds.is_at_rearm(volts) {
                    log_info!("battery recovered to {}V, rearm countdown started", volts);
                    self.rearm = RearmTimer::Counting { started_at: now };
                    self.render_pending = true;
                }
            }

            (ProtectionState::Cutoff, RearmTimer::Counting { started_at }) => {
                if !self.thresholds.is_at_rearm(volts) {
                    log_info!("battery fell to {}V, rearm countdown cancelled", volts);
                    self.cancel_countdown();
                } else if has_elapsed(now, started_at, self.config.rearm_delay_ms) {
                    self.verify(started_at, now);
                }
            }

            (ProtectionState::Cutoff, RearmTimer::Settling { closed_at, .. }) => {
                if has_elapsed(now, closed_at, self.config.settle_ms) {
                    self.confirm(now);
                }
            }
        }
    }

    /// Delay served: re-read and close the relay for the load test
    fn verify(&mut self, started_at: Timestamp, now: Timestamp) {
        let volts = self.take_sample(now);
        if !self.thresholds.is_at_rearm(volts) {
            log_info!("rearm re-read {}V below rearm threshold, countdown cancelled", volts);
            self.cancel_countdown();
            return;
        }

        log_debug!("closing relay for settle check");
        self.peripherals.relay.turn_on();
        self.rearm = RearmTimer::Settling { started_at, closed_at: now };

        if self.config.settle_ms == 0 {
            self.confirm(now);
        }
    }

    /// Settle time served: commit to ARMED or back off
    fn confirm(&mut self, now: Timestamp) {
        let volts = self.take_sample(now);
        if self.thresholds.is_below_cutoff(volts) {
            log_warn!("battery sagged to {}V under load, rearm aborted", volts);
            self.peripherals.relay.turn_off();
            self.cancel_countdown();
            return;
        }

        log_info!("rearmed at {}V", volts);
        self.enter_armed();
    }

    fn cancel_countdown(&mut self) {
        self.rearm = RearmTimer::Idle;
        self.render_pending = true;
    }

    fn enter_cutoff(&mut self, now: Timestamp) {
        self.state = ProtectionState::Cutoff;
        self.rearm = RearmTimer::Idle;
        self.actuate();
        self.peripherals.buzzer.start_alarm(self.config.alarm, now);
        self.render_pending = true;
    }

    fn enter_armed(&mut self) {
        self.state = ProtectionState::Armed;
        self.rearm = RearmTimer::Idle;
        self.actuate();
        self.peripherals.buzzer.stop();
        self.render_pending = true;
    }

    /// Relay and steady LED levels for the current state
    fn actuate(&mut self) {
        let p = &mut self.peripherals;
        match self.state {
            ProtectionState::Armed => {
                p.relay.turn_on();
                p.green_led.on();
                p.red_led.off();
            }
            ProtectionState::Cutoff => {
                p.relay.turn_off();
                p.green_led.off();
                p.red_led.on();
            }
        }
    }

    fn render(&mut self, now: Timestamp) {
        let lines = self.lines(now);
        if let Some(display) = self.peripherals.display.as_mut() {
            display.set_cursor(0, 0);
            display.print(&lines.top);
            display.set_cursor(0, 1);
            display.print(&lines.bottom);
        }
        self.shown_centivolts = centivolts(self.sample.volts);
        self.last_render = now;
        self.render_pending = false;
    }
}

/// Non-finite readings count as a dead battery
fn sanitize(volts: f32) -> f32 {
    if volts.is_finite() {
        volts
    } else {
        0.0
    }
}

/// Voltage at display resolution
fn centivolts(volts: f32) -> i32 {
    libm::roundf(volts * 100.0) as i32
}
