//! Mock hardware for host tests and simulation
//!
//! Every mock is a cheap handle onto shared state: clone it, move one copy
//! into the driver or controller, and keep the other as a probe to steer
//! inputs and inspect outputs.
//!
//! ```rust
//! use voltguard_core::hal::{Level, Pin, PinMode};
//! use voltguard_core::mock::MockPin;
//!
//! let pin = MockPin::new();
//! let probe = pin.clone();
//!
//! let mut owned = pin;
//! owned.set_mode(PinMode::Output).unwrap();
//! owned.write_digital(Level::High).unwrap();
//!
//! assert_eq!(probe.level(), Level::High);
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::string::String;
use std::vec::Vec;

use crate::constants::{LCD_COLUMNS, LCD_ROWS};
use crate::devices::{Button, Buzzer, CharDisplay, Led, Relay, VoltageRead};
use crate::errors::{PinError, PinResult};
use crate::hal::{Level, Pin, PinMode};
use crate::protector::Peripherals;

#[derive(Debug, Default)]
struct PinState {
    mode: Option<PinMode>,
    level: Level,
    analog: u16,
    analog_fault: Option<PinError>,
    digital_fault: Option<PinError>,
    writes: usize,
}

/// Mock pin
///
/// Tracks mode, level, analog counts and write count. Digital writes are
/// only accepted in [`PinMode::Output`], like real hardware.
#[derive(Debug, Clone, Default)]
pub struct MockPin {
    state: Rc<RefCell<PinState>>,
}

impl MockPin {
    /// Unconfigured pin reading low
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin whose input currently senses `level`
    pub fn input(level: Level) -> Self {
        let pin = Self::new();
        pin.set_input(level);
        pin
    }

    /// Pin whose ADC currently reads `counts`
    pub fn analog(counts: u16) -> Self {
        let pin = Self::new();
        pin.set_analog(counts);
        pin
    }

    /// Simulate an external signal on the pin
    pub fn set_input(&self, level: Level) {
        self.state.borrow_mut().level = level;
    }

    /// Simulate a new analog value
    pub fn set_analog(&self, counts: u16) {
        self.state.borrow_mut().analog = counts;
    }

    /// Make analog reads fail until [`MockPin::clear_faults`]
    pub fn fail_analog(&self, error: PinError) {
        self.state.borrow_mut().analog_fault = Some(error);
    }

    /// Make digital reads fail until [`MockPin::clear_faults`]
    pub fn fail_digital(&self, error: PinError) {
        self.state.borrow_mut().digital_fault = Some(error);
    }

    /// Remove injected faults
    pub fn clear_faults(&self) {
        let mut state = self.state.borrow_mut();
        state.analog_fault = None;
        state.digital_fault = None;
    }

    /// Current level
    pub fn level(&self) -> Level {
        self.state.borrow().level
    }

    /// Current mode, `None` if never configured
    pub fn mode(&self) -> Option<PinMode> {
        self.state.borrow().mode
    }

    /// Number of accepted digital writes
    pub fn writes(&self) -> usize {
        self.state.borrow().writes
    }
}

impl Pin for MockPin {
    fn set_mode(&mut self, mode: PinMode) -> PinResult<()> {
        self.state.borrow_mut().mode = Some(mode);
        Ok(())
    }

    fn write_digital(&mut self, level: Level) -> PinResult<()> {
        let mut state = self.state.borrow_mut();
        if state.mode != Some(PinMode::Output) {
            return Err(PinError::InvalidMode);
        }
        state.level = level;
        state.writes += 1;
        Ok(())
    }

    fn read_digital(&self) -> PinResult<Level> {
        let state = self.state.borrow();
        match state.digital_fault {
            Some(error) => Err(error),
            None => Ok(state.level),
        }
    }

    fn read_analog(&mut self) -> nb::Result<u16, PinError> {
        let state = self.state.borrow();
        match state.analog_fault {
            Some(error) => Err(nb::Error::Other(error)),
            None => Ok(state.analog),
        }
    }
}

/// Voltage source reporting whatever the test sets, in volts
#[derive(Debug, Clone)]
pub struct MockSensor {
    volts: Rc<Cell<f32>>,
    reads: Rc<Cell<u32>>,
    init_ok: Rc<Cell<bool>>,
    initialized: Rc<Cell<bool>>,
}

impl MockSensor {
    /// Sensor currently reading `volts`
    pub fn new(volts: f32) -> Self {
        Self {
            volts: Rc::new(Cell::new(volts)),
            reads: Rc::new(Cell::new(0)),
            init_ok: Rc::new(Cell::new(true)),
            initialized: Rc::new(Cell::new(false)),
        }
    }

    /// Sensor whose `init` fails; reads then return 0.0 like the real driver
    pub fn failing(volts: f32) -> Self {
        let sensor = Self::new(volts);
        sensor.init_ok.set(false);
        sensor
    }

    /// Change the battery voltage
    pub fn set(&self, volts: f32) {
        self.volts.set(volts);
    }

    /// Number of reads taken so far
    pub fn reads(&self) -> u32 {
        self.reads.get()
    }
}

impl VoltageRead for MockSensor {
    fn init(&mut self) -> bool {
        let ok = self.init_ok.get();
        self.initialized.set(ok);
        ok
    }

    fn read_volts(&mut self) -> f32 {
        self.reads.set(self.reads.get() + 1);
        if self.initialized.get() {
            self.volts.get()
        } else {
            0.0
        }
    }
}

#[derive(Debug)]
struct DisplayState {
    rows: Vec<Vec<char>>,
    cursor: (usize, usize),
    initialized: bool,
    backlight: bool,
    clears: u32,
    refreshes: u32,
}

/// Character display recording what would be visible on a 16x2 LCD
#[derive(Debug, Clone)]
pub struct MockDisplay {
    state: Rc<RefCell<DisplayState>>,
}

impl Default for MockDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDisplay {
    /// Blank 16x2 display
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(DisplayState {
                rows: vec![vec![' '; LCD_COLUMNS]; LCD_ROWS],
                cursor: (0, 0),
                initialized: false,
                backlight: false,
                clears: 0,
                refreshes: 0,
            })),
        }
    }

    /// Visible text of `row`, trailing spaces included
    pub fn line(&self, row: usize) -> String {
        self.state
            .borrow()
            .rows
            .get(row)
            .map(|r| r.iter().collect())
            .unwrap_or_default()
    }

    /// Visible text of `row` without trailing spaces
    pub fn text(&self, row: usize) -> String {
        self.line(row).trim_end().to_string()
    }

    /// Whether `init` and `backlight` were called
    pub fn is_ready(&self) -> bool {
        let state = self.state.borrow();
        state.initialized && state.backlight
    }

    /// Number of `clear` calls
    pub fn clears(&self) -> u32 {
        self.state.borrow().clears
    }

    /// Number of times row 0 was rewritten from column 0
    pub fn refreshes(&self) -> u32 {
        self.state.borrow().refreshes
    }
}

impl CharDisplay for MockDisplay {
    fn init(&mut self) {
        self.state.borrow_mut().initialized = true;
    }

    fn backlight(&mut self) {
        self.state.borrow_mut().backlight = true;
    }

    fn clear(&mut self) {
        let mut state = self.state.borrow_mut();
        for row in state.rows.iter_mut() {
            row.iter_mut().for_each(|c| *c = ' ');
        }
        state.cursor = (0, 0);
        state.clears += 1;
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        let mut state = self.state.borrow_mut();
        state.cursor = (col as usize, row as usize);
        if state.cursor == (0, 0) {
            state.refreshes += 1;
        }
    }

    fn print(&mut self, text: &str) {
        let mut state = self.state.borrow_mut();
        let (mut col, row) = state.cursor;
        for ch in text.chars() {
            // Characters past the last column are lost, as on the LCD
            if let Some(cell) = state.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
                *cell = ch;
            }
            col += 1;
        }
        state.cursor = (col, row);
    }
}

/// Peripherals built from mocks
pub type MockPeripherals =
    Peripherals<MockSensor, Relay<MockPin>, Led<MockPin>, Buzzer<MockPin>, Button<MockPin>, MockDisplay>;

/// A full board of mocks plus probes into each of them
#[derive(Debug, Clone)]
pub struct MockBoard {
    /// Battery voltage
    pub sensor: MockSensor,
    /// Relay coil pin (high = closed)
    pub relay: MockPin,
    /// Green LED pin
    pub green: MockPin,
    /// Red LED pin
    pub red: MockPin,
    /// Buzzer pin (high = sounding)
    pub buzzer: MockPin,
    /// Override button pin (low = pressed)
    pub button: MockPin,
    /// LCD contents
    pub display: MockDisplay,
}

impl MockBoard {
    /// Board with the battery at `volts` and the button released
    pub fn new(volts: f32) -> Self {
        Self {
            sensor: MockSensor::new(volts),
            relay: MockPin::new(),
            green: MockPin::new(),
            red: MockPin::new(),
            buzzer: MockPin::new(),
            button: MockPin::input(Level::High),
            display: MockDisplay::new(),
        }
    }

    /// Peripherals wired to this board's probes
    pub fn peripherals(&self) -> MockPeripherals {
        Peripherals {
            sensor: self.sensor.clone(),
            relay: Relay::new(self.relay.clone()),
            green_led: Led::new(self.green.clone()),
            red_led: Led::new(self.red.clone()),
            buzzer: Buzzer::new(self.buzzer.clone()),
            override_input: Button::new(self.button.clone()),
            display: Some(self.display.clone()),
        }
    }

    /// Change the battery voltage
    pub fn set_volts(&self, volts: f32) {
        self.sensor.set(volts);
    }

    /// Hold the override button down
    pub fn press(&self) {
        self.button.set_input(Level::Low);
    }

    /// Let go of the override button
    pub fn release(&self) {
        self.button.set_input(Level::High);
    }

    /// Relay contact closed
    pub fn relay_closed(&self) -> bool {
        self.relay.level().is_high()
    }

    /// Green LED lit
    pub fn green_lit(&self) -> bool {
        self.green.level().is_high()
    }

    /// Red LED lit
    pub fn red_lit(&self) -> bool {
        self.red.level().is_high()
    }

    /// Buzzer sounding
    pub fn buzzing(&self) -> bool {
        self.buzzer.level().is_high()
    }
}
