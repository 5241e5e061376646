//! Reference Board Wiring
//!
//! WeMos D1 mini (ESP8266) with a resistor divider on A0, a relay module,
//! two LEDs, an active buzzer, a push button and a 16x2 HD44780 LCD behind a
//! PCF8574 I2C backpack.
//!
//! Pin assignment is the firmware's concern; the library only sees `Pin`
//! handles. For reference:
//!
//! | signal | pin |
//! |---|---|
//! | battery sense | A0 |
//! | relay coil | D6 / GPIO12 |
//! | green LED | D4 / GPIO2 |
//! | red LED | D5 / GPIO14 |
//! | buzzer | D7 / GPIO13 |
//! | override button (active low) | D3 / GPIO0 |
//! | LCD backpack | I2C 0x27 |

// ===== ADC =====

/// Full-scale voltage at the A0 pin (V).
pub const ADC_REFERENCE_V: f32 = 3.3;

/// Highest count of the 10-bit ADC.
pub const ADC_MAX_COUNT: u16 = 1023;

// ===== DIVIDER =====

/// Divider resistor from battery positive to the sense node (Ω).
pub const DIVIDER_R_TOP_OHMS: f32 = 100_000.0;

/// Divider resistor from the sense node to ground (Ω).
///
/// 100kΩ + 330kΩ in series.
pub const DIVIDER_R_BOTTOM_OHMS: f32 = 430_000.0;

/// Calibration multiplier for the D1 mini's on-board 220k/100k divider.
///
/// Source: measured against a bench multimeter at 12.6V.
pub const SENSOR_CALIBRATION: f32 = 1.20;

// ===== DISPLAY =====

/// Character columns of the LCD.
pub const LCD_COLUMNS: usize = 16;

/// Character rows of the LCD.
pub const LCD_ROWS: usize = 2;
