//! Character display contract
//!
//! The HD44780/PCF8574 driver itself is an external collaborator; the
//! controller only needs the five calls below. [`NoDisplay`] stands in when no
//! LCD is fitted.

/// Two-line character display (16x2 LCD on the reference board)
pub trait CharDisplay {
    /// Initialise the controller chip
    fn init(&mut self);

    /// Switch the backlight on
    fn backlight(&mut self);

    /// Blank the screen and home the cursor
    fn clear(&mut self);

    /// Move the cursor to `col`, `row` (zero based)
    fn set_cursor(&mut self, col: u8, row: u8);

    /// Write text at the cursor
    fn print(&mut self, text: &str);
}

/// Placeholder for boards without a display
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDisplay;

impl CharDisplay for NoDisplay {
    fn init(&mut self) {}

    fn backlight(&mut self) {}

    fn clear(&mut self) {}

    fn set_cursor(&mut self, _col: u8, _row: u8) {}

    fn print(&mut self, _text: &str) {}
}
