//! Status Formatting
//!
//! Produces the two lines of the character display and the one-line serial
//! status report. Everything here is a pure function of its arguments and
//! writes into fixed-capacity `heapless` strings, so it runs without an
//! allocator.
//!
//! ```text
//! ┌────────────────┐
//! │Battery: 12.64V │   line 1: voltage, 2 decimals
//! │Rearm in: 42s   │   line 2: countdown, or "Load relay: ON"/"OFF"
//! └────────────────┘
//! ```
//!
//! Every line is padded with spaces to the display width so it overwrites
//! whatever the previous refresh left behind, and truncated if it would wrap.

use core::fmt::{self, Write};

use heapless::String;

use crate::config::Thresholds;
use crate::constants::{MS_PER_SECOND, SECONDS_PER_MINUTE};
use crate::state::ProtectionState;
use crate::time::{elapsed, Timestamp};

/// Capacity of a formatted line before it is fitted to the display
pub const LINE_CAPACITY: usize = 32;

/// One display line
pub type Line = String<LINE_CAPACITY>;

/// Both display lines, already fitted to the display width
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLines {
    /// Row 0
    pub top: Line,
    /// Row 1
    pub bottom: Line,
}

/// Milliseconds left in a rearm countdown, clamped to zero once overdue
pub fn countdown_remaining_ms(delay_ms: u32, started_at: Timestamp, now: Timestamp) -> u32 {
    delay_ms.saturating_sub(elapsed(now, started_at))
}

/// `"Battery: 12.64V"`
pub fn voltage_line(volts: f32, columns: usize) -> Line {
    let mut line = Line::new();
    // Overflow only drops characters that `fit` would cut anyway
    let _ = write!(line, "Battery: {:.2}V", volts);
    fit(&mut line, columns);
    line
}

/// `"Load relay: ON"` or `"Load relay: OFF"`
pub fn relay_line(state: ProtectionState, columns: usize) -> Line {
    let mut line = Line::new();
    let _ = line.push_str(match state {
        ProtectionState::Armed => "Load relay: ON",
        ProtectionState::Cutoff => "Load relay: OFF",
    });
    fit(&mut line, columns);
    line
}

/// `"Rearm in: 1m 5s"`, or `"Rearm in: 42s"` under a minute
pub fn countdown_line(remaining_ms: u32, columns: usize) -> Line {
    let total_seconds = remaining_ms / MS_PER_SECOND;
    let minutes = total_seconds / SECONDS_PER_MINUTE;
    let seconds = total_seconds % SECONDS_PER_MINUTE;

    let mut line = Line::new();
    let _ = line.push_str("Rearm in: ");
    if minutes > 0 {
        let _ = write!(line, "{}m ", minutes);
    }
    let _ = write!(line, "{}s", seconds);
    fit(&mut line, columns);
    line
}

/// Both display lines for the given controller snapshot
///
/// `countdown` is `Some(remaining_ms)` while a rearm countdown is active.
pub fn render(
    state: ProtectionState,
    volts: f32,
    countdown: Option<u32>,
    columns: usize,
) -> StatusLines {
    let bottom = match (state, countdown) {
        (ProtectionState::Cutoff, Some(remaining_ms)) => countdown_line(remaining_ms, columns),
        _ => relay_line(state, columns),
    };

    StatusLines {
        top: voltage_line(volts, columns),
        bottom,
    }
}

fn fit(line: &mut Line, columns: usize) {
    let columns = columns.min(LINE_CAPACITY);
    if line.len() > columns {
        line.truncate(columns);
    }
    while line.len() < columns {
        if line.push(' ').is_err() {
            break;
        }
    }
}

/// One-line status summary for a serial console
///
/// `State: ARMED | Voltage: 12.64V | Cutoff: 11.00V | Rearm: 12.80V`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusReport {
    /// Current protection state
    pub state: ProtectionState,
    /// Most recent battery voltage
    pub volts: f32,
    /// Active thresholds
    pub thresholds: Thresholds,
    /// Remaining countdown, if one is running
    pub countdown_ms: Option<u32>,
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "State: {} | Voltage: {:.2}V | Cutoff: {:.2}V | Rearm: {:.2}V",
            self.state,
            self.volts,
            self.thresholds.cutoff_volts(),
            self.thresholds.rearm_volts(),
        )?;
        if let Some(remaining_ms) = self.countdown_ms {
            write!(f, " | Rearm in: {}s", remaining_ms / MS_PER_SECOND)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voltage_line_two_decimals_padded() {
        let line = voltage_line(12.6, 16);
        assert_eq!(line.as_str(), "Battery: 12.60V ");
        assert_eq!(line.len(), 16);
    }

    #[test]
    fn voltage_line_single_digit() {
        assert_eq!(voltage_line(9.876, 16).as_str(), "Battery: 9.88V  ");
        assert_eq!(voltage_line(0.0, 16).as_str(), "Battery: 0.00V  ");
    }

    #[test]
    fn relay_lines() {
        assert_eq!(relay_line(ProtectionState::Armed, 16).as_str(), "Load relay: ON  ");
        assert_eq!(relay_line(ProtectionState::Cutoff, 16).as_str(), "Load relay: OFF ");
    }

    #[test]
    fn countdown_omits_zero_minutes() {
        assert_eq!(countdown_line(42_000, 16).as_str(), "Rearm in: 42s   ");
        assert_eq!(countdown_line(999, 16).as_str(), "Rearm in: 0s    ");
    }

    #[test]
    fn countdown_with_minutes() {
        assert_eq!(countdown_line(60_000, 16).as_str(), "Rearm in: 1m 0s ");
        assert_eq!(countdown_line(65_500, 16).as_str(), "Rearm in: 1m 5s ");
    }

    #[test]
    fn long_countdown_truncated_to_width() {
        let line = countdown_line(59 * 60_000 + 59_000, 16);
        assert_eq!(line.len(), 16);
        assert_eq!(line.as_str(), "Rearm in: 59m 59");
    }

    #[test]
    fn remaining_counts_down_and_clamps() {
        assert_eq!(countdown_remaining_ms(60_000, 1000, 1000), 60_000);
        assert_eq!(countdown_remaining_ms(60_000, 1000, 31_000), 30_000);
        assert_eq!(countdown_remaining_ms(60_000, 1000, 61_000), 0);
        assert_eq!(countdown_remaining_ms(60_000, 1000, 500_000), 0);
    }

    #[test]
    fn remaining_across_rollover() {
        let start = u32::MAX - 9_999;
        assert_eq!(countdown_remaining_ms(60_000, start, 20_000), 30_000);
    }

    #[test]
    fn render_picks_bottom_line() {
        let lines = render(ProtectionState::Cutoff, 13.0, Some(12_000), 16);
        assert_eq!(lines.top.as_str(), "Battery: 13.00V ");
        assert_eq!(lines.bottom.as_str(), "Rearm in: 12s   ");

        let lines = render(ProtectionState::Cutoff, 12.0, None, 16);
        assert_eq!(lines.bottom.as_str(), "Load relay: OFF ");

        // A stray countdown never shows while armed
        let lines = render(ProtectionState::Armed, 12.0, Some(5_000), 16);
        assert_eq!(lines.bottom.as_str(), "Load relay: ON  ");
    }

    #[test]
    fn wider_display_gets_wider_lines() {
        assert_eq!(voltage_line(12.5, 20).len(), 20);
    }

    #[cfg(feature = "std")]
    #[test]
    fn status_report_format() {
        let report = StatusReport {
            state: ProtectionState::Cutoff,
            volts: 10.456,
            thresholds: Thresholds::default(),
            countdown_ms: None,
        };
        assert_eq!(
            report.to_string(),
            "State: CUTOFF | Voltage: 10.46V | Cutoff: 11.00V | Rearm: 12.80V"
        );

        let counting = StatusReport { countdown_ms: Some(41_500), ..report };
        assert!(counting.to_string().ends_with(" | Rearm in: 41s"));
    }
}
