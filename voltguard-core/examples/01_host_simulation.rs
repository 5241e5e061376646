//! Host Simulation Example
//!
//! Runs the protection controller against a mock board and a scripted
//! battery: a load drains the bank below cutoff, a charger brings it back,
//! and the controller walks through cutoff, countdown, settle check and rearm.
//!
//! ## What You'll Learn
//!
//! - Wiring a `Protector` to its peripherals
//! - Driving it from a cooperative loop
//! - Reading the display lines and the serial status report
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_host_simulation
//! ```

use voltguard_core::mock::MockBoard;
use voltguard_core::time::{FixedTime, TimeSource};
use voltguard_core::{ProtectionState, Protector, ProtectorConfig};

/// Battery voltage at `t` seconds into the script
fn battery_volts(t_s: f32) -> f32 {
    match t_s {
        t if t < 20.0 => 12.6 - t * 0.05,              // draining under load
        t if t < 40.0 => 11.6 - (t - 20.0) * 0.06,     // sagging past cutoff
        t if t < 55.0 => 10.4 + (t - 40.0) * 0.17,     // charger connected
        t if t < 70.0 => 12.9 - (t - 55.0) * 0.02,     // dips back into the band
        _ => 13.2,                                     // charged
    }
}

fn main() {
    println!("VoltGuard Host Simulation");
    println!("=========================\n");

    // Shorter delay than the 60s default so the run stays brief
    let config = ProtectorConfig::default().with_rearm_delay_ms(20_000);
    println!("Cutoff {:.2}V, rearm {:.2}V, delay {}s\n",
        config.cutoff_volts, config.rearm_volts, config.rearm_delay_ms / 1000);

    let board = MockBoard::new(battery_volts(0.0));
    let mut clock = FixedTime::new(0);
    let mut protector = match Protector::new(config, board.peripherals(), clock.now()) {
        Ok(protector) => protector,
        Err(e) => {
            eprintln!("invalid configuration: {}", e);
            return;
        }
    };

    let mut last_state = protector.state();
    let mut last_waiting = protector.is_waiting();

    // 100 seconds of main loop at 20 Hz
    for _ in 0..2000 {
        clock.advance(50);
        board.set_volts(battery_volts(clock.now() as f32 / 1000.0));
        protector.poll(&clock);

        let state = protector.state();
        let waiting = protector.is_waiting();
        if state != last_state || waiting != last_waiting {
            println!("t={:>6}ms  {}", clock.now(), protector.status(clock.now()));
            println!("           |{}|", board.display.line(0));
            println!("           |{}|", board.display.line(1));
            println!("           relay {}  green {}  red {}  buzzer {}\n",
                on_off(board.relay_closed()),
                on_off(board.green_lit()),
                on_off(board.red_lit()),
                on_off(board.buzzing()));
            last_state = state;
            last_waiting = waiting;
        }
    }

    let outcome = match protector.state() {
        ProtectionState::Armed => "load connected",
        ProtectionState::Cutoff => "load disconnected",
    };
    println!("Finished: {} ({} alarm(s) sounded)",
        outcome, protector.peripherals().buzzer.alarms_started());
}

fn on_off(on: bool) -> &'static str {
    if on { "ON " } else { "off" }
}
