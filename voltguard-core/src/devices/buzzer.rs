//! Cutoff alarm buzzer
//!
//! Drives an active buzzer module (built-in oscillator), so the pin only
//! switches it on and off. The requested tone is kept for status reporting and
//! for boards fitted with a self-driving piezo of matching frequency.

use super::Alarm;
use crate::config::AlarmTone;
use crate::hal::{Level, Pin, PinMode};
use crate::time::{has_elapsed, Timestamp};

#[derive(Debug, Clone, Copy)]
struct Sounding {
    tone: AlarmTone,
    started_at: Timestamp,
}

/// Buzzer on an output pin with duration-based auto-stop
#[derive(Debug)]
pub struct Buzzer<P> {
    pin: P,
    sounding: Option<Sounding>,
    alarms_started: u32,
}

impl<P: Pin> Buzzer<P> {
    /// Configure the pin as output and start silent
    pub fn new(mut pin: P) -> Self {
        if let Err(e) = pin.set_mode(PinMode::Output) {
            log_warn!("buzzer pin mode rejected: {}", e);
        }
        let mut buzzer = Self { pin, sounding: None, alarms_started: 0 };
        buzzer.write(Level::Low);
        buzzer
    }

    /// Tone currently sounding, if any
    pub fn current_tone(&self) -> Option<AlarmTone> {
        self.sounding.map(|s| s.tone)
    }

    /// Number of alarms started since construction
    pub fn alarms_started(&self) -> u32 {
        self.alarms_started
    }

    fn write(&mut self, level: Level) {
        if let Err(e) = self.pin.write_digital(level) {
            log_warn!("buzzer write failed: {}", e);
        }
    }
}

impl<P: Pin> Alarm for Buzzer<P> {
    fn start_alarm(&mut self, tone: AlarmTone, now: Timestamp) {
        self.sounding = Some(Sounding { tone, started_at: now });
        self.alarms_started = self.alarms_started.wrapping_add(1);
        self.write(Level::High);
    }

    fn stop(&mut self) {
        self.sounding = None;
        self.write(Level::Low);
    }

    fn update(&mut self, now: Timestamp) {
        if let Some(sounding) = self.sounding {
            if has_elapsed(now, sounding.started_at, sounding.tone.duration_ms) {
                self.stop();
            }
        }
    }

    fn is_sounding(&self) -> bool {
        self.sounding.is_some()
    }
}
