//! Battery voltage trajectories
//!
//! A trajectory is a list of segments, each holding a voltage for a while.
//! Playing one against a [`Rig`] feeds the voltages in order.

use super::Rig;

/// Constant voltage for `duration_ms`
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    pub volts: f32,
    pub duration_ms: u32,
}

impl Segment {
    pub fn new(volts: f32, duration_ms: u32) -> Self {
        Self { volts, duration_ms }
    }
}

/// Feed every segment; returns true if the relay was closed at any tick
pub fn play(rig: &mut Rig, trajectory: &[Segment]) -> bool {
    let mut closed = false;
    for segment in trajectory {
        rig.board.set_volts(segment.volts);
        closed |= rig.advance_watching_relay(segment.duration_ms);
    }
    closed
}

/// Deep discharge, slow recovery past the rearm threshold, then a long rest
pub fn discharge_and_recover() -> [Segment; 4] {
    [
        Segment::new(12.4, 10_000),
        Segment::new(10.6, 20_000),
        Segment::new(12.2, 30_000),
        Segment::new(13.1, 90_000),
    ]
}

/// Voltage flirting with the rearm threshold without ever holding long enough
pub fn flicker_near_rearm() -> [Segment; 6] {
    [
        Segment::new(13.0, 20_000),
        Segment::new(12.5, 3_000),
        Segment::new(13.0, 40_000),
        Segment::new(12.7, 3_000),
        Segment::new(12.9, 55_000),
        Segment::new(12.0, 10_000),
    ]
}
