//! Property tests over random voltage trajectories

#![cfg(feature = "std")]

mod common;

use common::scenarios::{self, Segment};
use common::Rig;
use proptest::prelude::*;
use voltguard_core::{ProtectionState, ProtectorConfig};

const DELAY_MS: u32 = 10_000;

fn config() -> ProtectorConfig {
    ProtectorConfig::default().with_rearm_delay_ms(DELAY_MS)
}

/// Voltages on either side of both thresholds
fn volts() -> impl Strategy<Value = f32> {
    prop_oneof![
        8.0f32..10.99,
        11.0f32..12.79,
        12.8f32..14.5,
    ]
}

fn segment(max_ms: u32) -> impl Strategy<Value = Segment> {
    (volts(), 100u32..max_ms).prop_map(|(v, d)| Segment::new(v, d))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Without a single stretch of DELAY_MS at or above rearm, the relay stays open
    #[test]
    fn short_recoveries_never_close_relay(
        segments in prop::collection::vec(segment(DELAY_MS - 1_500), 1..20)
    ) {
        let mut rig = Rig::with_config(config(), 10.0, 0);

        // Separate every segment with a dip so recoveries cannot chain up
        let mut trajectory = Vec::new();
        for s in segments {
            trajectory.push(s);
            trajectory.push(Segment::new(12.0, 1_500));
        }

        let closed = scenarios::play(&mut rig, &trajectory);
        prop_assert!(!closed);
    }

    /// A sustained recovery always ends armed
    #[test]
    fn sustained_recovery_rearms(
        lead_in in prop::collection::vec(segment(5_000), 0..6),
        v in 12.8f32..14.5,
        start in any::<u32>(),
    ) {
        let mut rig = Rig::with_config(config(), 10.0, start);
        scenarios::play(&mut rig, &lead_in);

        rig.board.set_volts(v);
        rig.advance(DELAY_MS + 2_500);
        prop_assert_eq!(rig.state(), ProtectionState::Armed);
        prop_assert!(rig.board.relay_closed());
    }

    /// Relay, LEDs and state never disagree, whatever the battery does
    #[test]
    fn outputs_track_state(
        trajectory in prop::collection::vec(segment(20_000), 1..15),
        start in any::<u32>(),
    ) {
        let mut rig = Rig::with_config(config(), 12.5, start);
        for s in trajectory {
            rig.board.set_volts(s.volts);
            rig.advance(s.duration_ms);
            rig.assert_consistent();
        }
    }

    /// At most one alarm per entry into CUTOFF
    #[test]
    fn one_alarm_per_cutoff(
        trajectory in prop::collection::vec(segment(15_000), 1..15),
    ) {
        let mut rig = Rig::with_config(config(), 12.5, 0);
        let mut entries = 0u32;
        let mut last = rig.state();

        for s in trajectory {
            rig.board.set_volts(s.volts);
            let mut remaining = s.duration_ms;
            while remaining > 0 {
                let step = remaining.min(common::LOOP_STEP_MS);
                rig.advance(step);
                remaining -= step;
                let state = rig.state();
                if last == ProtectionState::Armed && state == ProtectionState::Cutoff {
                    entries += 1;
                }
                last = state;
            }
        }

        prop_assert_eq!(rig.protector.peripherals().buzzer.alarms_started(), entries);
    }
}
