//! Property tests for the per-station state machine.

use proptest::prelude::*;
use rust_csma_ca::engine::ContentionEngine;
use rust_csma_ca::random::ChaChaSource;
use rust_csma_ca::station::Station;
use rust_csma_ca::{SimulationParameters, TimeAdvance, Topology};

fn topology_strategy() -> impl Strategy<Value = Topology> {
    prop_oneof![Just(Topology::SingleCollisionDomain), Just(Topology::HiddenTerminal)]
}

fn time_advance_strategy() -> impl Strategy<Value = TimeAdvance> {
    prop_oneof![Just(TimeAdvance::Legacy), Just(TimeAdvance::SingleSlot)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn window_bounded_and_counters_monotonic(
        seed in any::<u64>(),
        rate in 0u32..=1000,
        cw_min in 1u32..=32,
        doublings in 0u32..=7,
        topology in topology_strategy(),
        time_advance in time_advance_strategy(),
    ) {
        let cw_max = cw_min << doublings;
        let params = SimulationParameters {
            cw_min,
            cw_max,
            duration_secs: 1,
            topology,
            time_advance,
            ..SimulationParameters::default()
        };
        let mut engine = ContentionEngine::new(
            &params,
            Station::new(0, cw_min, cw_max),
            rate,
            ChaChaSource::new(seed),
        );

        let mut last = engine.station().clone();
        while engine.step() {
            let now = engine.station();
            prop_assert!(now.contention_window() >= cw_min);
            prop_assert!(now.contention_window() <= cw_max);
            prop_assert!(now.frames_transmitted() >= last.frames_transmitted());
            prop_assert!(now.collisions() >= last.collisions());
            prop_assert!(now.throughput_bytes() >= last.throughput_bytes());
            last = now.clone();
        }
        prop_assert!(engine.elapsed_us() >= params.total_duration_us());
        prop_assert_eq!(
            engine.station().throughput_bytes(),
            engine.station().frames_transmitted() * params.frame_size_bytes
        );
    }

    #[test]
    fn zero_rate_is_always_silent(seed in any::<u64>(), topology in topology_strategy()) {
        let params = SimulationParameters {
            duration_secs: 1,
            topology,
            ..SimulationParameters::default()
        };
        let station = ContentionEngine::new(
            &params,
            Station::new(0, 8, 1024),
            0,
            ChaChaSource::new(seed),
        )
        .run();
        prop_assert_eq!(station.frames_transmitted(), 0);
        prop_assert_eq!(station.collisions(), 0);
    }
}
