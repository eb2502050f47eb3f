//! Property tests: population invariants across seeds and small worlds

use proptest::prelude::*;
use vectorsim_core::metrics::MemorySink;
use vectorsim_core::{Orchestrator, SimulationConfig};

fn world_config(
    seed: u64,
    width: u32,
    height: u32,
    humans: usize,
    ponds: usize,
    reproduction: f64,
) -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.rng_seed = seed;
    config.horizon_hours = 48;
    config.world.width = width;
    config.world.height = height;
    config.humans.population = humans;
    config.humans.seed_infected = humans / 10;
    config.humans.seed_exposed = humans / 10;
    config.humans.seed_recovered = humans / 20;
    config.vectors.pond_count = ponds;
    config.vectors.reproduction_probability = reproduction;
    config.vectors.seed_infected = ponds * 2;
    config
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_tick_invariants_hold(
        seed in any::<u64>(),
        width in 80u32..300,
        height in 80u32..300,
        humans in 0usize..300,
        ponds in 0usize..25,
        reproduction in 0.0f64..=1.0,
    ) {
        let config = world_config(seed, width, height, humans, ponds, reproduction);
        let capacity = config.mosquito_capacity();
        let mut orchestrator = Orchestrator::new(config).unwrap();
        let bounds = *orchestrator.bounds();
        let radius_sq = orchestrator.flight().radius_squared();

        for _ in 0..48 {
            let result = orchestrator.tick();
            let state = orchestrator.state();

            prop_assert_eq!(state.num_humans(), humans);
            prop_assert_eq!(result.counts.total_humans(), humans);
            prop_assert_eq!(result.counts.total_vectors(), result.mosquito_total);
            prop_assert!(result.mosquito_total <= capacity);
            prop_assert!(state.occupancy_census().iter().all(|n| *n <= 15));

            for h in state.humans() {
                prop_assert!(bounds.contains(&h.position));
            }
            for m in state.mosquitoes() {
                prop_assert!(bounds.contains(&m.position));
                prop_assert!(m.position.distance_squared(&m.home()) <= radius_sq);
            }
        }
    }

    #[test]
    fn prop_same_seed_same_series(seed in any::<u64>()) {
        let run = || {
            let config = world_config(seed, 150, 150, 120, 10, 0.2);
            let mut orchestrator = Orchestrator::new(config).unwrap();
            let mut sink = MemorySink::new();
            orchestrator.run(&mut sink, None).unwrap();
            sink.rows
        };
        prop_assert_eq!(run(), run());
    }

    #[test]
    fn prop_no_reproduction_never_grows(seed in any::<u64>()) {
        let config = world_config(seed, 150, 150, 50, 10, 0.0);
        let mut orchestrator = Orchestrator::new(config).unwrap();
        let mut previous = orchestrator.state().num_mosquitoes();
        for _ in 0..48 {
            let result = orchestrator.tick();
            prop_assert_eq!(result.lifecycle.births, 0);
            prop_assert!(result.mosquito_total <= previous);
            previous = result.mosquito_total;
        }
    }
}
