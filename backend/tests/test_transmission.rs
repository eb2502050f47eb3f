//! Tests for the biting window and vector–host contacts

use vectorsim_core::transmission::run_contacts;
use vectorsim_core::{
    BitingWindow, Human, HumanState, Mosquito, Orchestrator, Pond, Position, RngManager,
    ScriptedRng, SimulationConfig, SimulationState, TransmissionConfig, VectorState,
};

/// Hand-built world: one pond at the centre, the given humans, the given
/// mosquito states all sitting on the pond.
fn world(humans: Vec<Human>, mosquitoes: &[VectorState]) -> SimulationState {
    let ponds = vec![Pond::new(Position::new(50.0, 50.0))];
    let mut state = SimulationState::new(humans, ponds, 100).unwrap();
    let pond = state.pond_id(0).unwrap();
    let home = state.pond(pond).position();
    for vector_state in mosquitoes {
        let mut m = Mosquito::new(pond, home, home);
        if *vector_state == VectorState::Infected {
            m.infect();
        }
        state.add_mosquito(m);
    }
    state
}

fn certain_transmission() -> TransmissionConfig {
    TransmissionConfig {
        contagion_radius: 1.0e6,
        vector_to_human: 1.0,
        human_to_vector: 1.0,
        ..TransmissionConfig::default()
    }
}

fn small_config() -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.world.width = 100;
    config.world.height = 100;
    config.humans.step = 0;
    config.vectors.step = 0.0;
    config.vectors.reproduction_probability = 0.0;
    config
}

#[test]
fn test_default_window_is_evening_to_morning() {
    let window = BitingWindow::default();
    assert_eq!(window.start_hour, 18);
    assert_eq!(window.duration_hours, 16);
    for hour in [18, 19, 23, 0, 5, 9] {
        assert!(window.is_open(hour), "hour {hour} should be open");
    }
    for hour in [10, 11, 12, 17] {
        assert!(!window.is_open(hour), "hour {hour} should be closed");
    }
}

#[test]
fn test_infected_mosquito_exposes_colocated_human() {
    let humans = vec![Human::new(Position::new(50.0, 50.0))];
    let mut state = world(humans, &[VectorState::Infected]);

    let outcome = run_contacts(&mut state, &certain_transmission(), &mut RngManager::new(1));

    assert_eq!(outcome.contacts, 1);
    assert_eq!(outcome.human_exposures, 1);
    assert_eq!(state.humans()[0].state, HumanState::exposed());
}

#[test]
fn test_recovered_human_can_be_reexposed() {
    let recovered = HumanState::Recovered { hours: 100 };
    let humans = vec![Human::with_state(Position::new(50.0, 50.0), recovered)];
    let mut state = world(humans, &[VectorState::Infected]);

    run_contacts(&mut state, &certain_transmission(), &mut RngManager::new(1));

    assert_eq!(state.humans()[0].state, HumanState::Exposed { hours: 0 });
}

#[test]
fn test_exposed_human_is_not_reset() {
    let exposed = HumanState::Exposed { hours: 100 };
    let humans = vec![Human::with_state(Position::new(50.0, 50.0), exposed)];
    let mut state = world(humans, &[VectorState::Infected]);

    let outcome = run_contacts(&mut state, &certain_transmission(), &mut RngManager::new(1));

    assert_eq!(outcome.contacts, 1);
    assert_eq!(outcome.human_exposures, 0);
    assert_eq!(state.humans()[0].state, HumanState::Exposed { hours: 100 });
}

#[test]
fn test_infectious_human_infects_susceptible_mosquito() {
    let humans = vec![Human::with_state(Position::new(50.0, 50.0), HumanState::infected())];
    let mut state = world(humans, &[VectorState::Susceptible]);
    state.mosquitoes_mut()[0].hours_unfed = 30;

    let outcome = run_contacts(&mut state, &certain_transmission(), &mut RngManager::new(1));

    assert_eq!(outcome.vector_infections, 1);
    let m = &state.mosquitoes()[0];
    assert!(m.is_infected());
    assert_eq!(m.hours_unfed, 0);
}

#[test]
fn test_contact_resets_hunger_without_transmission() {
    let humans = vec![Human::new(Position::new(50.0, 50.0))];
    let mut state = world(humans, &[VectorState::Susceptible]);
    state.mosquitoes_mut()[0].hours_unfed = 30;

    let outcome = run_contacts(&mut state, &certain_transmission(), &mut RngManager::new(1));

    assert_eq!(outcome.contacts, 1);
    assert_eq!(outcome.human_exposures + outcome.vector_infections, 0);
    assert_eq!(state.mosquitoes()[0].hours_unfed, 0);
}

#[test]
fn test_out_of_range_hosts_leave_mosquito_hungry() {
    let humans = vec![
        Human::new(Position::new(0.0, 0.0)),
        Human::new(Position::new(100.0, 100.0)),
    ];
    let mut state = world(humans, &[VectorState::Infected]);
    state.mosquitoes_mut()[0].hours_unfed = 30;
    let config = TransmissionConfig {
        contagion_radius: 11.0,
        vector_to_human: 1.0,
        ..TransmissionConfig::default()
    };

    let outcome = run_contacts(&mut state, &config, &mut RngManager::new(1));

    assert_eq!(outcome.contacts, 0);
    assert_eq!(state.mosquitoes()[0].hours_unfed, 30);
    assert!(state.humans().iter().all(|h| h.state == HumanState::Susceptible));
}

#[test]
fn test_attempts_bounded_by_population() {
    // Two humans, both out of range: only min(12, 2) draws are spent.
    let humans = vec![
        Human::new(Position::new(0.0, 0.0)),
        Human::new(Position::new(100.0, 100.0)),
    ];
    let mut state = world(humans, &[VectorState::Susceptible]);
    let config = TransmissionConfig {
        contagion_radius: 1.0,
        ..TransmissionConfig::default()
    };
    let mut rng = ScriptedRng::constant(0);

    run_contacts(&mut state, &config, &mut rng);

    assert_eq!(rng.draws(), 2);
}

#[test]
fn test_first_in_range_sample_wins() {
    // Draw 0 picks human 0 (in range); the mosquito stops there even though
    // human 1 is closer.
    let humans = vec![
        Human::new(Position::new(55.0, 50.0)),
        Human::with_state(Position::new(50.0, 50.0), HumanState::infected()),
    ];
    let mut state = world(humans, &[VectorState::Susceptible]);

    let outcome = run_contacts(&mut state, &certain_transmission(), &mut ScriptedRng::constant(0));

    assert_eq!(outcome.contacts, 1);
    assert_eq!(outcome.vector_infections, 0);
    assert!(!state.mosquitoes()[0].is_infected());
}

#[test]
fn test_zero_probabilities_never_transmit() {
    let humans: Vec<Human> = (0..20)
        .map(|i| {
            let state = if i % 2 == 0 { HumanState::infected() } else { HumanState::Susceptible };
            Human::with_state(Position::new(50.0, 50.0), state)
        })
        .collect();
    let mut state = world(humans, &[VectorState::Infected, VectorState::Susceptible]);
    let config = TransmissionConfig {
        contagion_radius: 1.0e6,
        vector_to_human: 0.0,
        human_to_vector: 0.0,
        ..TransmissionConfig::default()
    };

    let outcome = run_contacts(&mut state, &config, &mut RngManager::new(9));

    assert_eq!(outcome.contacts, 2);
    assert_eq!(outcome.human_exposures, 0);
    assert_eq!(outcome.vector_infections, 0);
}

#[test]
fn test_no_humans_no_contacts() {
    let mut state = world(Vec::new(), &[VectorState::Infected]);
    let mut rng = ScriptedRng::constant(0);
    let outcome = run_contacts(&mut state, &certain_transmission(), &mut rng);
    assert_eq!(outcome.contacts, 0);
    assert_eq!(rng.draws(), 0);
}

#[test]
fn test_orchestrator_closed_window_blocks_transmission() {
    let mut config = small_config();
    config.transmission = certain_transmission();
    // Open 18:00-19:00 only; ticks 0..18 are outside it.
    config.transmission.biting_window = BitingWindow {
        start_hour: 18,
        duration_hours: 1,
    };
    let humans = vec![Human::new(Position::new(50.0, 50.0))];
    let state = world(humans, &[VectorState::Infected]);
    let mut orchestrator = Orchestrator::from_state(config, state, RngManager::new(4)).unwrap();

    for _ in 0..18 {
        assert!(!orchestrator.biting_active());
        let result = orchestrator.tick();
        assert!(!result.biting_active);
        assert_eq!(result.contacts, Default::default());
        assert_eq!(result.counts.humans_susceptible, 1);
    }

    let result = orchestrator.tick();
    assert!(result.biting_active);
    assert_eq!(result.contacts.human_exposures, 1);
    assert_eq!(result.counts.humans_exposed, 1);
}

#[test]
fn test_orchestrator_exposes_within_one_eligible_tick() {
    let mut config = small_config();
    config.transmission = certain_transmission();
    config.transmission.biting_window = BitingWindow {
        start_hour: 0,
        duration_hours: 24,
    };
    let humans = vec![Human::new(Position::new(50.0, 50.0))];
    let state = world(humans, &[VectorState::Infected]);
    let mut orchestrator = Orchestrator::from_state(config, state, RngManager::new(8)).unwrap();

    let result = orchestrator.tick();

    assert_eq!(orchestrator.state().humans()[0].state, HumanState::Exposed { hours: 0 });
    assert_eq!(result.counts.humans_exposed, 1);
    assert_eq!(result.contacts.human_exposures, 1);
}
