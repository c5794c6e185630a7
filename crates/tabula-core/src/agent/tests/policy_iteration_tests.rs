use rand::rngs::mock::StepRng;

use crate::{Move, PlanningConfig, PolicyIteration, SolverError};

use super::support::ToyModel;

fn config(max_policy_iterations: usize) -> PlanningConfig {
    PlanningConfig {
        max_policy_iterations,
        ..PlanningConfig::default()
    }
}

fn gamble_model() -> ToyModel {
    ToyModel::new()
        .state(0, &[Move::Left, Move::Right])
        .state(1, &[])
        .outcome(0, Move::Left, 1, 1.0, 1.0)
        .outcome(0, Move::Right, 0, 0.5, 0.0)
        .outcome(0, Move::Right, 1, 0.5, 2.0)
}

fn recurrent_model() -> ToyModel {
    ToyModel::new()
        .state(0, &[Move::Left, Move::Right])
        .state(1, &[Move::Left, Move::Right])
        .outcome(0, Move::Left, 0, 1.0, 1.0)
        .outcome(0, Move::Right, 1, 1.0, 0.0)
        .outcome(1, Move::Left, 0, 1.0, 0.0)
        .outcome(1, Move::Right, 1, 1.0, 2.0)
}

#[test]
fn converges_to_the_optimal_policy() {
    let mut model = gamble_model();
    let solver = PolicyIteration::solve(&[0, 1], &mut model, &config(20)).expect("solve");

    assert!(solver.is_stable());
    assert!(solver.iterations_run() <= 2);
    assert_eq!(solver.action(&0), Move::Right);
    assert_eq!(solver.action(&1), Move::NEUTRAL);
    assert!((solver.value(&0) - 1.0 / 0.55).abs() < 1e-3);
    assert_eq!(solver.value(&1), 0.0);
}

#[test]
fn recurrent_model_settles_on_the_better_loop() {
    let mut model = recurrent_model();
    let solver = PolicyIteration::solve(&[0, 1], &mut model, &config(20)).expect("solve");

    assert!(solver.is_stable());
    assert!(solver.iterations_run() <= 20);
    assert_eq!(solver.action(&0), Move::Right);
    assert_eq!(solver.action(&1), Move::Right);
}

#[test]
fn stable_policy_is_a_fixed_point_of_improvement() {
    let mut model = recurrent_model();
    let solver = PolicyIteration::solve(&[0, 1], &mut model, &config(20)).expect("solve");

    assert!(solver.is_stable());
    assert!(solver.is_stable_under(&mut model));
    // Probing does not touch the solver.
    assert_eq!(solver.action(&0), Move::Right);
    assert_eq!(solver.action(&1), Move::Right);
}

#[test]
fn iteration_cap_stops_an_unstable_run() {
    // A zero-valued rng always picks the first legal move, so s0 starts on Left.
    let mut rng = StepRng::new(0, 0);
    let mut model = gamble_model();
    let solver =
        PolicyIteration::solve_with_rng(&[0, 1], &mut model, &config(1), &mut rng).expect("solve");

    assert_eq!(solver.iterations_run(), 1);
    assert!(!solver.is_stable());
    assert_eq!(solver.action(&0), Move::Right);
}

#[test]
fn same_seed_gives_the_same_result() {
    let states: Vec<u8> = (0..6).collect();
    let mut model = ToyModel::new();
    for state in 0..5u8 {
        model = model
            .state(state, &[Move::Up, Move::Down, Move::Left])
            .outcome(state, Move::Up, state + 1, 1.0, 1.0)
            .outcome(state, Move::Down, state + 1, 1.0, 1.0)
            .outcome(state, Move::Left, state + 1, 1.0, 1.0);
    }
    model = model.state(5, &[]);

    let cfg = PlanningConfig {
        seed: 7,
        ..config(20)
    };
    let a = PolicyIteration::solve(&states, &mut model.clone(), &cfg).expect("solve");
    let b = PolicyIteration::solve(&states, &mut model.clone(), &cfg).expect("solve");

    for state in &states {
        assert_eq!(a.action(state), b.action(state));
        assert_eq!(a.value(state), b.value(state));
    }
    // All moves are equivalent, so improvement settles on the first one.
    for state in 0..5u8 {
        assert_eq!(a.action(&state), Move::Up);
    }
    assert_eq!(a.action(&5), Move::NEUTRAL);
}

#[test]
fn states_without_moves_stay_neutral_and_worthless() {
    let mut model = ToyModel::new()
        .state(0, &[Move::Down])
        .state(1, &[])
        .outcome(0, Move::Down, 1, 1.0, 4.0);

    let solver = PolicyIteration::solve(&[0, 1], &mut model, &config(20)).expect("solve");

    assert_eq!(solver.action(&1), Move::NEUTRAL);
    assert_eq!(solver.value(&1), 0.0);
    assert_eq!(solver.value(&0), 4.0);
    assert_eq!(solver.action(&99), Move::NEUTRAL);
    assert_eq!(solver.snapshot().state_count, 2);
}

#[test]
fn empty_state_space_is_rejected() {
    let mut model = gamble_model();
    let err = PolicyIteration::solve(&[], &mut model, &config(20)).expect_err("no states");
    assert!(matches!(err, SolverError::EmptyStateSpace));

    let err = PolicyIteration::solve(&[0, 1], &mut model, &config(0)).expect_err("no rounds");
    assert!(matches!(err, SolverError::Config(_)));
}
