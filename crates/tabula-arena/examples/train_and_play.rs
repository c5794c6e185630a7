use tabula_arena::{ArenaGame, ChasingAdversaries, DEFAULT_MAX_STEPS, average_score};
use tabula_core::{AgentConfig, QLearner, SimulationModel, StateEnumerator, ValueIteration};

fn main() {
    let config = AgentConfig::from_default_yaml().expect("default config should parse");
    let games = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(10);

    let states = StateEnumerator::new(&config.abstraction)
        .expect("invalid abstraction")
        .states();
    let mut model = SimulationModel::new(ArenaGame::classic().expect("classic game"));
    let planner = ValueIteration::solve(&states, &mut model, &config.planning)
        .expect("value iteration failed");

    let mut learner = QLearner::new(config.learning.clone()).expect("invalid learning config");
    let report = learner.train(
        || ArenaGame::classic().expect("classic game"),
        || ChasingAdversaries::new(7),
    );
    println!(
        "trained episodes={} mean_score={:.1} q_entries={}",
        report.episodes.len(),
        report.mean_score(),
        learner.q_table().len()
    );

    let new_game = || ArenaGame::classic().expect("classic game");
    let mut adversary_seed = 100;
    let mut new_adversaries = || {
        adversary_seed += 1;
        ChasingAdversaries::new(adversary_seed)
    };

    let planned = average_score(
        &planner,
        games,
        new_game,
        &mut new_adversaries,
        DEFAULT_MAX_STEPS,
    );
    let learned = average_score(
        &learner,
        games,
        new_game,
        &mut new_adversaries,
        DEFAULT_MAX_STEPS,
    );
    println!(
        "games={games} value_iteration_avg={planned:.1} q_learning_avg={learned:.1}"
    );
}
