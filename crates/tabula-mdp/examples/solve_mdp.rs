use std::path::PathBuf;

use tabula_core::{AgentConfig, PolicyIteration, ValueIteration};
use tabula_mdp::compile_yaml;

fn main() {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("crates/tabula-mdp/examples/sample.mdp.yaml"));

    let mut mdp = compile_yaml(&path).expect("failed to compile MDP YAML");
    let planning = AgentConfig::from_default_yaml()
        .expect("default config should parse")
        .planning;
    let states = mdp.states();

    let vi = ValueIteration::solve(&states, &mut mdp, &planning).expect("value iteration failed");
    let pi = PolicyIteration::solve(&states, &mut mdp, &planning).expect("policy iteration failed");

    for state in &states {
        println!(
            "{:>6}  vi={:?} ({:.4})  pi={:?} ({:.4})",
            mdp.state_id(*state).unwrap_or("?"),
            vi.action(state),
            vi.value(state),
            pi.action(state),
            pi.value(state),
        );
    }
    println!(
        "sweeps={} last_delta={:.6} pi_iterations={} pi_stable={}",
        vi.sweeps_run(),
        vi.last_delta(),
        pi.iterations_run(),
        pi.is_stable()
    );
}
