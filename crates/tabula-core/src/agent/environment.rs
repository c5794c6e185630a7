use crate::agent::{abstraction::Snapshot, action::Move};

/// Interface the agents consume from a live simulated environment.
///
/// `Clone` must produce an independent deep copy that can be advanced without
/// touching the original.
pub trait Environment: Clone {
    /// Joint response of every adversary for one tick.
    type OpponentMove;

    /// Advance the environment in place by exactly one tick.
    fn advance(&mut self, action: Move, opponent: &Self::OpponentMove);

    fn score(&self) -> i64;

    fn is_terminal(&self) -> bool;

    /// Moves that are physically possible from the agent's current position.
    fn legal_actions(&self) -> Vec<Move>;

    fn snapshot(&self) -> Snapshot;

    /// Response in which no adversary does anything.
    fn neutral_opponent_move(&self) -> Self::OpponentMove;
}

/// Policy controlling the adversaries.
pub trait Opponent<E: Environment> {
    fn respond(&mut self, env: &E) -> E::OpponentMove;
}

/// Adversaries that never react.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralOpponent;

impl<E: Environment> Opponent<E> for NeutralOpponent {
    fn respond(&mut self, env: &E) -> E::OpponentMove {
        env.neutral_opponent_move()
    }
}

/// Result of advancing an environment by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub snapshot: Snapshot,
    /// Raw score delta across the tick.
    pub reward: f64,
    pub terminal: bool,
}

/// Advance `env` in place by one tick and measure what happened.
pub fn simulate_step<E: Environment>(
    env: &mut E,
    action: Move,
    opponent_move: &E::OpponentMove,
) -> StepOutcome {
    let score_before = env.score();
    env.advance(action, opponent_move);
    StepOutcome {
        snapshot: env.snapshot(),
        reward: (env.score() - score_before) as f64,
        terminal: env.is_terminal(),
    }
}

/// Step a copy of `env`, leaving the original untouched.
pub fn lookahead<E: Environment>(
    env: &E,
    action: Move,
    opponent_move: &E::OpponentMove,
) -> (E, StepOutcome) {
    let mut copy = env.clone();
    let outcome = simulate_step(&mut copy, action, opponent_move);
    (copy, outcome)
}
