use std::collections::HashMap;

use crate::{Environment, Move, Snapshot, Transition, TransitionModel};

/// Hand-written model over small integer states.
#[derive(Debug, Clone, Default)]
pub struct ToyModel {
    actions: HashMap<u8, Vec<Move>>,
    outcomes: HashMap<(u8, Move), Vec<Transition<u8>>>,
    pub queries: usize,
}

impl ToyModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `state` with `actions` legal, in that order.
    pub fn state(mut self, state: u8, actions: &[Move]) -> Self {
        self.actions.insert(state, actions.to_vec());
        self
    }

    pub fn outcome(
        mut self,
        state: u8,
        action: Move,
        next: u8,
        probability: f64,
        reward: f64,
    ) -> Self {
        self.outcomes
            .entry((state, action))
            .or_default()
            .push(Transition {
                next,
                probability,
                reward,
            });
        self
    }
}

impl TransitionModel for ToyModel {
    type State = u8;

    fn legal_actions(&self, state: &u8) -> Vec<Move> {
        self.actions.get(state).cloned().unwrap_or_default()
    }

    fn transitions(&mut self, state: &u8, action: Move) -> Vec<Transition<u8>> {
        self.queries += 1;
        self.outcomes
            .get(&(*state, action))
            .cloned()
            .unwrap_or_default()
    }
}

/// Single-path environment: every move advances one cell and scores 10.
#[derive(Debug, Clone)]
pub struct Corridor {
    pub position: u32,
    pub length: u32,
    pub score: i64,
}

impl Corridor {
    pub fn new(length: u32) -> Self {
        Corridor {
            position: 0,
            length,
            score: 0,
        }
    }
}

impl Environment for Corridor {
    type OpponentMove = ();

    fn advance(&mut self, _action: Move, _opponent: &Self::OpponentMove) {
        if self.position < self.length {
            self.position += 1;
            self.score += 10;
        }
    }

    fn score(&self) -> i64 {
        self.score
    }

    fn is_terminal(&self) -> bool {
        self.position >= self.length
    }

    fn legal_actions(&self) -> Vec<Move> {
        vec![Move::Right]
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            agent_position: self.position,
            target_distance: (self.length - self.position) * 10,
            threat_distance: u32::MAX,
            threat_neutralized: false,
        }
    }

    fn neutral_opponent_move(&self) -> Self::OpponentMove {}
}
