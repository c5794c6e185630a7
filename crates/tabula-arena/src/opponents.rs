use rand::{Rng, SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;
use tabula_core::{Move, Opponent};

use crate::{
    ArenaError,
    game::{AdversaryMoves, ArenaGame},
};

/// Every adversary picks a uniformly random direction that is not a wall.
#[derive(Debug, Clone)]
pub struct RandomAdversaries {
    rng: ChaCha8Rng,
}

impl RandomAdversaries {
    pub fn new(seed: u64) -> Self {
        RandomAdversaries {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Opponent<ArenaGame> for RandomAdversaries {
    fn respond(&mut self, game: &ArenaGame) -> AdversaryMoves {
        let maze = game.maze();
        AdversaryMoves(
            game.adversaries()
                .iter()
                .map(|a| random_move(&maze.legal_moves(a.node()), &mut self.rng))
                .collect(),
        )
    }
}

/// Adversaries that usually chase the agent along shortest paths and flee
/// while edible; otherwise they wander randomly.
#[derive(Debug, Clone)]
pub struct ChasingAdversaries {
    rng: ChaCha8Rng,
    aggression: f64,
}

impl ChasingAdversaries {
    pub const DEFAULT_AGGRESSION: f64 = 0.9;

    pub fn new(seed: u64) -> Self {
        ChasingAdversaries {
            rng: ChaCha8Rng::seed_from_u64(seed),
            aggression: Self::DEFAULT_AGGRESSION,
        }
    }

    /// `aggression` is the per-tick probability of a deliberate move.
    pub fn with_aggression(seed: u64, aggression: f64) -> Result<Self, ArenaError> {
        if !(0.0..=1.0).contains(&aggression) {
            return Err(ArenaError::InvalidConfig(format!(
                "aggression must be within [0, 1], got {aggression}"
            )));
        }
        Ok(ChasingAdversaries {
            rng: ChaCha8Rng::seed_from_u64(seed),
            aggression,
        })
    }
}

impl Opponent<ArenaGame> for ChasingAdversaries {
    fn respond(&mut self, game: &ArenaGame) -> AdversaryMoves {
        let maze = game.maze();
        let agent = game.agent_node();
        let mut moves = Vec::with_capacity(game.adversaries().len());

        for adversary in game.adversaries() {
            let deliberate = if self.rng.gen_bool(self.aggression) {
                if adversary.is_edible() {
                    maze.step_away(adversary.node(), agent)
                } else {
                    maze.step_towards(adversary.node(), agent)
                }
            } else {
                None
            };
            let direction = deliberate
                .unwrap_or_else(|| random_move(&maze.legal_moves(adversary.node()), &mut self.rng));
            moves.push(direction);
        }

        AdversaryMoves(moves)
    }
}

fn random_move<R: Rng + ?Sized>(legal: &[Move], rng: &mut R) -> Move {
    legal.choose(rng).copied().unwrap_or(Move::NEUTRAL)
}
