mod error;
mod evaluate;
mod game;
mod maze;
mod opponents;

pub use error::ArenaError;
pub use evaluate::{DEFAULT_MAX_STEPS, GameRecord, average_score, play_game};
pub use game::{Adversary, AdversaryMoves, ArenaConfig, ArenaGame};
pub use maze::{CLASSIC_LAYOUT, Food, Maze, NodeId, UNREACHABLE};
pub use opponents::{ChasingAdversaries, RandomAdversaries};

#[cfg(test)]
mod tests;
