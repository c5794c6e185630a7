use serde::{Deserialize, Serialize};

/// One tick of agent movement.
///
/// The declaration order is the enumeration order used for every argmax,
/// so ties always resolve towards the earlier variant.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Move {
    Up,
    Right,
    Down,
    Left,
    #[default]
    Neutral,
}

impl Move {
    /// Every move in fixed enumeration order.
    pub const ALL: [Move; 5] = [Move::Up, Move::Right, Move::Down, Move::Left, Move::Neutral];

    /// The no-op move, used as fallback for unknown states and terminal states.
    pub const NEUTRAL: Move = Move::Neutral;

    /// Return the move pointing the other way. `Neutral` is its own opposite.
    pub fn opposite(self) -> Move {
        match self {
            Move::Up => Move::Down,
            Move::Right => Move::Left,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Neutral => Move::Neutral,
        }
    }

    /// Position of this move in `Move::ALL`.
    pub fn index(self) -> usize {
        self as usize
    }
}
