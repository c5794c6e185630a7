use std::fmt;

use serde::{Deserialize, Serialize};

use crate::agent::action::Move;

/// Width of one quantization bucket, in raw distance units.
pub const BUCKET_WIDTH: u32 = 10;

/// Raw view of an environment that the abstraction reads.
///
/// Distances are shortest-path lengths. `u32::MAX` means "nothing left to
/// measure against", e.g. every target has been collected.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Snapshot {
    pub agent_position: u32,
    pub target_distance: u32,
    pub threat_distance: u32,
    pub threat_neutralized: bool,
}

/// Compact, hashable key every table in this crate is indexed by.
///
/// Equality and hashing are field-wise, so two snapshots that quantize to the
/// same buckets are the same key everywhere.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AbstractState {
    position: u32,
    target_bucket: u32,
    threat_bucket: u32,
    threat_neutralized: bool,
}

impl AbstractState {
    /// Quantize raw distances into buckets of `BUCKET_WIDTH`.
    pub fn new(
        position: u32,
        target_distance: u32,
        threat_distance: u32,
        threat_neutralized: bool,
    ) -> Self {
        AbstractState {
            position,
            target_bucket: target_distance / BUCKET_WIDTH,
            threat_bucket: threat_distance / BUCKET_WIDTH,
            threat_neutralized,
        }
    }

    /// Build a state from values that are already bucketed.
    pub fn from_buckets(
        position: u32,
        target_bucket: u32,
        threat_bucket: u32,
        threat_neutralized: bool,
    ) -> Self {
        AbstractState {
            position,
            target_bucket,
            threat_bucket,
            threat_neutralized,
        }
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn target_bucket(&self) -> u32 {
        self.target_bucket
    }

    pub fn threat_bucket(&self) -> u32 {
        self.threat_bucket
    }

    pub fn threat_neutralized(&self) -> bool {
        self.threat_neutralized
    }
}

impl fmt::Display for AbstractState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(pos: {}, target: {}, threat: {}, neutralized: {})",
            self.position, self.target_bucket, self.threat_bucket, self.threat_neutralized
        )
    }
}

/// Anything that can be collapsed into an `AbstractState`.
pub trait Abstract {
    fn abstract_state(&self) -> AbstractState;
}

impl Abstract for Snapshot {
    fn abstract_state(&self) -> AbstractState {
        AbstractState::new(
            self.agent_position,
            self.target_distance,
            self.threat_distance,
            self.threat_neutralized,
        )
    }
}

impl Abstract for AbstractState {
    /// Already bucketed, so this is the identity.
    fn abstract_state(&self) -> AbstractState {
        *self
    }
}

/// Key of the learned Q-value table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct StateActionPair<S = AbstractState> {
    pub state: S,
    pub action: Move,
}

impl<S> StateActionPair<S> {
    pub fn new(state: S, action: Move) -> Self {
        StateActionPair { state, action }
    }
}
