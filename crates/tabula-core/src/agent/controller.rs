use crate::agent::{abstraction::Snapshot, action::Move, environment::Environment};

/// Decision-time interface: map what the environment looks like to a move.
///
/// Acting is a pure lookup and never changes what was learned.
pub trait Controller {
    fn act(&self, snapshot: &Snapshot) -> Move;

    /// Act on the current state of a live environment.
    fn act_in<E: Environment>(&self, env: &E) -> Move
    where
        Self: Sized,
    {
        self.act(&env.snapshot())
    }
}
