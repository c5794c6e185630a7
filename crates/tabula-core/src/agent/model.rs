use std::hash::Hash;

use crate::agent::{
    abstraction::{Abstract, AbstractState},
    action::Move,
    environment::{Environment, lookahead},
};

/// One successor of a `(state, action)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<S> {
    pub next: S,
    pub probability: f64,
    pub reward: f64,
}

/// One-step model queried by the planners.
///
/// Answers may differ between calls for the same pair when the model is
/// backed by a stochastic simulation; planners treat every call as fresh.
pub trait TransitionModel {
    type State: Clone + Eq + Hash;

    /// Actions to consider from `state`, in tie-break order. Empty means terminal.
    fn legal_actions(&self, state: &Self::State) -> Vec<Move>;

    /// Successors of taking `action` in `state`. Empty disqualifies the action.
    fn transitions(&mut self, state: &Self::State, action: Move) -> Vec<Transition<Self::State>>;
}

/// Model that answers by simulating one tick of a live environment.
///
/// Every query copies the held environment, advances the copy with the
/// candidate move against a neutral adversary response, and reports the
/// resulting abstract state with probability 1.0. The queried abstract state
/// is a table key only; the environment is not rebuilt from it.
#[derive(Debug, Clone)]
pub struct SimulationModel<E> {
    env: E,
}

impl<E: Environment> SimulationModel<E> {
    pub fn new(env: E) -> Self {
        SimulationModel { env }
    }

    /// Borrow the environment queries are simulated from.
    pub fn environment(&self) -> &E {
        &self.env
    }
}

impl<E: Environment> TransitionModel for SimulationModel<E> {
    type State = AbstractState;

    fn legal_actions(&self, _state: &AbstractState) -> Vec<Move> {
        Move::ALL.to_vec()
    }

    fn transitions(
        &mut self,
        _state: &AbstractState,
        action: Move,
    ) -> Vec<Transition<AbstractState>> {
        let neutral = self.env.neutral_opponent_move();
        let (_, outcome) = lookahead(&self.env, action, &neutral);
        vec![Transition {
            next: outcome.snapshot.abstract_state(),
            probability: 1.0,
            reward: outcome.reward,
        }]
    }
}
