use std::hash::Hash;

use tracing::{debug, info};

use crate::agent::{
    abstraction::{Abstract, AbstractState, Snapshot},
    action::Move,
    backup::greedy_backup,
    config::PlanningConfig,
    controller::Controller,
    error::SolverError,
    model::TransitionModel,
    tables::{Policy, ValueFunction},
};

/// Optimal values and greedy policy computed by fixed-count Bellman-optimality sweeps.
///
/// Everything is computed in `solve`; the result is read-only afterwards.
#[derive(Debug, Clone)]
pub struct ValueIteration<S> {
    values: ValueFunction<S>,
    policy: Policy<S>,
    sweeps_run: usize,
    last_delta: f64,
}

impl<S: Clone + Eq + Hash> ValueIteration<S> {
    /// Run `config.sweeps` synchronous sweeps over `states`.
    ///
    /// Each sweep reads only the previous sweep's values and replaces the
    /// value function and policy wholesale at the end.
    pub fn solve<M>(
        states: &[S],
        model: &mut M,
        config: &PlanningConfig,
    ) -> Result<Self, SolverError>
    where
        M: TransitionModel<State = S>,
    {
        config.validate()?;
        if states.is_empty() {
            return Err(SolverError::EmptyStateSpace);
        }

        let mut values = ValueFunction::zeroed(states);
        let mut policy = Policy::neutral(states);
        let mut last_delta = 0.0;

        for sweep in 0..config.sweeps {
            let mut next_values = ValueFunction::with_capacity(states.len());
            let mut next_policy = Policy::with_capacity(states.len());

            for state in states {
                let (action, value) = greedy_backup(model, state, &values, config.gamma)
                    .unwrap_or((Move::NEUTRAL, 0.0));
                next_values.insert(state.clone(), value);
                next_policy.insert(state.clone(), action);
            }

            last_delta = next_values.max_delta(&values);
            debug!(sweep, max_delta = last_delta, "value iteration sweep");

            values = next_values;
            policy = next_policy;
        }

        info!(
            states = states.len(),
            sweeps = config.sweeps,
            max_delta = last_delta,
            "value iteration finished"
        );

        Ok(ValueIteration {
            values,
            policy,
            sweeps_run: config.sweeps,
            last_delta,
        })
    }

    pub fn values(&self) -> &ValueFunction<S> {
        &self.values
    }

    pub fn policy(&self) -> &Policy<S> {
        &self.policy
    }

    /// Value of `state`, 0.0 when it was never enumerated.
    pub fn value(&self, state: &S) -> f64 {
        self.values.get_or_default(state)
    }

    /// Greedy move for `state`, `Move::NEUTRAL` when it was never enumerated.
    pub fn action(&self, state: &S) -> Move {
        self.policy.get_or_default(state)
    }

    pub fn sweeps_run(&self) -> usize {
        self.sweeps_run
    }

    /// Largest absolute value change during the final sweep.
    pub fn last_delta(&self) -> f64 {
        self.last_delta
    }
}

impl Controller for ValueIteration<AbstractState> {
    fn act(&self, snapshot: &Snapshot) -> Move {
        self.action(&snapshot.abstract_state())
    }
}
