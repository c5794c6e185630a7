use std::hash::Hash;

use rand::{Rng, SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::agent::{
    abstraction::{Abstract, AbstractState, Snapshot},
    action::Move,
    backup::{greedy_backup, policy_backup},
    config::PlanningConfig,
    controller::Controller,
    error::SolverError,
    model::TransitionModel,
    tables::{Policy, ValueFunction},
};

/// Policy computed by alternating policy evaluation and greedy improvement.
#[derive(Debug, Clone)]
pub struct PolicyIteration<S> {
    states: Vec<S>,
    values: ValueFunction<S>,
    policy: Policy<S>,
    gamma: f64,
    evaluation_sweeps: usize,
    iterations_run: usize,
    stable: bool,
}

impl<S: Clone + Eq + Hash> PolicyIteration<S> {
    /// Solve with the initial random policy seeded from `config.seed`.
    pub fn solve<M>(
        states: &[S],
        model: &mut M,
        config: &PlanningConfig,
    ) -> Result<Self, SolverError>
    where
        M: TransitionModel<State = S>,
    {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::solve_with_rng(states, model, config, &mut rng)
    }

    /// Solve drawing the initial policy from `rng`.
    ///
    /// Stops as soon as an improvement pass changes no action, otherwise after
    /// `config.max_policy_iterations` rounds.
    pub fn solve_with_rng<M, R>(
        states: &[S],
        model: &mut M,
        config: &PlanningConfig,
        rng: &mut R,
    ) -> Result<Self, SolverError>
    where
        M: TransitionModel<State = S>,
        R: Rng + ?Sized,
    {
        config.validate()?;
        if states.is_empty() {
            return Err(SolverError::EmptyStateSpace);
        }

        let mut solver = PolicyIteration {
            states: states.to_vec(),
            values: ValueFunction::zeroed(states),
            policy: random_policy(states, model, rng),
            gamma: config.gamma,
            evaluation_sweeps: config.evaluation_sweeps,
            iterations_run: 0,
            stable: false,
        };

        for iteration in 0..config.max_policy_iterations {
            solver.evaluate(model);
            let changed = solver.improve(model);
            solver.iterations_run = iteration + 1;
            debug!(iteration, changed, "policy iteration round");

            if changed == 0 {
                solver.stable = true;
                break;
            }
        }

        if solver.stable {
            info!(
                states = states.len(),
                iterations = solver.iterations_run,
                "policy iteration converged"
            );
        } else {
            warn!(
                states = states.len(),
                iterations = solver.iterations_run,
                "policy iteration hit its iteration cap before the policy stabilised"
            );
        }

        Ok(solver)
    }

    /// Bellman-expectation sweeps under the current fixed policy.
    fn evaluate<M>(&mut self, model: &mut M)
    where
        M: TransitionModel<State = S>,
    {
        for _ in 0..self.evaluation_sweeps {
            let mut next_values = ValueFunction::with_capacity(self.states.len());
            for state in &self.states {
                let action = self.policy.get_or_default(state);
                let value = policy_backup(model, state, action, &self.values, self.gamma);
                next_values.insert(state.clone(), value);
            }
            self.values = next_values;
        }
    }

    /// Replace every action with the greedy one; return how many changed.
    fn improve<M>(&mut self, model: &mut M) -> usize
    where
        M: TransitionModel<State = S>,
    {
        let mut changed = 0;
        let mut next_policy = Policy::with_capacity(self.states.len());
        for state in &self.states {
            let best = greedy_action(model, state, &self.values, self.gamma);
            if best != self.policy.get_or_default(state) {
                changed += 1;
            }
            next_policy.insert(state.clone(), best);
        }
        self.policy = next_policy;
        changed
    }

    /// Run one more evaluation and improvement round on a scratch copy and
    /// report whether it would leave every action unchanged.
    pub fn is_stable_under<M>(&self, model: &mut M) -> bool
    where
        M: TransitionModel<State = S>,
    {
        let mut candidate = self.clone();
        candidate.evaluate(model);
        candidate.improve(model) == 0
    }

    pub fn values(&self) -> &ValueFunction<S> {
        &self.values
    }

    pub fn policy(&self) -> &Policy<S> {
        &self.policy
    }

    pub fn value(&self, state: &S) -> f64 {
        self.values.get_or_default(state)
    }

    pub fn action(&self, state: &S) -> Move {
        self.policy.get_or_default(state)
    }

    /// Outer evaluation/improvement rounds performed.
    pub fn iterations_run(&self) -> usize {
        self.iterations_run
    }

    /// Whether the last improvement pass changed no action.
    pub fn is_stable(&self) -> bool {
        self.stable
    }
}

fn greedy_action<M: TransitionModel>(
    model: &mut M,
    state: &M::State,
    values: &ValueFunction<M::State>,
    gamma: f64,
) -> Move {
    greedy_backup(model, state, values, gamma)
        .map(|(action, _)| action)
        .unwrap_or(Move::NEUTRAL)
}

/// Uniformly random legal move per state; neutral where nothing is legal.
fn random_policy<M, R>(states: &[M::State], model: &M, rng: &mut R) -> Policy<M::State>
where
    M: TransitionModel,
    R: Rng + ?Sized,
{
    let mut policy = Policy::with_capacity(states.len());
    for state in states {
        let action = model
            .legal_actions(state)
            .choose(rng)
            .copied()
            .unwrap_or(Move::NEUTRAL);
        policy.insert(state.clone(), action);
    }
    policy
}

impl Controller for PolicyIteration<AbstractState> {
    fn act(&self, snapshot: &Snapshot) -> Move {
        self.action(&snapshot.abstract_state())
    }
}
