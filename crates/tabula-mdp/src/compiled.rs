use std::{collections::HashMap, fmt};

use serde::Serialize;
use tabula_core::{Move, Transition, TransitionModel};

use crate::{MdpError, MdpSpec};

/// Tolerance on the sum of an action's outcome probabilities.
pub(crate) const PROB_TOLERANCE: f64 = 1e-9;

/// Dense index of a compiled state, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StateKey(usize);

impl StateKey {
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for StateKey {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Validated MDP with resolved references, ready to plan over or sample from.
#[derive(Debug, Clone)]
pub struct CompiledMdp {
    start: StateKey,
    ids: Vec<String>,
    keys: HashMap<String, StateKey>,
    states: Vec<CompiledState>,
}

#[derive(Debug, Clone)]
struct CompiledState {
    terminal: bool,
    actions: Vec<CompiledAction>,
}

#[derive(Debug, Clone)]
struct CompiledAction {
    action: Move,
    transitions: Vec<Transition<StateKey>>,
    /// Running sum of `transitions[..=i].probability`.
    cdf: Vec<f64>,
}

impl CompiledMdp {
    pub(crate) fn from_spec(spec: &MdpSpec) -> Result<Self, MdpError> {
        spec.validate_with_tolerance(PROB_TOLERANCE)?;

        let ids: Vec<String> = spec.states.iter().map(|s| s.id.clone()).collect();
        let keys: HashMap<String, StateKey> = ids
            .iter()
            .enumerate()
            .map(|(index, id)| (id.clone(), StateKey(index)))
            .collect();
        let resolve = |id: &str| keys.get(id).copied();

        let start = resolve(&spec.start).ok_or_else(|| MdpError::UnknownStartState {
            start: spec.start.clone(),
        })?;

        let mut states = Vec::with_capacity(spec.states.len());
        for state in &spec.states {
            let mut actions = Vec::with_capacity(state.actions.len());
            for action in &state.actions {
                let mut transitions = Vec::with_capacity(action.outcomes.len());
                let mut cdf = Vec::with_capacity(action.outcomes.len());
                let mut cumulative = 0.0;
                for outcome in &action.outcomes {
                    let next =
                        resolve(&outcome.next).ok_or_else(|| MdpError::UnknownNextState {
                            state: state.id.clone(),
                            action: action.action,
                            next: outcome.next.clone(),
                        })?;
                    cumulative += outcome.prob;
                    cdf.push(cumulative);
                    transitions.push(Transition {
                        next,
                        probability: outcome.prob,
                        reward: outcome.reward,
                    });
                }
                actions.push(CompiledAction {
                    action: action.action,
                    transitions,
                    cdf,
                });
            }
            states.push(CompiledState {
                terminal: state.terminal,
                actions,
            });
        }

        Ok(CompiledMdp {
            start,
            ids,
            keys,
            states,
        })
    }

    pub fn start(&self) -> StateKey {
        self.start
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Every state key in declaration order; the state space handed to planners.
    pub fn states(&self) -> Vec<StateKey> {
        (0..self.states.len()).map(StateKey).collect()
    }

    pub fn is_terminal(&self, key: StateKey) -> Option<bool> {
        self.states.get(key.0).map(|s| s.terminal)
    }

    pub fn state_id(&self, key: StateKey) -> Option<&str> {
        self.ids.get(key.0).map(String::as_str)
    }

    pub fn state_key(&self, id: &str) -> Option<StateKey> {
        self.keys.get(id).copied()
    }

    /// Declared moves of `key`, in declaration order. Empty for terminal or unknown states.
    pub fn declared_actions(&self, key: StateKey) -> Vec<Move> {
        self.states
            .get(key.0)
            .map(|s| s.actions.iter().map(|a| a.action).collect())
            .unwrap_or_default()
    }

    /// Full outcome distribution of `action` in `key`, if declared.
    pub fn distribution(&self, key: StateKey, action: Move) -> Option<&[Transition<StateKey>]> {
        self.find_action(key, action).map(|a| a.transitions.as_slice())
    }

    /// Pick the outcome of `action` in `key` that `sample` (uniform in `[0, 1)`) falls into.
    pub(crate) fn sample(
        &self,
        key: StateKey,
        action: Move,
        sample: f64,
    ) -> Option<&Transition<StateKey>> {
        let action = self.find_action(key, action)?;
        let last = action.transitions.len().checked_sub(1)?;
        let index = action.cdf.partition_point(|&p| p <= sample).min(last);
        action.transitions.get(index)
    }

    fn find_action(&self, key: StateKey, action: Move) -> Option<&CompiledAction> {
        self.states
            .get(key.0)?
            .actions
            .iter()
            .find(|a| a.action == action)
    }
}

/// Exact model: every query returns the declared distribution.
impl TransitionModel for CompiledMdp {
    type State = StateKey;

    fn legal_actions(&self, state: &StateKey) -> Vec<Move> {
        self.declared_actions(*state)
    }

    fn transitions(&mut self, state: &StateKey, action: Move) -> Vec<Transition<StateKey>> {
        self.distribution(*state, action)
            .map(<[_]>::to_vec)
            .unwrap_or_default()
    }
}
