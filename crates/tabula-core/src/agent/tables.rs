use std::{
    collections::{HashMap, hash_map},
    hash::Hash,
};

use crate::agent::{
    abstraction::{AbstractState, StateActionPair},
    action::Move,
};

/// State values; any state never stored is worth 0.0.
#[derive(Debug, Clone)]
pub struct ValueFunction<S> {
    values: HashMap<S, f64>,
}

impl<S: Clone + Eq + Hash> ValueFunction<S> {
    /// Start every state at 0.0.
    pub fn zeroed(states: &[S]) -> Self {
        ValueFunction {
            values: states.iter().cloned().map(|s| (s, 0.0)).collect(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        ValueFunction {
            values: HashMap::with_capacity(capacity),
        }
    }

    pub fn get_or_default(&self, state: &S) -> f64 {
        self.values.get(state).copied().unwrap_or(0.0)
    }

    pub(crate) fn insert(&mut self, state: S, value: f64) {
        self.values.insert(state, value);
    }

    pub fn contains(&self, state: &S) -> bool {
        self.values.contains_key(state)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, S, f64> {
        self.values.iter()
    }

    /// Largest absolute difference to `other` over this function's states.
    pub fn max_delta(&self, other: &ValueFunction<S>) -> f64 {
        self.values
            .iter()
            .map(|(state, value)| (value - other.get_or_default(state)).abs())
            .fold(0.0, f64::max)
    }
}

/// State to action lookup; any state never stored maps to `Move::NEUTRAL`.
#[derive(Debug, Clone)]
pub struct Policy<S> {
    actions: HashMap<S, Move>,
}

impl<S: Clone + Eq + Hash> Policy<S> {
    /// Map every state to the neutral move.
    pub fn neutral(states: &[S]) -> Self {
        Policy {
            actions: states.iter().cloned().map(|s| (s, Move::NEUTRAL)).collect(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Policy {
            actions: HashMap::with_capacity(capacity),
        }
    }

    pub fn get_or_default(&self, state: &S) -> Move {
        self.actions.get(state).copied().unwrap_or(Move::NEUTRAL)
    }

    pub(crate) fn insert(&mut self, state: S, action: Move) {
        self.actions.insert(state, action);
    }

    pub fn contains(&self, state: &S) -> bool {
        self.actions.contains_key(state)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, S, Move> {
        self.actions.iter()
    }
}

/// Sparse action values; grows only for pairs that were actually updated.
#[derive(Debug, Clone)]
pub struct QTable<S = AbstractState> {
    values: HashMap<StateActionPair<S>, f64>,
}

impl<S: Clone + Eq + Hash> Default for QTable<S> {
    fn default() -> Self {
        QTable {
            values: HashMap::new(),
        }
    }
}

impl<S: Clone + Eq + Hash> QTable<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `(state, action)`, 0.0 when never updated.
    pub fn get(&self, state: &S, action: Move) -> f64 {
        self.values
            .get(&StateActionPair::new(state.clone(), action))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn set(&mut self, state: S, action: Move, value: f64) {
        self.values.insert(StateActionPair::new(state, action), value);
    }

    /// Bootstrap value of `state`: max over every move, with the running max
    /// starting at 0.0. A state whose known values are all negative yields 0.0.
    pub fn max_next(&self, state: &S) -> f64 {
        Move::ALL
            .iter()
            .map(|&action| self.get(state, action))
            .fold(0.0, f64::max)
    }

    /// Greedy move over every move in enumeration order; the first strictly
    /// larger value wins. `Move::NEUTRAL` only if nothing beats negative infinity.
    pub fn best_action(&self, state: &S) -> Move {
        let mut best_action = Move::NEUTRAL;
        let mut best_value = f64::NEG_INFINITY;
        for action in Move::ALL {
            let q = self.get(state, action);
            if q > best_value {
                best_value = q;
                best_action = action;
            }
        }
        best_action
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, StateActionPair<S>, f64> {
        self.values.iter()
    }
}
