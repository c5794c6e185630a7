use std::hash::Hash;

use serde::Serialize;

use crate::agent::{
    abstraction::AbstractState,
    action::Move,
    policy_iteration::PolicyIteration,
    q_learning::QLearner,
    tables::{Policy, ValueFunction},
    value_iteration::ValueIteration,
};

const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Read-only dump of a planner's policy and values, sorted by state.
#[derive(Debug, Clone, Serialize)]
pub struct PlanSnapshot<S> {
    pub schema_version: u32,
    pub state_count: usize,
    pub entries: Vec<PlanEntrySnapshot<S>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanEntrySnapshot<S> {
    pub state: S,
    pub action: Move,
    pub value: f64,
}

/// Read-only dump of a Q-table, sorted by state then action.
#[derive(Debug, Clone, Serialize)]
pub struct QTableSnapshot<S> {
    pub schema_version: u32,
    pub entry_count: usize,
    pub episodes_trained: usize,
    pub entries: Vec<QEntrySnapshot<S>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QEntrySnapshot<S> {
    pub state: S,
    pub action: Move,
    pub value: f64,
}

impl<S: Serialize> PlanSnapshot<S> {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl<S: Serialize> QTableSnapshot<S> {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn plan_snapshot<S>(policy: &Policy<S>, values: &ValueFunction<S>) -> PlanSnapshot<S>
where
    S: Clone + Eq + Hash + Ord,
{
    let mut entries: Vec<_> = policy
        .iter()
        .map(|(state, action)| PlanEntrySnapshot {
            state: state.clone(),
            action: *action,
            value: values.get_or_default(state),
        })
        .collect();
    entries.sort_by(|a, b| a.state.cmp(&b.state));

    PlanSnapshot {
        schema_version: SNAPSHOT_SCHEMA_VERSION,
        state_count: entries.len(),
        entries,
    }
}

impl<S: Clone + Eq + Hash + Ord> ValueIteration<S> {
    pub fn snapshot(&self) -> PlanSnapshot<S> {
        plan_snapshot(self.policy(), self.values())
    }
}

impl<S: Clone + Eq + Hash + Ord> PolicyIteration<S> {
    pub fn snapshot(&self) -> PlanSnapshot<S> {
        plan_snapshot(self.policy(), self.values())
    }
}

impl<R> QLearner<R> {
    pub fn snapshot(&self) -> QTableSnapshot<AbstractState> {
        let mut entries: Vec<_> = self
            .q_table()
            .iter()
            .map(|(pair, value)| QEntrySnapshot {
                state: pair.state,
                action: pair.action,
                value: *value,
            })
            .collect();
        entries.sort_by(|a, b| (a.state, a.action).cmp(&(b.state, b.action)));

        QTableSnapshot {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            entry_count: entries.len(),
            episodes_trained: self.episodes_trained(),
            entries,
        }
    }
}
