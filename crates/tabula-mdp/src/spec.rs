use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tabula_core::Move;

use crate::{CompiledMdp, MdpError, compiled::PROB_TOLERANCE};

/// Declarative tabular MDP, as read from and written to YAML.
///
/// ```yaml
/// version: 1
/// start: s0
/// states:
///   - id: s0
///     actions:
///       - action: left
///         outcomes:
///           - { next: s1, prob: 1.0, reward: 1.0 }
///   - id: s1
///     terminal: true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MdpSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    pub start: String,
    pub states: Vec<StateSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSpec {
    pub id: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub terminal: bool,
    /// Declaration order is the tie-break order planners see.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ActionSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSpec {
    pub action: Move,
    pub outcomes: Vec<OutcomeSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeSpec {
    pub next: String,
    pub prob: f64,
    pub reward: f64,
}

impl MdpSpec {
    pub fn validate(&self) -> Result<(), MdpError> {
        self.validate_with_tolerance(PROB_TOLERANCE)
    }

    /// Check ids, references and per-action distributions.
    pub fn validate_with_tolerance(&self, tolerance: f64) -> Result<(), MdpError> {
        if self.start.trim().is_empty() {
            return Err(MdpError::MissingStart);
        }

        let mut declared = HashSet::with_capacity(self.states.len());
        for state in &self.states {
            if !declared.insert(state.id.as_str()) {
                return Err(MdpError::DuplicateState {
                    id: state.id.clone(),
                });
            }
        }
        if !declared.contains(self.start.as_str()) {
            return Err(MdpError::UnknownStartState {
                start: self.start.clone(),
            });
        }

        for state in &self.states {
            state.validate(&declared, tolerance)?;
        }
        Ok(())
    }

    pub fn compile(&self) -> Result<CompiledMdp, MdpError> {
        CompiledMdp::from_spec(self)
    }
}

impl StateSpec {
    fn validate(&self, declared: &HashSet<&str>, tolerance: f64) -> Result<(), MdpError> {
        if self.terminal && !self.actions.is_empty() {
            return Err(MdpError::TerminalWithActions {
                state: self.id.clone(),
            });
        }

        let mut seen = HashSet::with_capacity(self.actions.len());
        for action in &self.actions {
            if !seen.insert(action.action) {
                return Err(MdpError::DuplicateAction {
                    state: self.id.clone(),
                    action: action.action,
                });
            }
            action.validate(&self.id, declared, tolerance)?;
        }
        Ok(())
    }
}

impl ActionSpec {
    fn validate(
        &self,
        state: &str,
        declared: &HashSet<&str>,
        tolerance: f64,
    ) -> Result<(), MdpError> {
        if self.outcomes.is_empty() {
            return Err(MdpError::NoOutcomes {
                state: state.to_string(),
                action: self.action,
            });
        }

        for (index, outcome) in self.outcomes.iter().enumerate() {
            if !outcome.prob.is_finite() || outcome.prob < 0.0 {
                return Err(MdpError::InvalidProbability {
                    state: state.to_string(),
                    action: self.action,
                    index,
                    value: outcome.prob,
                });
            }
            if !outcome.reward.is_finite() {
                return Err(MdpError::InvalidReward {
                    state: state.to_string(),
                    action: self.action,
                    index,
                    value: outcome.reward,
                });
            }
            if !declared.contains(outcome.next.as_str()) {
                return Err(MdpError::UnknownNextState {
                    state: state.to_string(),
                    action: self.action,
                    next: outcome.next.clone(),
                });
            }
        }

        let sum: f64 = self.outcomes.iter().map(|o| o.prob).sum();
        if (sum - 1.0).abs() > tolerance {
            return Err(MdpError::ProbabilitySum {
                state: state.to_string(),
                action: self.action,
                sum,
                tolerance,
            });
        }
        Ok(())
    }
}
