use tabula_core::Move;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors raised while reading, validating, building or compiling a tabular MDP.
pub enum MdpError {
    #[error("failed to read or write MDP file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse MDP YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("MDP declares no start state")]
    MissingStart,

    #[error("start state '{start}' is not declared")]
    UnknownStartState { start: String },

    #[error("state '{id}' is declared twice")]
    DuplicateState { id: String },

    #[error("state '{state}' declares {action:?} twice")]
    DuplicateAction { state: String, action: Move },

    #[error("terminal state '{state}' must not declare actions")]
    TerminalWithActions { state: String },

    #[error("state '{state}', {action:?} declares no outcomes")]
    NoOutcomes { state: String, action: Move },

    #[error("state '{state}', {action:?} leads to undeclared state '{next}'")]
    UnknownNextState {
        state: String,
        action: Move,
        next: String,
    },

    #[error("state '{state}', {action:?}, outcome {index}: invalid probability {value}")]
    InvalidProbability {
        state: String,
        action: Move,
        index: usize,
        value: f64,
    },

    #[error("state '{state}', {action:?}, outcome {index}: reward {value} is not finite")]
    InvalidReward {
        state: String,
        action: Move,
        index: usize,
        value: f64,
    },

    #[error("state '{state}', {action:?}: probabilities sum to {sum}, not 1.0")]
    ProbabilitySum {
        state: String,
        action: Move,
        sum: f64,
        tolerance: f64,
    },

    #[error("builder has no state '{state}'")]
    BuilderUnknownState { state: String },

    #[error("builder state '{state}' has no {action:?} action")]
    BuilderUnknownAction { state: String, action: Move },
}
