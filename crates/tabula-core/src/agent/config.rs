use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_AGENT_CONFIG_YAML: &str = include_str!("../../config/agent.default.yaml");

/// Ranges the state enumerator takes the Cartesian product of.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbstractionConfig {
    pub position_start: u32,
    pub position_end: u32,
    pub position_step: u32,
    /// Buckets per distance field; covers raw distances `0..distance_buckets * 10`.
    pub distance_buckets: u32,
}

impl Default for AbstractionConfig {
    fn default() -> Self {
        AbstractionConfig {
            position_start: 0,
            position_end: 100,
            position_step: 5,
            distance_buckets: 10,
        }
    }
}

impl AbstractionConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.position_step == 0 {
            return Err(ConfigError::Invalid(
                "position_step must be greater than 0".to_string(),
            ));
        }
        if self.position_end <= self.position_start {
            return Err(ConfigError::Invalid(format!(
                "position range {}..{} enumerates no states",
                self.position_start, self.position_end
            )));
        }
        if self.distance_buckets == 0 {
            return Err(ConfigError::Invalid(
                "distance_buckets must be greater than 0".to_string(),
            ));
        }
        self.state_count().map(|_| ())
    }

    /// Number of enumerated states. Expects a non-zero `position_step` and a
    /// non-empty position range.
    pub(crate) fn state_count(&self) -> Result<usize, ConfigError> {
        let positions = ((self.position_end - self.position_start) as usize)
            .div_ceil(self.position_step as usize);
        (self.distance_buckets as usize)
            .checked_pow(2)
            .and_then(|pairs| pairs.checked_mul(positions))
            .and_then(|count| count.checked_mul(2))
            .ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "{positions} positions and {} distance buckets overflow the state count",
                    self.distance_buckets
                ))
            })
    }
}

/// Parameters shared by value iteration and policy iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    pub gamma: f64,
    /// Bellman-optimality sweeps for value iteration.
    pub sweeps: usize,
    /// Outer evaluation/improvement rounds for policy iteration.
    pub max_policy_iterations: usize,
    /// Bellman-expectation sweeps per policy evaluation.
    pub evaluation_sweeps: usize,
    /// Seeds the random initial policy of policy iteration.
    pub seed: u64,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        PlanningConfig {
            gamma: 0.9,
            sweeps: 20,
            max_policy_iterations: 20,
            evaluation_sweeps: 20,
            seed: 0,
        }
    }
}

impl PlanningConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        validate_gamma(self.gamma)?;
        if self.sweeps == 0 {
            return Err(ConfigError::Invalid(
                "sweeps must be greater than 0".to_string(),
            ));
        }
        if self.max_policy_iterations == 0 {
            return Err(ConfigError::Invalid(
                "max_policy_iterations must be greater than 0".to_string(),
            ));
        }
        if self.evaluation_sweeps == 0 {
            return Err(ConfigError::Invalid(
                "evaluation_sweeps must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// How the exploration rate evolves across training episodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Exploration {
    /// Same epsilon for every episode.
    Fixed { epsilon: f64 },
    /// Multiply epsilon by `factor` after each episode, never going below `floor`.
    Decaying {
        initial: f64,
        factor: f64,
        floor: f64,
    },
}

impl Exploration {
    /// Epsilon used for the very first episode.
    pub fn initial_epsilon(&self) -> f64 {
        match *self {
            Exploration::Fixed { epsilon } => epsilon,
            Exploration::Decaying { initial, .. } => initial,
        }
    }

    /// Epsilon for the episode after one that ran with `epsilon`.
    pub fn next_epsilon(&self, epsilon: f64) -> f64 {
        match *self {
            Exploration::Fixed { epsilon } => epsilon,
            Exploration::Decaying { factor, floor, .. } => (epsilon * factor).max(floor),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Exploration::Fixed { epsilon } => validate_probability("epsilon", epsilon),
            Exploration::Decaying {
                initial,
                factor,
                floor,
            } => {
                validate_probability("initial", initial)?;
                validate_probability("floor", floor)?;
                if !factor.is_finite() || factor <= 0.0 || factor > 1.0 {
                    return Err(ConfigError::Invalid(
                        "factor must be within (0, 1]".to_string(),
                    ));
                }
                if floor > initial {
                    return Err(ConfigError::Invalid(format!(
                        "floor {floor} must not exceed initial epsilon {initial}"
                    )));
                }
                Ok(())
            }
        }
    }
}

impl Default for Exploration {
    fn default() -> Self {
        Exploration::Decaying {
            initial: 0.3,
            factor: 0.9,
            floor: 0.05,
        }
    }
}

/// Hyperparameters of the Q-learner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    pub alpha: f64,
    pub gamma: f64,
    /// Episodes per `train` call.
    pub episodes: usize,
    pub exploration: Exploration,
    pub seed: u64,
}

impl Default for LearningConfig {
    fn default() -> Self {
        LearningConfig {
            alpha: 0.1,
            gamma: 0.9,
            episodes: 5,
            exploration: Exploration::default(),
            seed: 0,
        }
    }
}

impl LearningConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !self.alpha.is_finite() || self.alpha <= 0.0 || self.alpha > 1.0 {
            return Err(ConfigError::Invalid(
                "alpha must be within (0, 1]".to_string(),
            ));
        }
        validate_gamma(self.gamma)?;
        if self.episodes == 0 {
            return Err(ConfigError::Invalid(
                "episodes must be greater than 0".to_string(),
            ));
        }
        self.exploration.validate()
    }
}

/// Top-level configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub abstraction: AbstractionConfig,
    pub planning: PlanningConfig,
    pub learning: LearningConfig,
}

impl AgentConfig {
    /// Parse an agent config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: AgentConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse an agent config from a YAML file path.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Return the default YAML config included with this crate.
    pub fn default_yaml() -> &'static str {
        DEFAULT_AGENT_CONFIG_YAML
    }

    /// Parse the default YAML config included with this crate.
    pub fn from_default_yaml() -> Result<Self, ConfigError> {
        Self::from_yaml_str(Self::default_yaml())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.abstraction.validate()?;
        self.planning.validate()?;
        self.learning.validate()
    }
}

/// Error type for loading and validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

fn validate_gamma(gamma: f64) -> Result<(), ConfigError> {
    if !gamma.is_finite() || !(0.0..=1.0).contains(&gamma) {
        return Err(ConfigError::Invalid(
            "gamma must be within [0, 1]".to_string(),
        ));
    }
    Ok(())
}

fn validate_probability(name: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::Invalid(format!(
            "{name} must be within [0, 1]"
        )));
    }
    Ok(())
}
