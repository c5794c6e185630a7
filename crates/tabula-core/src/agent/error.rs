use thiserror::Error;

use crate::agent::config::ConfigError;

/// Error type for constructing solvers and learners.
///
/// Backups and updates never fail; every missing lookup resolves to a default.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("state space is empty; nothing to solve")]
    EmptyStateSpace,

    #[error(transparent)]
    Config(#[from] ConfigError),
}
