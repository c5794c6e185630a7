use thiserror::Error;

/// Errors raised while parsing a maze layout or arena configuration.
#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("failed to parse arena YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("maze layout is empty")]
    EmptyLayout,

    #[error("maze row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown tile '{tile}' at row {row}, column {column}")]
    UnknownTile {
        row: usize,
        column: usize,
        tile: char,
    },

    #[error("maze layout has no agent start ('P')")]
    MissingAgentStart,

    #[error("maze layout has more than one agent start ('P')")]
    DuplicateAgentStart,

    #[error("maze layout has no adversary start ('G')")]
    MissingAdversaryStart,

    #[error("invalid arena config: {0}")]
    InvalidConfig(String),
}
