mod agent;

pub use agent::abstraction::{Abstract, AbstractState, BUCKET_WIDTH, Snapshot, StateActionPair};
pub use agent::action::Move;
pub use agent::config::{
    AbstractionConfig, AgentConfig, ConfigError, Exploration, LearningConfig, PlanningConfig,
};
pub use agent::controller::Controller;
pub use agent::enumerator::{StateEnumerator, StateIter};
pub use agent::environment::{
    Environment, NeutralOpponent, Opponent, StepOutcome, lookahead, simulate_step,
};
pub use agent::error::SolverError;
pub use agent::model::{SimulationModel, Transition, TransitionModel};
pub use agent::policy_iteration::PolicyIteration;
pub use agent::q_learning::{EpisodeReport, QLearner, TrainingReport, td_update};
pub use agent::snapshot::{PlanEntrySnapshot, PlanSnapshot, QEntrySnapshot, QTableSnapshot};
pub use agent::tables::{Policy, QTable, ValueFunction};
pub use agent::value_iteration::ValueIteration;
