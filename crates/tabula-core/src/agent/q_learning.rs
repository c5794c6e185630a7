use rand::{Rng, SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::agent::{
    abstraction::{Abstract, AbstractState, Snapshot},
    action::Move,
    config::LearningConfig,
    controller::Controller,
    environment::{Environment, Opponent, simulate_step},
    error::SolverError,
    tables::QTable,
};

/// One temporal-difference update: `Q + α · (r + γ · maxNextQ − Q)`.
pub fn td_update(q_old: f64, reward: f64, max_next_q: f64, alpha: f64, gamma: f64) -> f64 {
    q_old + alpha * (reward + gamma * max_next_q - q_old)
}

/// Summary of a single training episode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeReport {
    /// Index across every `train` call on the same learner.
    pub episode: usize,
    pub steps: usize,
    pub score: i64,
    /// Exploration rate the episode ran with.
    pub epsilon: f64,
}

/// Per-episode results of one `train` call.
#[derive(Debug, Clone, Default)]
pub struct TrainingReport {
    pub episodes: Vec<EpisodeReport>,
}

impl TrainingReport {
    pub fn mean_score(&self) -> f64 {
        if self.episodes.is_empty() {
            return 0.0;
        }
        let total: i64 = self.episodes.iter().map(|e| e.score).sum();
        total as f64 / self.episodes.len() as f64
    }
}

/// Off-policy TD control with epsilon-greedy exploration.
///
/// The Q-table is only written by `train`; acting reads it.
#[derive(Debug, Clone)]
pub struct QLearner<R = ChaCha8Rng> {
    q_table: QTable<AbstractState>,
    config: LearningConfig,
    epsilon: f64,
    episodes_trained: usize,
    rng: R,
}

impl QLearner<ChaCha8Rng> {
    /// Create a learner whose exploration is seeded from `config.seed`.
    pub fn new(config: LearningConfig) -> Result<Self, SolverError> {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> QLearner<R> {
    /// Create a learner drawing exploration decisions from `rng`.
    pub fn with_rng(config: LearningConfig, rng: R) -> Result<Self, SolverError> {
        config.validate()?;
        Ok(QLearner {
            q_table: QTable::new(),
            epsilon: config.exploration.initial_epsilon(),
            config,
            episodes_trained: 0,
            rng,
        })
    }

    /// Run `config.episodes` episodes, each on a fresh environment and opponent.
    ///
    /// Calling again continues from the current Q-table and exploration rate.
    /// Episodes only end when the environment reports terminal.
    pub fn train<E, O, FEnv, FOpp>(
        &mut self,
        mut new_env: FEnv,
        mut new_opponent: FOpp,
    ) -> TrainingReport
    where
        E: Environment,
        O: Opponent<E>,
        FEnv: FnMut() -> E,
        FOpp: FnMut() -> O,
    {
        let mut report = TrainingReport::default();

        for _ in 0..self.config.episodes {
            let mut env = new_env();
            let mut opponent = new_opponent();
            let epsilon = self.epsilon;
            let steps = self.run_episode(&mut env, &mut opponent);

            let episode = EpisodeReport {
                episode: self.episodes_trained,
                steps,
                score: env.score(),
                epsilon,
            };
            info!(
                episode = episode.episode,
                steps,
                score = episode.score,
                epsilon,
                "training episode finished"
            );
            report.episodes.push(episode);

            self.episodes_trained += 1;
            self.epsilon = self.config.exploration.next_epsilon(self.epsilon);
        }

        report
    }

    fn run_episode<E, O>(&mut self, env: &mut E, opponent: &mut O) -> usize
    where
        E: Environment,
        O: Opponent<E>,
    {
        let alpha = self.config.alpha;
        let gamma = self.config.gamma;
        let mut state = env.snapshot().abstract_state();
        let mut steps = 0;

        while !env.is_terminal() {
            let action = self.select_action(&state, &env.legal_actions());
            let opponent_move = opponent.respond(env);
            let outcome = simulate_step(env, action, &opponent_move);
            let next_state = outcome.snapshot.abstract_state();

            let max_next_q = if outcome.terminal {
                0.0
            } else {
                self.q_table.max_next(&next_state)
            };
            let q_old = self.q_table.get(&state, action);
            let q_new = td_update(q_old, outcome.reward, max_next_q, alpha, gamma);
            self.q_table.set(state, action, q_new);
            debug!(%state, ?action, reward = outcome.reward, q_new, "q update");

            state = next_state;
            steps += 1;
        }

        steps
    }

    /// Epsilon-greedy choice: explore uniformly among `legal`, else exploit.
    fn select_action(&mut self, state: &AbstractState, legal: &[Move]) -> Move {
        if self.rng.gen_bool(self.epsilon) {
            if let Some(&action) = legal.choose(&mut self.rng) {
                return action;
            }
        }
        self.q_table.best_action(state)
    }
}

impl<R> QLearner<R> {
    /// Greedy move for `state` over every move; first-seen wins ties.
    pub fn best_action(&self, state: &AbstractState) -> Move {
        self.q_table.best_action(state)
    }

    pub fn q_table(&self) -> &QTable<AbstractState> {
        &self.q_table
    }

    pub fn config(&self) -> &LearningConfig {
        &self.config
    }

    /// Exploration rate the next episode will use.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Episodes run across every `train` call.
    pub fn episodes_trained(&self) -> usize {
        self.episodes_trained
    }
}

impl<R> Controller for QLearner<R> {
    fn act(&self, snapshot: &Snapshot) -> Move {
        self.best_action(&snapshot.abstract_state())
    }
}
