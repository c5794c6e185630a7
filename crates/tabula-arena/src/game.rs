use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tabula_core::{Environment, Move, Snapshot};

use crate::{
    ArenaError,
    maze::{Food, Maze, NodeId, UNREACHABLE},
};

const DEFAULT_ARENA_CONFIG_YAML: &str = include_str!("../config/arena.default.yaml");

/// Scoring and timing rules of an arena game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub pill_score: i64,
    pub power_pill_score: i64,
    /// Awarded for catching an edible adversary.
    pub adversary_score: i64,
    /// Ticks adversaries stay edible after a power pill.
    pub edible_ticks: u32,
    /// The game ends once this many ticks have been played.
    pub max_ticks: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            pill_score: 10,
            power_pill_score: 50,
            adversary_score: 200,
            edible_ticks: 30,
            max_ticks: 4000,
        }
    }
}

impl ArenaConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ArenaError> {
        let config: ArenaConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_default_yaml() -> Result<Self, ArenaError> {
        Self::from_yaml_str(DEFAULT_ARENA_CONFIG_YAML)
    }

    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.max_ticks == 0 {
            return Err(ArenaError::InvalidConfig(
                "max_ticks must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Adversary position and how long it stays edible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adversary {
    node: NodeId,
    start: NodeId,
    edible_ticks: u32,
}

impl Adversary {
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn is_edible(&self) -> bool {
        self.edible_ticks > 0
    }
}

/// One move per adversary, in the order of `ArenaGame::adversaries`.
/// Missing entries count as `Move::Neutral`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdversaryMoves(pub Vec<Move>);

/// Turn-based pill-collecting game: the agent eats food while adversaries hunt it.
///
/// Cloning is cheap: the maze is shared, only the mutable state is copied.
#[derive(Debug, Clone)]
pub struct ArenaGame {
    maze: Arc<Maze>,
    config: ArenaConfig,
    agent: NodeId,
    adversaries: Vec<Adversary>,
    food: Vec<Food>,
    food_remaining: usize,
    score: i64,
    tick: u32,
    caught: bool,
}

impl ArenaGame {
    pub fn new(maze: Arc<Maze>, config: ArenaConfig) -> Self {
        let food: Vec<Food> = (0..maze.node_count() as NodeId)
            .map(|node| maze.initial_food(node))
            .collect();
        let food_remaining = food.iter().filter(|&&f| f != Food::None).count();
        let adversaries = maze
            .adversary_starts()
            .iter()
            .map(|&start| Adversary {
                node: start,
                start,
                edible_ticks: 0,
            })
            .collect();

        ArenaGame {
            agent: maze.agent_start(),
            maze,
            config,
            adversaries,
            food,
            food_remaining,
            score: 0,
            tick: 0,
            caught: false,
        }
    }

    /// Classic layout with default rules.
    pub fn classic() -> Result<Self, ArenaError> {
        Ok(Self::new(
            Arc::new(Maze::classic()?),
            ArenaConfig::default(),
        ))
    }

    pub fn maze(&self) -> &Arc<Maze> {
        &self.maze
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn agent_node(&self) -> NodeId {
        self.agent
    }

    pub fn adversaries(&self) -> &[Adversary] {
        &self.adversaries
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    /// Pills and power pills not yet eaten.
    pub fn food_remaining(&self) -> usize {
        self.food_remaining
    }

    pub fn food_at(&self, node: NodeId) -> Food {
        self.food.get(node as usize).copied().unwrap_or(Food::None)
    }

    /// Whether a non-edible adversary reached the agent.
    pub fn is_caught(&self) -> bool {
        self.caught
    }

    /// Path length to the closest uneaten food.
    pub fn nearest_food_distance(&self) -> u32 {
        self.food
            .iter()
            .enumerate()
            .filter(|(_, f)| **f != Food::None)
            .map(|(node, _)| self.maze.distance(self.agent, node as NodeId))
            .min()
            .unwrap_or(UNREACHABLE)
    }

    /// Closest adversary by path length; first wins ties.
    pub fn nearest_adversary(&self) -> Option<(&Adversary, u32)> {
        self.adversaries
            .iter()
            .map(|a| (a, self.maze.distance(self.agent, a.node)))
            .min_by_key(|&(_, distance)| distance)
    }

    fn eat(&mut self) {
        let Some(slot) = self.food.get_mut(self.agent as usize) else {
            return;
        };
        match std::mem::replace(slot, Food::None) {
            Food::None => return,
            Food::Pill => self.score += self.config.pill_score,
            Food::PowerPill => {
                self.score += self.config.power_pill_score;
                for adversary in &mut self.adversaries {
                    adversary.edible_ticks = self.config.edible_ticks;
                }
            }
        }
        self.food_remaining -= 1;
    }

    fn resolve_contacts(&mut self) {
        for adversary in &mut self.adversaries {
            if adversary.node != self.agent {
                continue;
            }
            if adversary.is_edible() {
                self.score += self.config.adversary_score;
                adversary.node = adversary.start;
                adversary.edible_ticks = 0;
            } else {
                self.caught = true;
            }
        }
    }
}

impl Environment for ArenaGame {
    type OpponentMove = AdversaryMoves;

    /// Agent moves and eats, then adversaries move, then edible timers tick down.
    /// Contacts are checked after each half-step. Moves into walls are ignored.
    fn advance(&mut self, action: Move, opponent: &AdversaryMoves) {
        if self.is_terminal() {
            return;
        }
        self.tick += 1;

        if let Some(next) = self.maze.neighbour(self.agent, action) {
            self.agent = next;
        }
        self.eat();
        self.resolve_contacts();

        for (index, adversary) in self.adversaries.iter_mut().enumerate() {
            let direction = opponent.0.get(index).copied().unwrap_or(Move::NEUTRAL);
            if let Some(next) = self.maze.neighbour(adversary.node, direction) {
                adversary.node = next;
            }
        }
        self.resolve_contacts();

        for adversary in &mut self.adversaries {
            adversary.edible_ticks = adversary.edible_ticks.saturating_sub(1);
        }
    }

    fn score(&self) -> i64 {
        self.score
    }

    fn is_terminal(&self) -> bool {
        self.caught || self.food_remaining == 0 || self.tick >= self.config.max_ticks
    }

    fn legal_actions(&self) -> Vec<Move> {
        self.maze.legal_moves(self.agent)
    }

    fn snapshot(&self) -> Snapshot {
        let (threat_distance, threat_neutralized) = self
            .nearest_adversary()
            .map(|(adversary, distance)| (distance, adversary.is_edible()))
            .unwrap_or((UNREACHABLE, false));
        Snapshot {
            agent_position: self.agent,
            target_distance: self.nearest_food_distance(),
            threat_distance,
            threat_neutralized,
        }
    }

    fn neutral_opponent_move(&self) -> AdversaryMoves {
        AdversaryMoves(vec![Move::NEUTRAL; self.adversaries.len()])
    }
}
