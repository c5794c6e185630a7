use tabula_core::{
    Abstract, AgentConfig, Controller, Environment, Move, NeutralOpponent, QLearner, Snapshot,
};

/// Track where only stepping onto the goal scores.
#[derive(Debug, Clone)]
struct Track {
    position: u32,
    goal: u32,
    score: i64,
}

impl Track {
    fn new(goal: u32) -> Self {
        Track {
            position: 0,
            goal,
            score: 0,
        }
    }
}

impl Environment for Track {
    type OpponentMove = ();

    fn advance(&mut self, action: Move, _opponent: &Self::OpponentMove) {
        match action {
            Move::Right if self.position < self.goal => self.position += 1,
            Move::Left => self.position = self.position.saturating_sub(1),
            _ => {}
        }
        if self.position == self.goal {
            self.score += 100;
        }
    }

    fn score(&self) -> i64 {
        self.score
    }

    fn is_terminal(&self) -> bool {
        self.position >= self.goal
    }

    fn legal_actions(&self) -> Vec<Move> {
        if self.position == 0 {
            vec![Move::Right]
        } else {
            vec![Move::Left, Move::Right]
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            agent_position: self.position,
            target_distance: (self.goal - self.position) * 10,
            threat_distance: u32::MAX,
            threat_neutralized: false,
        }
    }

    fn neutral_opponent_move(&self) -> Self::OpponentMove {}
}

#[test]
fn public_training_reaches_the_goal_every_episode() {
    let mut learning = AgentConfig::from_default_yaml()
        .expect("default yaml should parse")
        .learning;
    learning.episodes = 40;

    let mut learner = QLearner::new(learning).expect("valid config");
    let report = learner.train(|| Track::new(4), || NeutralOpponent);

    assert_eq!(report.episodes.len(), 40);
    assert!(report.episodes.iter().all(|e| e.score == 100));
    assert_eq!(report.mean_score(), 100.0);
    assert_eq!(learner.episodes_trained(), 40);

    let mut near_goal = Track::new(4);
    near_goal.position = 3;
    assert_eq!(learner.act_in(&near_goal), Move::Right);

    let state = near_goal.snapshot().abstract_state();
    assert!(learner.q_table().get(&state, Move::Right) > 0.0);
}

#[test]
fn public_same_seed_learns_the_same_table() {
    let mut learning = AgentConfig::default().learning;
    learning.episodes = 10;
    learning.seed = 11;

    let mut a = QLearner::new(learning.clone()).expect("valid config");
    let mut b = QLearner::new(learning).expect("valid config");
    let report_a = a.train(|| Track::new(3), || NeutralOpponent);
    let report_b = b.train(|| Track::new(3), || NeutralOpponent);

    assert_eq!(report_a.episodes, report_b.episodes);
    assert_eq!(a.snapshot().to_json().ok(), b.snapshot().to_json().ok());
}
