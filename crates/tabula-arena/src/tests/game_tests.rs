use std::sync::Arc;

use tabula_core::{Environment, Move, lookahead, simulate_step};

use crate::{AdversaryMoves, ArenaConfig, ArenaGame, Food, Maze, UNREACHABLE};

fn game_on(layout: &str, config: ArenaConfig) -> ArenaGame {
    let maze = Maze::parse(layout).expect("valid layout");
    ArenaGame::new(Arc::new(maze), config)
}

fn moves(moves: &[Move]) -> AdversaryMoves {
    AdversaryMoves(moves.to_vec())
}

#[test]
fn classic_game_starts_untouched() {
    let game = ArenaGame::classic().expect("classic game");

    assert_eq!(game.score(), 0);
    assert_eq!(game.tick(), 0);
    assert_eq!(game.food_remaining(), 79);
    assert!(!game.is_terminal());
    assert_eq!(
        game.legal_actions(),
        vec![Move::Right, Move::Down, Move::Left]
    );

    let snapshot = game.snapshot();
    assert_eq!(snapshot.agent_position, 65);
    assert_eq!(snapshot.target_distance, 1);
    assert_eq!(snapshot.threat_distance, 7);
    assert!(!snapshot.threat_neutralized);
}

#[test]
fn eating_a_pill_scores_and_removes_it() {
    let mut game = ArenaGame::classic().expect("classic game");
    let neutral = game.neutral_opponent_move();
    assert_eq!(neutral.0.len(), 2);

    let outcome = simulate_step(&mut game, Move::Right, &neutral);

    assert_eq!(outcome.reward, 10.0);
    assert_eq!(game.agent_node(), 66);
    assert_eq!(game.food_at(66), Food::None);
    assert_eq!(game.food_remaining(), 78);
    assert_eq!(game.tick(), 1);
}

#[test]
fn walking_into_a_wall_stays_put() {
    let mut game = ArenaGame::classic().expect("classic game");
    game.advance(Move::Up, &AdversaryMoves::default());

    assert_eq!(game.agent_node(), 65);
    assert_eq!(game.score(), 0);
    assert_eq!(game.tick(), 1);
}

#[test]
fn power_pill_makes_adversaries_edible() {
    // P=0 o=1 .=2 G=3 .=4
    let mut game = game_on("#######\n#Po.G.#\n#######\n", ArenaConfig::default());

    game.advance(Move::Right, &moves(&[Move::Neutral]));
    assert_eq!(game.score(), 50);
    assert!(game.adversaries()[0].is_edible());
    let snapshot = game.snapshot();
    assert_eq!(snapshot.threat_distance, 2);
    assert!(snapshot.threat_neutralized);

    // Agent steps onto the pill and the adversary walks into it.
    game.advance(Move::Right, &moves(&[Move::Left]));
    assert_eq!(game.score(), 50 + 10 + 200);
    assert_eq!(game.adversaries()[0].node(), 3);
    assert!(!game.adversaries()[0].is_edible());
    assert!(!game.is_caught());
}

#[test]
fn edible_time_runs_out() {
    let config = ArenaConfig {
        edible_ticks: 2,
        ..ArenaConfig::default()
    };
    let mut game = game_on("#######\n#Po.G.#\n#######\n", config);

    game.advance(Move::Right, &moves(&[Move::Right]));
    assert!(game.adversaries()[0].is_edible());
    game.advance(Move::Neutral, &moves(&[Move::Neutral]));
    assert!(!game.adversaries()[0].is_edible());
}

#[test]
fn meeting_a_hunting_adversary_ends_the_game() {
    // P=0 .=1 .=2 G=3
    let mut game = game_on("######\n#P..G#\n######\n", ArenaConfig::default());

    game.advance(Move::Right, &moves(&[Move::Left]));
    assert!(!game.is_caught());
    game.advance(Move::Right, &moves(&[Move::Neutral]));

    assert!(game.is_caught());
    assert!(game.is_terminal());
    assert_eq!(game.score(), 20);

    game.advance(Move::Left, &moves(&[Move::Neutral]));
    assert_eq!(game.tick(), 2);
    assert_eq!(game.agent_node(), 2);
}

#[test]
fn clearing_all_food_ends_the_game() {
    // The adversary is walled off in its own component.
    let mut game = game_on("######\n#P.#G#\n######\n", ArenaConfig::default());
    game.advance(Move::Right, &moves(&[]));

    assert!(game.is_terminal());
    assert!(!game.is_caught());
    assert_eq!(game.food_remaining(), 0);
    let snapshot = game.snapshot();
    assert_eq!(snapshot.target_distance, UNREACHABLE);
    assert_eq!(snapshot.threat_distance, UNREACHABLE);
}

#[test]
fn tick_limit_ends_the_game() {
    let maze = Maze::classic().expect("classic layout is valid");
    let config = ArenaConfig {
        max_ticks: 3,
        ..ArenaConfig::default()
    };
    let mut game = ArenaGame::new(Arc::new(maze), config);

    for _ in 0..3 {
        assert!(!game.is_terminal());
        game.advance(Move::Neutral, &AdversaryMoves::default());
    }
    assert!(game.is_terminal());
}

#[test]
fn lookahead_leaves_the_original_alone() {
    let game = ArenaGame::classic().expect("classic game");
    let (copy, outcome) = lookahead(&game, Move::Left, &game.neutral_opponent_move());

    assert_eq!(outcome.reward, 10.0);
    assert_eq!(copy.agent_node(), 64);
    assert_eq!(game.agent_node(), 65);
    assert_eq!(game.score(), 0);
    assert_eq!(game.food_at(64), Food::Pill);
    assert!(Arc::ptr_eq(game.maze(), copy.maze()));
}

#[test]
fn config_yaml_defaults_and_validation() {
    let config = ArenaConfig::from_default_yaml().expect("default arena config");
    assert_eq!(config, ArenaConfig::default());

    let partial = ArenaConfig::from_yaml_str("max_ticks: 50\n").expect("partial config");
    assert_eq!(partial.max_ticks, 50);
    assert_eq!(partial.pill_score, 10);

    assert!(ArenaConfig::from_yaml_str("max_ticks: 0\n").is_err());
}
