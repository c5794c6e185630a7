use tabula_core::Move;

use crate::{ArenaError, Food, Maze, UNREACHABLE};

#[test]
fn classic_layout_parses() {
    let maze = Maze::classic().expect("classic layout is valid");

    assert_eq!(maze.width(), 15);
    assert_eq!(maze.height(), 11);
    assert_eq!(maze.node_count(), 82);
    assert_eq!(maze.agent_start(), 65);
    assert_eq!(maze.adversary_starts(), &[31, 39]);
    assert_eq!(maze.cell(65), Some((8, 7)));
    assert_eq!(maze.initial_food(0), Food::PowerPill);
    assert_eq!(maze.initial_food(64), Food::Pill);
    assert_eq!(maze.initial_food(65), Food::None);
}

#[test]
fn neighbours_follow_the_grid() {
    let maze = Maze::classic().expect("classic layout is valid");

    assert_eq!(maze.neighbour(65, Move::Up), None);
    assert_eq!(maze.neighbour(65, Move::Right), Some(66));
    assert_eq!(maze.neighbour(65, Move::Down), Some(76));
    assert_eq!(maze.neighbour(65, Move::Left), Some(64));
    assert_eq!(maze.neighbour(65, Move::Neutral), Some(65));
    assert_eq!(maze.neighbour(500, Move::Neutral), None);
    assert_eq!(
        maze.legal_moves(65),
        vec![Move::Right, Move::Down, Move::Left]
    );
}

#[test]
fn distances_are_shortest_paths() {
    let maze = Maze::classic().expect("classic layout is valid");

    assert_eq!(maze.distance(65, 65), 0);
    assert_eq!(maze.distance(65, 31), 8);
    assert_eq!(maze.distance(65, 39), 7);
    assert_eq!(maze.distance(65, 71), 7);
    for node in 0..maze.node_count() as u32 {
        assert_eq!(maze.distance(node, 65), maze.distance(65, node));
    }
    assert_eq!(maze.distance(65, 9999), UNREACHABLE);
}

#[test]
fn steering_breaks_ties_in_move_order() {
    let maze = Maze::classic().expect("classic layout is valid");

    // Right and Left are both 7 away from node 31, Down is 9.
    assert_eq!(maze.step_towards(65, 31), Some(Move::Right));
    assert_eq!(maze.step_away(65, 31), Some(Move::Down));
}

#[test]
fn separate_components_are_unreachable() {
    let maze = Maze::parse("#####\n#P#G#\n#####\n").expect("valid layout");

    assert_eq!(maze.node_count(), 2);
    assert_eq!(maze.distance(0, 1), UNREACHABLE);
    assert!(maze.legal_moves(0).is_empty());
    assert_eq!(maze.step_towards(0, 1), None);
}

#[test]
fn malformed_layouts_are_rejected() {
    assert!(matches!(Maze::parse(""), Err(ArenaError::EmptyLayout)));
    assert!(matches!(
        Maze::parse("#####\n#P.G#\n####\n"),
        Err(ArenaError::RaggedRow {
            row: 2,
            expected: 5,
            found: 4,
        })
    ));
    assert!(matches!(
        Maze::parse("#####\n#PxG#\n#####\n"),
        Err(ArenaError::UnknownTile {
            row: 1,
            column: 2,
            tile: 'x',
        })
    ));
    assert!(matches!(
        Maze::parse("#####\n#..G#\n#####\n"),
        Err(ArenaError::MissingAgentStart)
    ));
    assert!(matches!(
        Maze::parse("#####\n#PPG#\n#####\n"),
        Err(ArenaError::DuplicateAgentStart)
    ));
    assert!(matches!(
        Maze::parse("#####\n#P..#\n#####\n"),
        Err(ArenaError::MissingAdversaryStart)
    ));
}
