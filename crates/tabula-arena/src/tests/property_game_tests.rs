use proptest::prelude::*;
use tabula_core::{Environment, Move, NeutralOpponent, Opponent};

use crate::ArenaGame;

fn any_move() -> impl Strategy<Value = Move> {
    prop::sample::select(Move::ALL.to_vec())
}

proptest! {
    #[test]
    fn neutral_adversaries_never_cost_points(moves in prop::collection::vec(any_move(), 0..200)) {
        let mut game = ArenaGame::classic().expect("classic game");
        let mut opponent = NeutralOpponent;
        let node_count = game.maze().node_count() as u32;

        for action in moves {
            let before = game.score();
            let response = opponent.respond(&game);
            game.advance(action, &response);

            prop_assert!(game.score() >= before);
            prop_assert!(game.agent_node() < node_count);
            let snapshot = game.snapshot();
            prop_assert_eq!(snapshot.agent_position, game.agent_node());
            if game.food_remaining() > 0 {
                prop_assert!(snapshot.target_distance < node_count);
            }
        }
    }
}
