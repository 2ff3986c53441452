use proptest::prelude::*;

use crate::domain::{test_gens, test_prelude, Game, MoveOutcome};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: a second submission by a player who already moved never changes the game.
    #[test]
    fn prop_duplicate_move_is_noop(
        (p1, p2) in test_gens::player_pair(),
        first in test_gens::mv(),
        retry in test_gens::mv(),
        opponent_moved in any::<bool>(),
    ) {
        let mut game = Game::new("c");
        game.record_move(&p1, first);
        if opponent_moved {
            game.record_move(&p2, first);
        }
        let before = game.clone();

        prop_assert_eq!(game.record_move(&p1, retry), MoveOutcome::Rejected);
        prop_assert_eq!(game, before);
    }

    /// Property: a game never holds more than two moves, whatever is submitted.
    #[test]
    fn prop_game_caps_at_two_moves(
        submissions in proptest::collection::vec((test_gens::player(), test_gens::mv()), 0..8),
    ) {
        let mut game = Game::new("c");
        for (player, mv) in &submissions {
            game.record_move(player, *mv);
        }
        prop_assert!(game.move_count() <= 2);
        prop_assert!(game.validate().is_ok());
    }
}
