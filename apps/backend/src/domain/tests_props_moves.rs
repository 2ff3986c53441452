use proptest::prelude::*;

use crate::domain::{best_move, test_gens, test_prelude, Game, Move, RoundOutcome};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: dominance is antisymmetric. For distinct moves exactly one wins,
    /// and swapping the order yields the same winner.
    #[test]
    fn prop_best_move_antisymmetric(a in test_gens::mv(), b in test_gens::mv()) {
        let ab = best_move(a, b);
        let ba = best_move(b, a);
        prop_assert_eq!(ab, ba);
        if a == b {
            prop_assert_eq!(ab, None);
        } else {
            let winner = ab.expect("distinct moves always have a winner");
            prop_assert!(winner == a || winner == b);
            let loser = if winner == a { b } else { a };
            prop_assert_eq!(winner.beats(), loser);
            prop_assert_ne!(loser.beats(), winner);
        }
    }

    /// Property: the game winner is the player who played the dominating move,
    /// independent of arrival order.
    #[test]
    fn prop_game_winner_follows_move(
        (p1, p2) in test_gens::player_pair(),
        m1 in test_gens::mv(),
        m2 in test_gens::mv(),
    ) {
        let mut game = Game::new("c");
        game.record_move(&p1, m1);
        game.record_move(&p2, m2);

        let expected = match best_move(m1, m2) {
            None => RoundOutcome::Draw,
            Some(best) if best == m1 => RoundOutcome::Won { winner: p1.clone() },
            Some(_) => RoundOutcome::Won { winner: p2.clone() },
        };
        prop_assert_eq!(game.outcome(), expected);
    }
}

#[test]
fn every_move_beats_exactly_one_other() {
    for m in [Move::Rock, Move::Paper, Move::Scissors] {
        let beaten: Vec<_> = [Move::Rock, Move::Paper, Move::Scissors]
            .into_iter()
            .filter(|o| best_move(m, *o) == Some(m) && *o != m)
            .collect();
        assert_eq!(beaten, vec![m.beats()]);
    }
}
