use proptest::prelude::*;

use crate::domain::{next_step, test_gens, test_prelude, GameView, Screen, Step};

/// Independent transcription of the transition table.
fn oracle(previous: Screen, view: GameView) -> Step {
    let full = view.move_count == 2;
    match (previous, full, view.player_has_moved) {
        (Screen::Play, _, _) => Step::SubmitMove,
        (Screen::Home | Screen::ResultReady, true, _) => Step::Show(Screen::Play),
        (Screen::Home | Screen::ResultReady, false, false) => Step::Show(Screen::Play),
        (Screen::Home | Screen::ResultReady, false, true) => Step::Show(Screen::ResultNotReady),
        (Screen::ResultNotReady, true, _) => Step::Show(Screen::ResultReady),
        (Screen::ResultNotReady, false, true) => Step::Show(Screen::ResultNotReady),
        (Screen::ResultNotReady, false, false) => Step::Show(Screen::Play),
    }
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: transitions are deterministic and match the table.
    #[test]
    fn prop_next_step_matches_table(previous in test_gens::screen(), view in test_gens::game_view()) {
        let first = next_step(previous, view);
        let second = next_step(previous, view);
        prop_assert_eq!(first, second);
        prop_assert_eq!(first, oracle(previous, view));
    }

    /// Property: the machine never leads back to HOME.
    #[test]
    fn prop_next_step_never_returns_home(previous in test_gens::screen(), view in test_gens::game_view()) {
        prop_assert_ne!(next_step(previous, view), Step::Show(Screen::Home));
    }
}
