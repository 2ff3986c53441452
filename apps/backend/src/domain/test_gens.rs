// Proptest generators for domain types.

use proptest::prelude::*;

use crate::domain::{GameView, Move, Screen};

pub fn mv() -> impl Strategy<Value = Move> {
    prop_oneof![Just(Move::Rock), Just(Move::Paper), Just(Move::Scissors)]
}

pub fn screen() -> impl Strategy<Value = Screen> {
    prop_oneof![
        Just(Screen::Home),
        Just(Screen::Play),
        Just(Screen::ResultNotReady),
        Just(Screen::ResultReady),
    ]
}

/// Wallet-like player address
pub fn player() -> impl Strategy<Value = String> {
    "0x[0-9a-f]{8}"
}

/// Two distinct player addresses
pub fn player_pair() -> impl Strategy<Value = (String, String)> {
    (player(), 0u8..=255).prop_map(|(a, salt)| {
        let b = format!("{a}{salt:02x}");
        (a, b)
    })
}

/// Views reachable from persisted state: a player who moved implies at least one move.
pub fn game_view() -> impl Strategy<Value = GameView> {
    prop_oneof![
        Just(GameView {
            move_count: 0,
            player_has_moved: false
        }),
        any::<bool>().prop_map(|moved| GameView {
            move_count: 1,
            player_has_moved: moved
        }),
        any::<bool>().prop_map(|moved| GameView {
            move_count: 2,
            player_has_moved: moved
        }),
    ]
}
