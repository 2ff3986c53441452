//! Data the image renderer needs, derived without re-running game logic.

use serde::{Deserialize, Serialize};

use crate::domain::conversation::Conversation;
use crate::domain::game::Game;
use crate::domain::moves::Move;
use crate::domain::screen::Screen;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderData {
    pub screen: Screen,
    pub player_score: u32,
    pub other_score: u32,
    /// Only reported on RESULT_READY; `None` there means a draw.
    pub winner: Option<String>,
    pub player_move: Option<Move>,
    /// Opponent's move, revealed on RESULT_READY only.
    pub other_move: Option<Move>,
}

impl RenderData {
    /// Build render data for `player` from the persisted records.
    ///
    /// The "other" player is the opponent in the current game when there is
    /// one, otherwise the first other scorer of the conversation.
    pub fn derive(
        conversation: Option<&Conversation>,
        game: Option<&Game>,
        player: &str,
        screen: Screen,
    ) -> Self {
        let other = game
            .and_then(|g| g.opponent_of(player))
            .or_else(|| conversation.and_then(|c| c.other_scorer(player)));

        let player_score = conversation.map(|c| c.score_of(player)).unwrap_or(0);
        let other_score = match (conversation, other) {
            (Some(c), Some(other)) => c.score_of(other),
            _ => 0,
        };

        let ready = screen == Screen::ResultReady;
        let winner = if ready {
            game.and_then(|g| g.winner()).map(str::to_string)
        } else {
            None
        };
        let other_move = match (ready, game, other) {
            (true, Some(g), Some(other)) => g.move_of(other),
            _ => None,
        };

        Self {
            screen,
            player_score,
            other_score,
            winner,
            player_move: game.and_then(|g| g.move_of(player)),
            other_move,
        }
    }
}
