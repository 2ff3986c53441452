//! Persistent context binding two players and their cumulative score.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::game::GameId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Current (latest) game of this conversation.
    pub game_id: GameId,
    /// Win counts keyed by player address. Values never decrease.
    #[serde(default)]
    pub score: BTreeMap<String, u32>,
}

impl Conversation {
    pub fn new(game_id: GameId) -> Self {
        Self {
            game_id,
            score: BTreeMap::new(),
        }
    }

    /// Point the conversation at a new game, carrying the score forward.
    pub fn repoint(self, game_id: GameId) -> Self {
        Self {
            game_id,
            score: self.score,
        }
    }

    /// Increment the player's win count and return the new value.
    pub fn record_win(&mut self, player: &str) -> u32 {
        let entry = self.score.entry(player.to_string()).or_insert(0);
        *entry = entry.saturating_add(1);
        *entry
    }

    pub fn score_of(&self, player: &str) -> u32 {
        self.score.get(player).copied().unwrap_or(0)
    }

    /// First scorer other than `player`, in key order.
    pub fn other_scorer(&self, player: &str) -> Option<&str> {
        self.score
            .keys()
            .map(String::as_str)
            .find(|p| *p != player)
    }
}
