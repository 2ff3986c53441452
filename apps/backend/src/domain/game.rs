//! One round's move state, capped at two participants.

use std::fmt;

use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::domain::moves::{best_move, Move};
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Number of distinct players that complete a game.
pub const PLAYERS_PER_GAME: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GameId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMove {
    pub player: String,
    #[serde(rename = "move")]
    pub mv: Move,
}

/// Result of trying to record a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Player already moved, or the game is already full. Nothing changed.
    Rejected,
    /// First move of the game; waiting for the opponent.
    Waiting,
    /// Second distinct player moved; the game is now terminal.
    Completed,
}

/// Resolution of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    Pending,
    Draw,
    Won { winner: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub game_id: GameId,
    pub conversation_id: String,
    /// Arrival order is preserved.
    #[serde(default)]
    moves: Vec<PlayerMove>,
}

impl Game {
    pub fn new(conversation_id: impl Into<String>) -> Self {
        Self {
            game_id: GameId::generate(),
            conversation_id: conversation_id.into(),
            moves: Vec::new(),
        }
    }

    pub fn moves(&self) -> &[PlayerMove] {
        &self.moves
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    pub fn is_full(&self) -> bool {
        self.moves.len() >= PLAYERS_PER_GAME
    }

    pub fn move_of(&self, player: &str) -> Option<Move> {
        self.moves.iter().find(|m| m.player == player).map(|m| m.mv)
    }

    pub fn has_moved(&self, player: &str) -> bool {
        self.move_of(player).is_some()
    }

    /// The first mover other than `player`, if any.
    pub fn opponent_of(&self, player: &str) -> Option<&str> {
        self.moves
            .iter()
            .map(|m| m.player.as_str())
            .find(|p| *p != player)
    }

    /// Record a move. A player moves at most once per game and a full game never changes.
    pub fn record_move(&mut self, player: &str, mv: Move) -> MoveOutcome {
        if self.is_full() || self.has_moved(player) {
            return MoveOutcome::Rejected;
        }
        self.moves.push(PlayerMove {
            player: player.to_string(),
            mv,
        });
        if self.is_full() {
            MoveOutcome::Completed
        } else {
            MoveOutcome::Waiting
        }
    }

    pub fn outcome(&self) -> RoundOutcome {
        if !self.is_full() {
            return RoundOutcome::Pending;
        }
        match self.winner() {
            Some(winner) => RoundOutcome::Won {
                winner: winner.to_string(),
            },
            None => RoundOutcome::Draw,
        }
    }

    /// Winning player of a completed game; `None` for a draw or an unfinished game.
    pub fn winner(&self) -> Option<&str> {
        match self.moves.as_slice() {
            [first, second] => {
                let best = best_move(first.mv, second.mv)?;
                if best == first.mv {
                    Some(first.player.as_str())
                } else {
                    Some(second.player.as_str())
                }
            }
            _ => None,
        }
    }

    /// Reject stored records that break the per-game invariants.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.moves.len() > PLAYERS_PER_GAME {
            return Err(DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!(
                    "Game {} holds {} moves (max {PLAYERS_PER_GAME})",
                    self.game_id,
                    self.moves.len()
                ),
            ));
        }
        if let [first, second] = self.moves.as_slice() {
            if first.player == second.player {
                return Err(DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    format!("Game {} records the same player twice", self.game_id),
                ));
            }
        }
        Ok(())
    }
}
