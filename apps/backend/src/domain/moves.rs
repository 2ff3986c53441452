//! Moves and the cyclic dominance rule.

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

/// Button order on the PLAY screen. Button index `n` (1-based) plays `MOVES_ORDER[n - 1]`.
pub const MOVES_ORDER: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

impl Move {
    /// The move this one defeats.
    pub const fn beats(self) -> Move {
        match self {
            Move::Paper => Move::Rock,
            Move::Scissors => Move::Paper,
            Move::Rock => Move::Scissors,
        }
    }

    /// Map a 1-based button index onto a move.
    pub fn from_button_index(button_index: u32) -> Result<Move, DomainError> {
        button_index
            .checked_sub(1)
            .and_then(|i| MOVES_ORDER.get(i as usize).copied())
            .ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::InvalidButtonIndex,
                    format!(
                        "Button index {button_index} does not select a move (expected 1..={})",
                        MOVES_ORDER.len()
                    ),
                )
            })
    }

    /// Button label shown on the PLAY screen.
    pub const fn label(self) -> &'static str {
        match self {
            Move::Rock => "ROCK 🪨",
            Move::Paper => "PAPER 📜",
            Move::Scissors => "SCISSORS ✂️",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Move::Rock => "ROCK",
            Move::Paper => "PAPER",
            Move::Scissors => "SCISSORS",
        }
    }
}

/// The winning move of a pairing, or `None` when both moves are identical.
pub fn best_move(a: Move, b: Move) -> Option<Move> {
    if a.beats() == b {
        Some(a)
    } else if b.beats() == a {
        Some(b)
    } else {
        None
    }
}
