//! Screen state machine.
//!
//! `next_step` is a pure function of the previous screen and a view of the
//! conversation's current game re-read at decision time. The PLAY screen is
//! the only one whose successor depends on a side effect (move submission),
//! so it yields `Step::SubmitMove` and the caller finishes the transition
//! with `screen_after_submit`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::game::{Game, PLAYERS_PER_GAME};
use crate::domain::moves::MOVES_ORDER;
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Screen {
    #[default]
    Home,
    Play,
    ResultNotReady,
    ResultReady,
}

pub const ALL_SCREENS: [Screen; 4] = [
    Screen::Home,
    Screen::Play,
    Screen::ResultNotReady,
    Screen::ResultReady,
];

impl Screen {
    pub const fn as_str(self) -> &'static str {
        match self {
            Screen::Home => "HOME",
            Screen::Play => "PLAY",
            Screen::ResultNotReady => "RESULT_NOT_READY",
            Screen::ResultReady => "RESULT_READY",
        }
    }

    /// Button labels presented on this screen, in button-index order.
    pub fn buttons(self) -> Vec<String> {
        match self {
            Screen::Home => vec!["PLAY".to_string()],
            Screen::Play => MOVES_ORDER.iter().map(|m| m.label().to_string()).collect(),
            Screen::ResultNotReady => vec!["REFRESH".to_string()],
            Screen::ResultReady => vec!["PLAY AGAIN".to_string()],
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Screen {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_SCREENS
            .into_iter()
            .find(|screen| screen.as_str() == s)
            .ok_or_else(|| {
                DomainError::validation(ValidationKind::InvalidScreen, format!("Unknown screen: {s}"))
            })
    }
}

/// What the state machine needs to know about the current game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameView {
    pub move_count: usize,
    pub player_has_moved: bool,
}

impl GameView {
    /// View of `game` (or its absence) from `player`'s side.
    pub fn of(game: Option<&Game>, player: &str) -> Self {
        match game {
            Some(game) => Self {
                move_count: game.move_count(),
                player_has_moved: game.has_moved(player),
            },
            None => Self::default(),
        }
    }

    pub fn is_full(&self) -> bool {
        self.move_count >= PLAYERS_PER_GAME
    }

    /// No active game, the player has not moved yet, or a fresh round is about to start.
    pub fn can_play(&self) -> bool {
        self.move_count == 0 || !self.player_has_moved || self.is_full()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Transition directly to this screen.
    Show(Screen),
    /// Submit the selected move, then resolve with `screen_after_submit`.
    SubmitMove,
}

pub fn next_step(previous: Screen, view: GameView) -> Step {
    match previous {
        Screen::Home | Screen::ResultReady => {
            if view.can_play() {
                Step::Show(Screen::Play)
            } else {
                Step::Show(Screen::ResultNotReady)
            }
        }
        Screen::Play => Step::SubmitMove,
        Screen::ResultNotReady => {
            if view.is_full() {
                Step::Show(Screen::ResultReady)
            } else if view.player_has_moved {
                Step::Show(Screen::ResultNotReady)
            } else {
                Step::Show(Screen::Play)
            }
        }
    }
}

pub fn screen_after_submit(round_completed: bool) -> Screen {
    if round_completed {
        Screen::ResultReady
    } else {
        Screen::ResultNotReady
    }
}
