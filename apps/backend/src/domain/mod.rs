//! Domain layer: pure game types and rules.

pub mod conversation;
pub mod game;
pub mod moves;
pub mod render;
pub mod screen;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_props_game;
#[cfg(test)]
mod tests_props_moves;
#[cfg(test)]
mod tests_props_screen;

// Re-exports for ergonomics
pub use conversation::Conversation;
pub use game::{Game, GameId, MoveOutcome, PlayerMove, RoundOutcome, PLAYERS_PER_GAME};
pub use moves::{best_move, Move, MOVES_ORDER};
pub use render::RenderData;
pub use screen::{next_step, screen_after_submit, GameView, Screen, Step};
