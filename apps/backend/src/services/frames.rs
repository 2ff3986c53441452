//! Frame orchestration: verified action in, next frame descriptor out.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{next_step, screen_after_submit, GameView, Move, Screen, Step};
use crate::error::AppError;
use crate::logging::pii::Redacted;
use crate::protocol::{FrameDescriptor, VerifiedAction};
use crate::services::game_engine::GameEngine;

pub struct FrameService {
    engine: Arc<GameEngine>,
}

impl FrameService {
    pub fn new(engine: Arc<GameEngine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Run one state machine step for `action` coming from `previous`.
    ///
    /// Errors are either bad input (`AppError::is_bad_input`) or store failures.
    /// Input is fully validated before any record is written.
    pub async fn next_frame(
        &self,
        previous: Screen,
        action: &VerifiedAction,
    ) -> Result<FrameDescriptor, AppError> {
        action.validate()?;
        let conversation_id = action.conversation_id();
        let player = action.player();

        let game = self.engine.current_game(conversation_id).await?;
        let view = GameView::of(game.as_ref(), player);

        let screen = match next_step(previous, view) {
            Step::Show(screen) => screen,
            Step::SubmitMove => {
                let mv = Move::from_button_index(action.button_index())?;
                let completed = self.engine.submit_move(conversation_id, player, mv).await?;
                screen_after_submit(completed)
            }
        };

        debug!(
            player = %Redacted(player),
            from = %previous,
            to = %screen,
            "Frame transition"
        );
        Ok(FrameDescriptor::for_screen(screen, conversation_id, player))
    }
}
