//! Game engine - owns the game and conversation record lifecycles.
//!
//! All state lives in the key-value store; the engine itself holds no
//! per-conversation state. Mutating operations run under the conversation
//! lock so that game creation and move submission are one logical operation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{Conversation, Game, Move, MoveOutcome, RenderData, RoundOutcome, Screen};
use crate::error::AppError;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::logging::pii::Redacted;
use crate::repos::{conversations, games};
use crate::services::locks::{ConversationLock, LocalLocks, LockGuard};
use crate::store::{InMemoryStore, KvStore};

pub struct GameEngine {
    store: Arc<dyn KvStore>,
    locks: Arc<dyn ConversationLock>,
}

impl GameEngine {
    pub fn new(store: Arc<dyn KvStore>, locks: Arc<dyn ConversationLock>) -> Self {
        Self { store, locks }
    }

    /// Engine over an in-process store and in-process locks.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStore::new()), Arc::new(LocalLocks::new()))
    }

    pub fn store(&self) -> &dyn KvStore {
        self.store.as_ref()
    }

    pub async fn conversation(&self, conversation_id: &str) -> Result<Option<Conversation>, AppError> {
        Ok(conversations::find(self.store(), conversation_id).await?)
    }

    /// The game the conversation currently points to. A dangling pointer reads as no game.
    pub async fn current_game(&self, conversation_id: &str) -> Result<Option<Game>, AppError> {
        let Some(conversation) = conversations::find(self.store(), conversation_id).await? else {
            return Ok(None);
        };
        Ok(games::find_by_id(self.store(), &conversation.game_id).await?)
    }

    /// Return the conversation's active (not full) game, creating one if needed.
    pub async fn get_or_create_game(&self, conversation_id: &str) -> Result<Game, AppError> {
        let guard = self.locks.acquire(conversation_id).await?;
        let result = self.get_or_create_game_locked(conversation_id).await;
        finish(guard, result).await
    }

    /// Submit `player`'s move and report whether it completed the round.
    ///
    /// A player who already moved in the active game is rejected (`Ok(false)`)
    /// without touching any record.
    pub async fn submit_move(
        &self,
        conversation_id: &str,
        player: &str,
        mv: Move,
    ) -> Result<bool, AppError> {
        let guard = self.locks.acquire(conversation_id).await?;
        let result = self.submit_move_locked(conversation_id, player, mv).await;
        finish(guard, result).await
    }

    /// Scores and winner for the image renderer. Read-only; takes no lock.
    pub async fn render_data(
        &self,
        conversation_id: &str,
        player: &str,
        screen: Screen,
    ) -> Result<RenderData, AppError> {
        let conversation = conversations::find(self.store(), conversation_id).await?;
        let game = match &conversation {
            Some(c) => games::find_by_id(self.store(), &c.game_id).await?,
            None => None,
        };
        Ok(RenderData::derive(
            conversation.as_ref(),
            game.as_ref(),
            player,
            screen,
        ))
    }

    async fn get_or_create_game_locked(&self, conversation_id: &str) -> Result<Game, AppError> {
        let conversation = conversations::find(self.store(), conversation_id).await?;

        if let Some(current) = &conversation {
            if let Some(game) = games::find_by_id(self.store(), &current.game_id).await? {
                if !game.is_full() {
                    return Ok(game);
                }
            }
        }

        let game = Game::new(conversation_id);
        let conversation = match conversation {
            Some(existing) => existing.repoint(game.game_id.clone()),
            None => Conversation::new(game.game_id.clone()),
        };

        // Game first: a failure between the writes leaves an unreferenced game,
        // never a conversation pointing at nothing.
        games::save(self.store(), &game).await?;
        conversations::save(self.store(), conversation_id, &conversation).await?;

        info!(
            conversation_id = %Redacted(conversation_id),
            game_id = %game.game_id,
            "Created game"
        );
        Ok(game)
    }

    async fn submit_move_locked(
        &self,
        conversation_id: &str,
        player: &str,
        mv: Move,
    ) -> Result<bool, AppError> {
        let mut game = self.get_or_create_game_locked(conversation_id).await?;

        match game.record_move(player, mv) {
            MoveOutcome::Rejected => {
                info!(
                    game_id = %game.game_id,
                    player = %Redacted(player),
                    "Duplicate move rejected"
                );
                Ok(false)
            }
            MoveOutcome::Waiting => {
                games::save(self.store(), &game).await?;
                debug!(
                    game_id = %game.game_id,
                    player = %Redacted(player),
                    mv = mv.as_str(),
                    "Move recorded, waiting for opponent"
                );
                Ok(false)
            }
            MoveOutcome::Completed => {
                games::save(self.store(), &game).await?;
                debug!(
                    game_id = %game.game_id,
                    player = %Redacted(player),
                    mv = mv.as_str(),
                    "Move recorded, round complete"
                );
                if let RoundOutcome::Won { winner } = game.outcome() {
                    self.record_win(conversation_id, &winner).await?;
                } else {
                    info!(game_id = %game.game_id, "Round drawn");
                }
                Ok(true)
            }
        }
    }

    async fn record_win(&self, conversation_id: &str, winner: &str) -> Result<(), AppError> {
        let mut conversation = conversations::find(self.store(), conversation_id)
            .await?
            .ok_or_else(|| {
                DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    "Conversation disappeared while scoring its game",
                )
            })?;
        let wins = conversation.record_win(winner);
        conversations::save(self.store(), conversation_id, &conversation).await?;
        info!(
            conversation_id = %Redacted(conversation_id),
            winner = %Redacted(winner),
            wins,
            "Recorded win"
        );
        Ok(())
    }
}

/// Release the lock and hand back the operation's result.
async fn finish<T>(guard: LockGuard, result: Result<T, AppError>) -> Result<T, AppError> {
    let conversation_id = guard.conversation_id().to_string();
    if let Err(e) = guard.release().await {
        warn!(
            conversation_id = %Redacted(&conversation_id),
            error = %e,
            "Failed to release conversation lock"
        );
    }
    result
}
