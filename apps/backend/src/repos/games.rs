//! Game records, keyed `game:{gameId}`.

use crate::domain::{Game, GameId};
use crate::errors::domain::DomainError;
use crate::store::{keys, KvStore};

pub async fn find_by_id(store: &dyn KvStore, game_id: &GameId) -> Result<Option<Game>, DomainError> {
    let game: Option<Game> = super::load_json(store, &keys::game(game_id.as_str())).await?;
    if let Some(game) = &game {
        game.validate()?;
    }
    Ok(game)
}

/// Full-record overwrite.
pub async fn save(store: &dyn KvStore, game: &Game) -> Result<(), DomainError> {
    super::store_json(store, &keys::game(game.game_id.as_str()), game).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Move;
    use crate::errors::domain::InfraErrorKind;
    use crate::store::InMemoryStore;

    #[tokio::test]
    async fn save_then_find_returns_same_record() {
        let store = InMemoryStore::new();
        let mut game = Game::new("c1");
        game.record_move("A", Move::Paper);
        save(&store, &game).await.unwrap();

        let found = find_by_id(&store, &game.game_id).await.unwrap();
        assert_eq!(found, Some(game));
    }

    #[tokio::test]
    async fn missing_game_is_none() {
        let store = InMemoryStore::new();
        let id = GameId::from("nope");
        assert_eq!(find_by_id(&store, &id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn garbage_record_is_data_corruption() {
        let store = InMemoryStore::new();
        store.set("game:g1", "not json".to_string()).await.unwrap();
        let err = find_by_id(&store, &GameId::from("g1")).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Infra(InfraErrorKind::DataCorruption, _)
        ));
    }
}
