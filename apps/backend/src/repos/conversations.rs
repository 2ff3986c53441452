//! Conversation records, keyed `conv:{conversationId}`.

use crate::domain::Conversation;
use crate::errors::domain::DomainError;
use crate::store::{keys, KvStore};

pub async fn find(
    store: &dyn KvStore,
    conversation_id: &str,
) -> Result<Option<Conversation>, DomainError> {
    super::load_json(store, &keys::conversation(conversation_id)).await
}

/// Full-record overwrite.
pub async fn save(
    store: &dyn KvStore,
    conversation_id: &str,
    conversation: &Conversation,
) -> Result<(), DomainError> {
    super::store_json(store, &keys::conversation(conversation_id), conversation).await
}
