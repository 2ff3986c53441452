//! Typed record access over the key-value store.

pub mod conversations;
pub mod games;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::store::KvStore;

async fn load_json<T: DeserializeOwned>(
    store: &dyn KvStore,
    key: &str,
) -> Result<Option<T>, DomainError> {
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };
    serde_json::from_str(&raw).map(Some).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("Record at {key} is not valid: {e}"),
        )
    })
}

async fn store_json<T: Serialize>(
    store: &dyn KvStore,
    key: &str,
    value: &T,
) -> Result<(), DomainError> {
    let raw = serde_json::to_string(value).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::Other("SERIALIZE".into()),
            format!("Failed to encode record for {key}: {e}"),
        )
    })?;
    store.set(key, raw).await
}
