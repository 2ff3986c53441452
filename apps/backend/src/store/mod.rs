//! Key-value store adapters.
//!
//! The core treats the store as a strongly consistent per-key store with
//! last-write-wins semantics and no transactions. Every write is a full-record
//! overwrite. Records are JSON strings; typed access lives in `crate::repos`.

pub mod memory;
pub mod redis_kv;

use async_trait::async_trait;

use crate::errors::domain::DomainError;

pub use memory::InMemoryStore;
pub use redis_kv::{RedisLocks, RedisStore};

#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    async fn set(&self, key: &str, value: String) -> Result<(), DomainError>;

    /// Lightweight liveness probe used by the health route.
    async fn ping(&self) -> Result<(), DomainError>;

    /// Short backend name for logs and health output.
    fn kind(&self) -> &'static str;
}

/// Keys are namespaced so conversation and game id spaces can never collide.
pub mod keys {
    pub fn conversation(conversation_id: &str) -> String {
        format!("conv:{conversation_id}")
    }

    pub fn game(game_id: &str) -> String {
        format!("game:{game_id}")
    }

    pub fn conversation_lock(conversation_id: &str) -> String {
        format!("lock:conv:{conversation_id}")
    }
}
