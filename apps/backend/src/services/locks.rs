//! Per-conversation mutual exclusion.
//!
//! Game creation and the first move of a round are a read-modify-write over
//! two keys (conversation and game) on a store without transactions or
//! compare-and-swap. Two players racing their first moves could otherwise both
//! create a game and lose one move. The engine serializes that sequence behind
//! a `ConversationLock`.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::trace;

use crate::errors::domain::DomainError;

#[async_trait]
pub trait ConversationLock: Send + Sync {
    async fn acquire(&self, conversation_id: &str) -> Result<LockGuard, DomainError>;
}

/// Backend-specific held lock.
#[async_trait]
pub trait HeldLock: Send {
    async fn release(self: Box<Self>) -> Result<(), DomainError>;
}

/// A held conversation lock. Call `release`; dropping without it (a cancelled
/// request) frees local locks immediately and leaves distributed locks to
/// expire on their TTL.
pub struct LockGuard {
    conversation_id: String,
    held: Box<dyn HeldLock>,
}

impl LockGuard {
    pub fn new(conversation_id: &str, held: Box<dyn HeldLock>) -> Self {
        Self {
            conversation_id: conversation_id.to_string(),
            held,
        }
    }

    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    pub async fn release(self) -> Result<(), DomainError> {
        self.held.release().await
    }
}

/// In-process locks for single-instance deployments and tests.
#[derive(Debug, Default, Clone)]
pub struct LocalLocks {
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl LocalLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of conversations with a live lock entry.
    pub fn tracked(&self) -> usize {
        self.locks.len()
    }
}

#[async_trait]
impl ConversationLock for LocalLocks {
    async fn acquire(&self, conversation_id: &str) -> Result<LockGuard, DomainError> {
        let mutex = self
            .locks
            .entry(conversation_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let guard = mutex.lock_owned().await;
        trace!(conversation_id, "Local conversation lock acquired");

        let held = LocalHeld {
            locks: self.locks.clone(),
            key: conversation_id.to_string(),
            guard: Some(guard),
        };
        Ok(LockGuard::new(conversation_id, Box::new(held)))
    }
}

struct LocalHeld {
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
    key: String,
    guard: Option<OwnedMutexGuard<()>>,
}

#[async_trait]
impl HeldLock for LocalHeld {
    async fn release(self: Box<Self>) -> Result<(), DomainError> {
        drop(self);
        Ok(())
    }
}

impl Drop for LocalHeld {
    fn drop(&mut self) {
        drop(self.guard.take());
        // Only the map still references an idle mutex.
        self.locks
            .remove_if(&self.key, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}
