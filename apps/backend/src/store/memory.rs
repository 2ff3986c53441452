//! In-process store for tests and single-instance deployments.

use async_trait::async_trait;
use dashmap::DashMap;

use super::KvStore;
use crate::errors::domain::DomainError;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: DashMap<String, String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl KvStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), DomainError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}
