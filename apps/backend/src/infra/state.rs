use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::config::app::DEFAULT_HOME_IMAGE_URL;
use crate::config::Config;
use crate::error::AppError;
use crate::protocol::FrameLinks;
use crate::services::{ActionVerifier, GameEngine, LocalLocks, UpstreamVerified};
use crate::state::app_state::AppState;
use crate::store::{InMemoryStore, RedisStore};

const DEFAULT_PUBLIC_URL: &str = "http://localhost:3001";

enum StoreBackend {
    Memory,
    Redis {
        url: String,
        max_attempts: u32,
        lock_ttl: Duration,
        lock_wait: Duration,
    },
}

/// Builder for `AppState` (used in both tests and main).
pub struct StateBuilder {
    public_url: String,
    home_image_url: String,
    backend: StoreBackend,
    engine: Option<Arc<GameEngine>>,
    verifier: Arc<dyn ActionVerifier>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            public_url: DEFAULT_PUBLIC_URL.to_string(),
            home_image_url: DEFAULT_HOME_IMAGE_URL.to_string(),
            backend: StoreBackend::Memory,
            engine: None,
            verifier: Arc::new(UpstreamVerified),
        }
    }

    pub fn with_config(mut self, config: &Config) -> Self {
        self.public_url = config.domain_url.clone();
        self.home_image_url = config.home_image_url.clone();
        self.backend = match &config.redis_url {
            Some(url) => StoreBackend::Redis {
                url: url.clone(),
                max_attempts: config.store_max_attempts,
                lock_ttl: config.lock_ttl,
                lock_wait: config.lock_wait,
            },
            None => StoreBackend::Memory,
        };
        self
    }

    pub fn with_memory_store(mut self) -> Self {
        self.backend = StoreBackend::Memory;
        self
    }

    /// Redis with default retry and lock timings.
    pub fn with_redis(mut self, url: impl Into<String>) -> Self {
        self.backend = StoreBackend::Redis {
            url: url.into(),
            max_attempts: 3,
            lock_ttl: Duration::from_millis(5000),
            lock_wait: Duration::from_millis(2000),
        };
        self
    }

    pub fn with_public_url(mut self, url: impl Into<String>) -> Self {
        self.public_url = url.into();
        self
    }

    pub fn with_home_image_url(mut self, url: impl Into<String>) -> Self {
        self.home_image_url = url.into();
        self
    }

    /// Share an existing engine instead of building one from the store backend.
    pub fn with_engine(mut self, engine: Arc<GameEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn with_verifier(mut self, verifier: Arc<dyn ActionVerifier>) -> Self {
        self.verifier = verifier;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let engine = match (self.engine, self.backend) {
            (Some(engine), _) => engine,
            (None, StoreBackend::Memory) => {
                info!("Using in-memory store with in-process locks");
                Arc::new(GameEngine::new(
                    Arc::new(InMemoryStore::new()),
                    Arc::new(LocalLocks::new()),
                ))
            }
            (
                None,
                StoreBackend::Redis {
                    url,
                    max_attempts,
                    lock_ttl,
                    lock_wait,
                },
            ) => {
                let store = RedisStore::connect(&url, max_attempts).await?;
                let locks = store.locks(lock_ttl, lock_wait);
                info!(max_attempts, "Connected to Redis store");
                Arc::new(GameEngine::new(Arc::new(store), Arc::new(locks)))
            }
        };

        Ok(AppState::new(
            engine,
            self.verifier,
            FrameLinks::new(self.public_url),
            self.home_image_url,
        ))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
