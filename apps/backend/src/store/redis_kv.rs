//! Redis-backed store and per-conversation locks.
//!
//! Single-key operations retry with exponential backoff on transient
//! failures. Overwrite semantics make a retried `SET` safe; callers must not
//! retry multi-key sequences as a whole.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use rand::random;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisError, RedisResult, Script};
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};
use uuid::Uuid;

use super::{keys, KvStore};
use crate::error::AppError;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::services::locks::{ConversationLock, HeldLock, LockGuard};

// Store retry configuration (request path)
const STORE_INITIAL_RETRY_DELAY_MS: u64 = 25;
const STORE_MAX_RETRY_DELAY_MS: u64 = 200;

// Lock polling configuration
const LOCK_INITIAL_POLL_MS: u64 = 10;
const LOCK_MAX_POLL_MS: u64 = 100;
const JITTER_PERCENT: f64 = 0.2;

const RELEASE_SCRIPT: &str = r#"
if redis.call("GET", KEYS[1]) == ARGV[1] then
    return redis.call("DEL", KEYS[1])
else
    return 0
end
"#;

#[derive(Clone)]
pub struct RedisStore {
    manager: ConnectionManager,
    max_attempts: u32,
}

impl RedisStore {
    pub async fn connect(redis_url: &str, max_attempts: u32) -> Result<Self, AppError> {
        let client = Client::open(redis_url)
            .map_err(|err| AppError::config(format!("Invalid REDIS_URL: {err}")))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|err| AppError::StoreUnavailable {
                detail: format!("Unable to initialize Redis connection manager: {err}"),
            })?;

        Ok(Self {
            manager,
            max_attempts: max_attempts.max(1),
        })
    }

    /// Locks that share this store's connection.
    pub fn locks(&self, ttl: Duration, wait: Duration) -> RedisLocks {
        RedisLocks {
            manager: self.manager.clone(),
            ttl,
            wait,
        }
    }

    async fn with_retry<T, F, Fut>(&self, op: &'static str, key: &str, mut f: F) -> Result<T, DomainError>
    where
        F: FnMut(ConnectionManager) -> Fut,
        Fut: Future<Output = RedisResult<T>>,
    {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match f(self.manager.clone()).await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    let domain_err = map_redis_error(op, &err);
                    if attempt >= self.max_attempts || !domain_err.is_transient() {
                        return Err(domain_err);
                    }

                    let delay = store_retry_delay(attempt);
                    warn!(
                        error = %err,
                        op,
                        key,
                        attempt,
                        retry_delay_ms = delay.as_millis() as u64,
                        "Redis operation failed, retrying"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        self.with_retry("GET", key, |mut conn| async move {
            conn.get::<_, Option<String>>(key).await
        })
        .await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), DomainError> {
        self.with_retry("SET", key, |mut conn| {
            let value = value.clone();
            async move { conn.set::<_, _, ()>(key, value).await }
        })
        .await
    }

    async fn ping(&self) -> Result<(), DomainError> {
        let mut conn = self.manager.clone();
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_redis_error("PING", &err))
    }

    fn kind(&self) -> &'static str {
        "redis"
    }
}

/// Cross-process locks: `SET key token NX PX ttl`, released by compare-and-delete.
#[derive(Clone)]
pub struct RedisLocks {
    manager: ConnectionManager,
    ttl: Duration,
    wait: Duration,
}

#[async_trait]
impl ConversationLock for RedisLocks {
    async fn acquire(&self, conversation_id: &str) -> Result<LockGuard, DomainError> {
        let key = keys::conversation_lock(conversation_id);
        let token = Uuid::new_v4().to_string();
        let ttl_ms = self.ttl.as_millis() as u64;
        let started = Instant::now();
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            let mut conn = self.manager.clone();
            let acquired = redis::cmd("SET")
                .arg(&key)
                .arg(&token)
                .arg("NX")
                .arg("PX")
                .arg(ttl_ms)
                .query_async::<Option<String>>(&mut conn)
                .await
                .map_err(|err| map_redis_error("SET NX", &err))?;

            if acquired.is_some() {
                debug!(lock_key = %key, attempt, "Conversation lock acquired");
                let held = RedisHeld {
                    manager: self.manager.clone(),
                    key,
                    token,
                };
                return Ok(LockGuard::new(conversation_id, Box::new(held)));
            }

            if started.elapsed() >= self.wait {
                return Err(DomainError::infra(
                    InfraErrorKind::LockContention,
                    format!(
                        "Conversation lock not acquired within {}ms",
                        self.wait.as_millis()
                    ),
                ));
            }

            sleep(poll_delay(attempt)).await;
        }
    }
}

struct RedisHeld {
    manager: ConnectionManager,
    key: String,
    token: String,
}

#[async_trait]
impl HeldLock for RedisHeld {
    async fn release(self: Box<Self>) -> Result<(), DomainError> {
        let mut conn = self.manager.clone();
        let deleted = Script::new(RELEASE_SCRIPT)
            .key(&self.key)
            .arg(&self.token)
            .invoke_async::<i64>(&mut conn)
            .await
            .map_err(|err| map_redis_error("EVAL release", &err))?;

        if deleted == 0 {
            // TTL expired and another holder may own the key now.
            warn!(lock_key = %self.key, "Conversation lock expired before release");
        }
        Ok(())
    }
}

/// Backoff before retry number `attempt` (1-based): 25, 50, 100, then 200ms.
fn store_retry_delay(attempt: u32) -> Duration {
    let delay_ms = STORE_INITIAL_RETRY_DELAY_MS
        .saturating_mul(2_u64.saturating_pow(attempt.saturating_sub(1)))
        .min(STORE_MAX_RETRY_DELAY_MS);
    Duration::from_millis(delay_ms)
}

fn poll_delay(attempt: u32) -> Duration {
    let base = LOCK_INITIAL_POLL_MS
        .saturating_mul(2_u64.saturating_pow(attempt.saturating_sub(1)))
        .min(LOCK_MAX_POLL_MS) as f64;
    let jitter = (random::<f64>() * 2.0 - 1.0) * base * JITTER_PERCENT;
    Duration::from_millis((base + jitter).max(1.0) as u64)
}

fn map_redis_error(op: &str, err: &RedisError) -> DomainError {
    let detail = format!("Redis {op} failed: {err}");
    if err.is_timeout() {
        DomainError::infra(InfraErrorKind::Timeout, detail)
    } else if err.is_connection_refusal() || err.is_connection_dropped() || err.is_io_error() {
        DomainError::infra(InfraErrorKind::StoreUnavailable, detail)
    } else {
        DomainError::infra(InfraErrorKind::Other(op.to_string()), detail)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use redis::ErrorKind;

    use super::*;

    #[test]
    fn store_retry_delay_doubles_then_caps() {
        let schedule: Vec<u64> = (1..=6)
            .map(|attempt| store_retry_delay(attempt).as_millis() as u64)
            .collect();
        assert_eq!(schedule, vec![25, 50, 100, 200, 200, 200]);
    }

    #[test]
    fn store_retry_delay_survives_large_attempt_counts() {
        for attempt in [0, 64, 65, 100, u32::MAX] {
            let delay = store_retry_delay(attempt);
            assert!(delay >= Duration::from_millis(STORE_INITIAL_RETRY_DELAY_MS));
            assert!(delay <= Duration::from_millis(STORE_MAX_RETRY_DELAY_MS));
        }
        assert_eq!(
            store_retry_delay(u32::MAX),
            Duration::from_millis(STORE_MAX_RETRY_DELAY_MS)
        );
    }

    #[test]
    fn io_timeouts_map_to_transient_timeout() {
        let err = RedisError::from(io::Error::from(io::ErrorKind::TimedOut));
        let mapped = map_redis_error("GET", &err);
        assert!(matches!(mapped, DomainError::Infra(InfraErrorKind::Timeout, _)));
        assert!(mapped.is_transient());
    }

    #[test]
    fn connection_failures_map_to_transient_unavailable() {
        for kind in [io::ErrorKind::ConnectionRefused, io::ErrorKind::ConnectionReset] {
            let err = RedisError::from(io::Error::from(kind));
            let mapped = map_redis_error("SET", &err);
            assert!(
                matches!(mapped, DomainError::Infra(InfraErrorKind::StoreUnavailable, _)),
                "{kind:?} mapped to {mapped:?}"
            );
            assert!(mapped.is_transient());
        }
    }

    #[test]
    fn protocol_errors_are_not_retried() {
        let err = RedisError::from((ErrorKind::UnexpectedReturnType, "wrong type"));
        let mapped = map_redis_error("GET", &err);
        assert_eq!(
            mapped,
            DomainError::Infra(
                InfraErrorKind::Other("GET".to_string()),
                format!("Redis GET failed: {err}")
            )
        );
        assert!(!mapped.is_transient());
    }

    #[test]
    fn poll_delay_is_bounded() {
        for attempt in 1..20 {
            let delay = poll_delay(attempt);
            assert!(delay >= Duration::from_millis(1));
            let cap = (LOCK_MAX_POLL_MS as f64 * (1.0 + JITTER_PERCENT)).ceil() as u64;
            assert!(delay <= Duration::from_millis(cap));
        }
    }
}
