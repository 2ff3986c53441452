//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_HOME_IMAGE_URL: &str = "https://hips.hearstapps.com/hmg-prod/images/people-playing-paper-rock-scissors-royalty-free-illustration-1583269312.jpg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,

    /// Public base URL for post and image URLs, without trailing `/`.
    pub domain_url: String,
    /// Static image for the HOME frame.
    pub home_image_url: String,

    /// `None` selects the in-memory store and in-process locks.
    pub redis_url: Option<String>,
    pub store_max_attempts: u32,
    pub lock_ttl: Duration,
    pub lock_wait: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host = get("BACKEND_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or("BACKEND_PORT", get("BACKEND_PORT"), 3001u16)?;

        let domain_url = get("DOMAIN_URL")
            .ok_or_else(|| AppError::config("DOMAIN_URL must be set"))?
            .trim_end_matches('/')
            .to_string();
        if !(domain_url.starts_with("http://") || domain_url.starts_with("https://")) {
            return Err(AppError::config(format!(
                "DOMAIN_URL must be an http(s) URL, got '{domain_url}'"
            )));
        }

        let home_image_url =
            get("HOME_IMAGE_URL").unwrap_or_else(|| DEFAULT_HOME_IMAGE_URL.to_string());
        let redis_url = get("REDIS_URL");

        let store_max_attempts = parse_or("STORE_MAX_ATTEMPTS", get("STORE_MAX_ATTEMPTS"), 3u32)?;
        if store_max_attempts == 0 {
            return Err(AppError::config("STORE_MAX_ATTEMPTS must be at least 1"));
        }
        let lock_ttl_ms = parse_or("LOCK_TTL_MS", get("LOCK_TTL_MS"), 5000u64)?;
        let lock_wait_ms = parse_or("LOCK_WAIT_MS", get("LOCK_WAIT_MS"), 2000u64)?;
        if lock_ttl_ms == 0 {
            return Err(AppError::config("LOCK_TTL_MS must be positive"));
        }

        Ok(Config {
            host,
            port,
            domain_url,
            home_image_url,
            redis_url,
            store_max_attempts,
            lock_ttl: Duration::from_millis(lock_ttl_ms),
            lock_wait: Duration::from_millis(lock_wait_ms),
        })
    }

    pub fn store_kind(&self) -> &'static str {
        if self.redis_url.is_some() {
            "redis"
        } else {
            "memory"
        }
    }
}

fn parse_or<T: std::str::FromStr>(name: &str, raw: Option<String>, default: T) -> Result<T, AppError> {
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| AppError::config(format!("{name} must be a valid number, got '{raw}'"))),
    }
}
