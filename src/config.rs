// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Loaded once at startup and never mutated afterwards. A `.env` file in the
//! working directory is honoured for local development.

use std::env;

/// Default listening port, matching what the web client expects.
pub const DEFAULT_PORT: u16 = 5200;

/// Default lifetime of issued Chatkit access tokens (24 hours).
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 24 * 60 * 60;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Chatkit instance locator, `v1:<cluster>:<instance_id>`
    pub instance_locator: String,
    /// Chatkit secret key, `<key_id>:<key_secret>`
    pub secret_key: String,
    /// Server port
    pub port: u16,
    /// Override for the Chatkit API host (local stubs, proxies)
    pub chatkit_base_url: Option<String>,
    /// Lifetime of issued access tokens, in seconds
    pub token_ttl_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            instance_locator: env::var("CHATKIT_INSTANCE_LOCATOR")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("CHATKIT_INSTANCE_LOCATOR"))?,
            secret_key: env::var("CHATKIT_SECRET_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("CHATKIT_SECRET_KEY"))?,
            port: parse_or("PORT", DEFAULT_PORT)?,
            chatkit_base_url: env::var("CHATKIT_BASE_URL")
                .ok()
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty()),
            token_ttl_secs: parse_or("CHATKIT_TOKEN_TTL_SECS", DEFAULT_TOKEN_TTL_SECS)?,
        })
    }
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
