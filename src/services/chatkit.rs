// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Chatkit API client.
//!
//! Handles:
//! - Instance locator and secret key parsing
//! - Access token minting (local HS256 JWTs, no network round trip)
//! - User creation against the Chatkit REST API

use async_trait::async_trait;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use super::{AuthenticateOptions, ChatService, CreateUserOptions, TokenWithExpiry};
use crate::config::{Config, DEFAULT_TOKEN_TTL_SECS};

/// API error type reported when creating a user whose ID is taken.
pub const USER_ALREADY_EXISTS: &str = "services/chatkit/user_already_exists";

const SUPPORTED_LOCATOR_VERSION: &str = "v1";
const CHATKIT_API_VERSION: &str = "v6";
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors raised by the Chatkit client.
#[derive(Debug, thiserror::Error)]
pub enum ChatkitError {
    #[error("Invalid instance locator: {0}")]
    InvalidLocator(String),

    #[error("Invalid secret key: expected <key_id>:<key_secret>")]
    InvalidKey,

    #[error("Token signing failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Chatkit request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(
        "Chatkit API error (HTTP {status}): {error_type}{}",
        .description.as_deref().map(|d| format!(" - {d}")).unwrap_or_default()
    )]
    Api {
        status: u16,
        error_type: String,
        description: Option<String>,
    },

    #[error("Token lifetime of {0}s overflows the expiry timestamp")]
    TokenLifetime(u64),

    #[error("System time error: {0}")]
    Clock(#[from] std::time::SystemTimeError),
}

impl ChatkitError {
    /// True if the API rejected a user creation because the ID already exists.
    pub fn is_user_already_exists(&self) -> bool {
        matches!(self, ChatkitError::Api { error_type, .. } if error_type == USER_ALREADY_EXISTS)
    }
}

/// Parsed `v1:<cluster>:<instance_id>` locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceLocator {
    pub cluster: String,
    pub instance_id: String,
}

impl FromStr for InstanceLocator {
    type Err = ChatkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [version, cluster, instance_id]
                if *version == SUPPORTED_LOCATOR_VERSION
                    && !cluster.is_empty()
                    && !instance_id.is_empty() =>
            {
                Ok(Self {
                    cluster: cluster.to_string(),
                    instance_id: instance_id.to_string(),
                })
            }
            _ => Err(ChatkitError::InvalidLocator(s.to_string())),
        }
    }
}

impl InstanceLocator {
    /// Default API host for this instance's cluster.
    pub fn base_url(&self) -> String {
        format!("https://{}.pusherplatform.io", self.cluster)
    }
}

/// Parsed `<key_id>:<key_secret>` credential.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey {
    pub key_id: String,
    key_secret: String,
}

impl FromStr for SecretKey {
    type Err = ChatkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((key_id, key_secret)) if !key_id.is_empty() && !key_secret.is_empty() => {
                Ok(Self {
                    key_id: key_id.to_string(),
                    key_secret: key_secret.to_string(),
                })
            }
            _ => Err(ChatkitError::InvalidKey),
        }
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("key_id", &self.key_id)
            .field("key_secret", &"<redacted>")
            .finish()
    }
}

/// JWT claims understood by the Chatkit platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatkitClaims {
    /// Instance ID the token is valid for
    pub instance: String,
    /// `api_keys/<key_id>`
    pub iss: String,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Chatkit user ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Superuser flag, used for server-side API calls
    #[serde(skip_serializing_if = "Option::is_none")]
    pub su: Option<bool>,
}

/// Error body returned by the Chatkit API.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
    error_description: Option<String>,
}

/// Chatkit API client.
#[derive(Clone)]
pub struct ChatkitClient {
    http: reqwest::Client,
    base_url: String,
    locator: InstanceLocator,
    key: SecretKey,
    token_ttl_secs: u64,
}

impl ChatkitClient {
    /// Create a client from an instance locator and secret key.
    pub fn new(instance_locator: &str, secret_key: &str) -> Result<Self, ChatkitError> {
        let locator: InstanceLocator = instance_locator.parse()?;
        let key: SecretKey = secret_key.parse()?;

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: locator.base_url(),
            locator,
            key,
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        })
    }

    /// Create a client from application config, applying any overrides.
    pub fn from_config(config: &Config) -> Result<Self, ChatkitError> {
        let mut client = Self::new(&config.instance_locator, &config.secret_key)?
            .with_token_ttl(config.token_ttl_secs);
        if let Some(base_url) = &config.chatkit_base_url {
            client = client.with_base_url(base_url.clone());
        }
        Ok(client)
    }

    /// Point the client at a different API host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replace the outbound request timeout.
    pub fn with_http_timeout(mut self, timeout: Duration) -> Result<Self, ChatkitError> {
        self.http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn with_token_ttl(mut self, secs: u64) -> Self {
        self.token_ttl_secs = secs;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn instance_id(&self) -> &str {
        &self.locator.instance_id
    }

    /// Mint a signed access token.
    pub fn mint_token(&self, options: &AuthenticateOptions) -> Result<TokenWithExpiry, ChatkitError> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        let exp = now
            .checked_add(self.token_ttl_secs)
            .ok_or(ChatkitError::TokenLifetime(self.token_ttl_secs))?;

        let claims = ChatkitClaims {
            instance: self.locator.instance_id.clone(),
            iss: format!("api_keys/{}", self.key.key_id),
            iat: now,
            exp,
            sub: options.user_id.clone(),
            su: options.su.then_some(true),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.key.key_secret.as_bytes()),
        )?;

        Ok(TokenWithExpiry {
            token,
            expires_in: self.token_ttl_secs as f64,
        })
    }

    /// Check response status and turn Chatkit error bodies into `ChatkitError::Api`.
    async fn check_response(&self, response: reqwest::Response) -> Result<(), ChatkitError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(status = %status, error = %e, "Failed to read Chatkit error body");
                String::new()
            }
        };
        let (error_type, description) = match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(parsed) => (parsed.error, parsed.error_description),
            Err(_) => (
                "unknown".to_string(),
                Some(body).filter(|b| !b.trim().is_empty()),
            ),
        };

        if status.as_u16() == 429 {
            tracing::warn!("Chatkit rate limit hit (429)");
        }

        Err(ChatkitError::Api {
            status: status.as_u16(),
            error_type,
            description,
        })
    }
}

#[async_trait]
impl ChatService for ChatkitClient {
    async fn create_user(&self, options: CreateUserOptions) -> Result<(), ChatkitError> {
        let url = format!(
            "{}/services/chatkit/{}/{}/users",
            self.base_url, CHATKIT_API_VERSION, self.locator.instance_id
        );

        let su_token = self.mint_token(&AuthenticateOptions::superuser())?;

        let response = self
            .http
            .post(&url)
            .bearer_auth(&su_token.token)
            .json(&options)
            .send()
            .await?;

        self.check_response(response).await?;
        tracing::debug!(user_id = %options.id, "Chatkit user created");
        Ok(())
    }

    async fn generate_access_token(
        &self,
        options: AuthenticateOptions,
    ) -> Result<TokenWithExpiry, ChatkitError> {
        self.mint_token(&options)
    }
}
