// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - the chat-service boundary.
//!
//! Handlers depend on the [`ChatService`] trait rather than the concrete
//! Chatkit client so tests can inject a stub.

pub mod chatkit;

pub use chatkit::{ChatkitClient, ChatkitError, USER_ALREADY_EXISTS};

use async_trait::async_trait;
use serde::Serialize;

/// Options for creating a chat user.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateUserOptions {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<serde_json::Value>,
}

impl CreateUserOptions {
    /// A user whose display name is its ID.
    pub fn named_by_id(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            ..Self::default()
        }
    }
}

/// Options for minting an access token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthenticateOptions {
    /// Subject of the token; `None` mints a token with no user
    pub user_id: Option<String>,
    /// Superuser token for server-side API calls
    pub su: bool,
}

impl AuthenticateOptions {
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            su: false,
        }
    }

    pub fn superuser() -> Self {
        Self {
            user_id: None,
            su: true,
        }
    }
}

/// A granted token and its lifetime in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenWithExpiry {
    pub token: String,
    pub expires_in: f64,
}

/// The chat-service operations this backend relies on.
#[async_trait]
pub trait ChatService: Send + Sync {
    async fn create_user(&self, options: CreateUserOptions) -> Result<(), ChatkitError>;

    async fn generate_access_token(
        &self,
        options: AuthenticateOptions,
    ) -> Result<TokenWithExpiry, ChatkitError>;
}
