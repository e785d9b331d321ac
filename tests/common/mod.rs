// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use chatkit_bridge::routes::create_router;
use chatkit_bridge::services::{
    AuthenticateOptions, ChatService, ChatkitError, CreateUserOptions, TokenWithExpiry,
};
use chatkit_bridge::AppState;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// In-memory chat service that records every call.
#[derive(Default)]
pub struct StubChatService {
    pub created: Mutex<Vec<CreateUserOptions>>,
    pub token_requests: Mutex<Vec<AuthenticateOptions>>,
    /// IDs that create_user reports as already existing.
    pub existing: Mutex<HashSet<String>>,
    /// When set, every call fails with an upstream error of this type.
    pub fail_with: Mutex<Option<String>>,
    pub token: String,
    pub expires_in: f64,
}

#[allow(dead_code)]
impl StubChatService {
    pub fn new() -> Self {
        Self {
            token: "tok123".to_string(),
            expires_in: 3600.0,
            ..Self::default()
        }
    }

    pub fn fail_with(&self, error_type: &str) {
        *self.fail_with.lock().unwrap() = Some(error_type.to_string());
    }

    pub fn created_ids(&self) -> Vec<String> {
        self.created
            .lock()
            .unwrap()
            .iter()
            .map(|o| o.id.clone())
            .collect()
    }

    fn upstream_failure(&self) -> Option<ChatkitError> {
        self.fail_with
            .lock()
            .unwrap()
            .clone()
            .map(|error_type| ChatkitError::Api {
                status: 500,
                error_type,
                description: Some("stubbed failure".to_string()),
            })
    }
}

#[async_trait]
impl ChatService for StubChatService {
    async fn create_user(&self, options: CreateUserOptions) -> Result<(), ChatkitError> {
        self.created.lock().unwrap().push(options.clone());

        if let Some(err) = self.upstream_failure() {
            return Err(err);
        }

        if !self.existing.lock().unwrap().insert(options.id) {
            return Err(ChatkitError::Api {
                status: 400,
                error_type: chatkit_bridge::services::USER_ALREADY_EXISTS.to_string(),
                description: Some("User with given id already exists".to_string()),
            });
        }

        Ok(())
    }

    async fn generate_access_token(
        &self,
        options: AuthenticateOptions,
    ) -> Result<TokenWithExpiry, ChatkitError> {
        self.token_requests.lock().unwrap().push(options);

        if let Some(err) = self.upstream_failure() {
            return Err(err);
        }

        Ok(TokenWithExpiry {
            token: self.token.clone(),
            expires_in: self.expires_in,
        })
    }
}

/// Create a test app backed by the given stub.
#[allow(dead_code)]
pub fn create_test_app(chat: Arc<StubChatService>) -> axum::Router {
    let state = Arc::new(AppState { chat });

    create_router(state)
}

/// Read a response body to bytes.
#[allow(dead_code)]
pub async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body")
        .to_vec()
}
