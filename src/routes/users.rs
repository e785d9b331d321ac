// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Chat user provisioning.

use axum::{body::Bytes, extract::State, http::StatusCode, routing::post, Router};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::UserRequest;
use crate::services::CreateUserOptions;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/users", post(create_user))
}

/// Create a Chatkit user named after the supplied identifier.
///
/// The body is decoded regardless of `Content-Type`. An empty body provisions
/// the empty identifier; re-provisioning an existing user succeeds.
async fn create_user(State(state): State<Arc<AppState>>, body: Bytes) -> Result<StatusCode> {
    let user = UserRequest::from_body(&body).map_err(|e| {
        tracing::debug!(error = %e, "Rejecting malformed user request");
        AppError::BadRequest(format!("Invalid JSON body: {}", e))
    })?;

    match state
        .chat
        .create_user(CreateUserOptions::named_by_id(user.id.clone()))
        .await
    {
        Ok(()) => {
            tracing::info!(user_id = %user.id, "Chat user created");
        }
        Err(e) if e.is_user_already_exists() => {
            tracing::info!(user_id = %user.id, "User already exists");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(StatusCode::OK)
}
