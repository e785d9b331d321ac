// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Chatkit access-token issuance.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use crate::error::Result;
use crate::models::AuthResponse;
use crate::services::AuthenticateOptions;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    // The Chatkit browser token provider POSTs a client-credentials form;
    // only the query string matters.
    Router::new().route("/authenticate", get(authenticate).post(authenticate))
}

/// First `user_id` in the query string. Absent means the empty identifier,
/// not an error; repeated keys are allowed.
fn first_user_id(params: Vec<(String, String)>) -> String {
    params
        .into_iter()
        .find(|(key, _)| key == "user_id")
        .map(|(_, value)| value)
        .unwrap_or_default()
}

/// Issue an access token for `user_id`.
#[tracing::instrument(
    name = "authenticate",
    skip_all,
    fields(user_id = tracing::field::Empty)
)]
async fn authenticate(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<AuthResponse>> {
    let user_id = first_user_id(params);
    tracing::Span::current().record("user_id", user_id.as_str());

    let grant = state
        .chat
        .generate_access_token(AuthenticateOptions::for_user(user_id))
        .await?;

    tracing::debug!(expires_in = grant.expires_in, "Access token issued");

    Ok(Json(AuthResponse::bearer(grant.token, grant.expires_in)))
}
