// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Chatkit bridge: provisions chat users and issues Chatkit access tokens
//! for a browser client.
//!
//! This crate provides the backend API; all chat functionality lives in the
//! hosted Chatkit service.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use services::ChatService;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub chat: Arc<dyn ChatService>,
}
