// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Wire types exchanged with the web client.

pub mod auth;
pub mod user;

pub use auth::{AuthResponse, TOKEN_TYPE_BEARER};
pub use user::UserRequest;
