// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Access-token grant returned to chat clients.

use serde::{Deserialize, Serialize, Serializer};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// The only token type ever issued.
pub const TOKEN_TYPE_BEARER: &str = "bearer";

/// Body of a successful `/authenticate` response.
///
/// The token-type field is keyed `bearer` on the wire, which is what the
/// Chatkit browser token provider reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
pub struct AuthResponse {
    pub access_token: String,
    /// Seconds until the token expires
    #[serde(serialize_with = "serialize_seconds")]
    pub expires_in: f64,
    #[serde(rename = "bearer")]
    pub token_type: String,
}

impl AuthResponse {
    pub fn bearer(access_token: String, expires_in: f64) -> Self {
        Self {
            access_token,
            expires_in,
            token_type: TOKEN_TYPE_BEARER.to_string(),
        }
    }
}

/// Emit whole seconds as an integer (`3600`, not `3600.0`).
fn serialize_seconds<S: Serializer>(secs: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0; // 2^53

    if secs.is_finite() && secs.fract() == 0.0 && secs.abs() <= MAX_EXACT {
        serializer.serialize_i64(*secs as i64)
    } else {
        serializer.serialize_f64(*secs)
    }
}
