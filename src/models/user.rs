// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User provisioning payload.

use serde::{Deserialize, Deserializer, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Body of `POST /users`.
///
/// The identifier doubles as the Chatkit display name. A missing `username`
/// key, or a `null` one, decodes to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client/src/generated/")
)]
pub struct UserRequest {
    #[serde(rename = "username", default, deserialize_with = "null_as_empty")]
    pub id: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl UserRequest {
    /// Decode the first JSON value in `body`.
    ///
    /// An empty or whitespace-only body, or a top-level `null`, is not an error
    /// and yields the default (empty) identifier. Anything after the first value
    /// is ignored.
    pub fn from_body(body: &[u8]) -> serde_json::Result<Self> {
        match serde_json::Deserializer::from_slice(body)
            .into_iter::<Option<Self>>()
            .next()
        {
            Some(decoded) => Ok(decoded?.unwrap_or_default()),
            None => Ok(Self::default()),
        }
    }
}
