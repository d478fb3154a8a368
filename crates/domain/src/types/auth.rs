//! Token types

use serde::{Deserialize, Serialize};

/// Access/refresh token pair minted by one successful refresh.
///
/// Persisted atomically by the token store; the coordinator never keeps the
/// refresh half beyond a single refresh call.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self { access_token: access_token.into(), refresh_token: refresh_token.into() }
    }
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &crate::utils::token_preview(&self.access_token))
            .field("refresh_token", &crate::utils::token_preview(&self.refresh_token))
            .finish()
    }
}
