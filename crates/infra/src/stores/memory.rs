//! In-memory token store

use async_trait::async_trait;
use ats2_core::TokenStore;
use ats2_domain::{Result, TokenPair};
use parking_lot::RwLock;

/// Keeps the token pair in process memory. Suited to tests and single-process
/// tools; nothing survives a restart.
pub struct MemoryTokenStore {
    tokens: RwLock<(Option<String>, String)>,
}

impl MemoryTokenStore {
    pub fn new(refresh_token: impl Into<String>) -> Self {
        Self { tokens: RwLock::new((None, refresh_token.into())) }
    }

    #[must_use]
    pub fn with_access_token(self, access_token: impl Into<String>) -> Self {
        self.tokens.write().0 = Some(access_token.into());
        self
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load_access_token(&self) -> Result<Option<String>> {
        Ok(self.tokens.read().0.clone())
    }

    async fn load_refresh_token(&self) -> Result<String> {
        Ok(self.tokens.read().1.clone())
    }

    async fn save_tokens(&self, tokens: &TokenPair) -> Result<()> {
        *self.tokens.write() = (Some(tokens.access_token.clone()), tokens.refresh_token.clone());
        Ok(())
    }
}
