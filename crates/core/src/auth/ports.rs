//! Port interfaces for token lifecycle collaborators

use async_trait::async_trait;
use ats2_domain::{ProxyHttp, Result, TokenPair};

/// Holder of the current access/refresh token pair
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Currently valid access token, if the store knows one
    async fn load_access_token(&self) -> Result<Option<String>>;

    /// Refresh token for the next refresh call.
    ///
    /// Fails when no refresh token can be produced.
    async fn load_refresh_token(&self) -> Result<String>;

    /// Persist a freshly minted pair as one unit
    async fn save_tokens(&self, tokens: &TokenPair) -> Result<()>;
}

/// Source of outbound proxy settings, consulted before every remote call
#[async_trait]
pub trait ProxyStore: Send + Sync {
    /// `None` means a direct connection
    async fn load_proxy(&self) -> Result<Option<ProxyHttp>>;
}

/// Remote token refresh operation
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    /// Exchange a refresh token for a new pair. The refresh token is
    /// consumed by the remote side on success.
    async fn refresh_tokens(
        &self,
        refresh_token: &str,
        proxy: Option<&ProxyHttp>,
    ) -> Result<TokenPair>;
}
