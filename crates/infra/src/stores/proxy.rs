//! Static proxy store

use async_trait::async_trait;
use ats2_core::ProxyStore;
use ats2_domain::{ProxyHttp, Result};

/// Returns the same proxy (or none) on every load
#[derive(Debug, Clone, Default)]
pub struct StaticProxyStore {
    proxy: Option<ProxyHttp>,
}

impl StaticProxyStore {
    pub const fn new(proxy: Option<ProxyHttp>) -> Self {
        Self { proxy }
    }

    /// Direct connection
    pub const fn direct() -> Self {
        Self { proxy: None }
    }
}

#[async_trait]
impl ProxyStore for StaticProxyStore {
    async fn load_proxy(&self) -> Result<Option<ProxyHttp>> {
        Ok(self.proxy.clone())
    }
}
