//! Outbound proxy settings

use serde::{Deserialize, Serialize};

/// HTTP proxy used for calls to the PBX API.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProxyHttp {
    pub host: String,
    pub port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass: Option<String>,
}

impl ProxyHttp {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self { host: host.into(), port, user: None, pass: None }
    }

    /// Attach basic-auth credentials
    #[must_use]
    pub fn with_credentials(mut self, user: impl Into<String>, pass: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.pass = Some(pass.into());
        self
    }

    /// Proxy URL understood by HTTP clients
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Credentials, only when both user and password are set
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.user.as_deref(), self.pass.as_deref()) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => Some((user, pass)),
            _ => None,
        }
    }
}

impl std::fmt::Debug for ProxyHttp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyHttp")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("pass", &self.pass.as_ref().map(|_| "***"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_and_credentials() {
        let proxy = ProxyHttp::new("10.0.0.1", 3128);
        assert_eq!(proxy.url(), "http://10.0.0.1:3128");
        assert!(proxy.credentials().is_none());

        let proxy = proxy.with_credentials("bob", "secret");
        assert_eq!(proxy.credentials(), Some(("bob", "secret")));
    }

    #[test]
    fn test_credentials_need_both_parts() {
        let mut proxy = ProxyHttp::new("proxy", 8080);
        proxy.user = Some("bob".into());
        assert!(proxy.credentials().is_none());
    }

    #[test]
    fn test_debug_masks_password() {
        let proxy = ProxyHttp::new("proxy", 8080).with_credentials("bob", "hunter2");
        assert!(!format!("{proxy:?}").contains("hunter2"));
    }
}
