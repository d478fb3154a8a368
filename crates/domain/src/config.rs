//! Configuration management

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_HOST, DEFAULT_STRATEGY_ATTEMPTS_MS, DEFAULT_TIMEOUT_SECS, DEFAULT_TOKEN_FILENAME,
    DEFAULT_USER_AGENT,
};
use crate::types::ProxyHttp;

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub token_file: String,
    /// Bootstrap refresh token handed to the token store
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    pub proxy: Option<ProxyHttp>,
    pub strategy: StrategyConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_HOST.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            token_file: DEFAULT_TOKEN_FILENAME.to_string(),
            refresh_token: None,
            proxy: None,
            strategy: StrategyConfig::default(),
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Refresh strategy configuration
///
/// After a failed remote refresh the coordinator sleeps for each entry in
/// turn and polls the token store in between. An empty list means no polling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    pub attempts_ms: Vec<u64>,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self { attempts_ms: DEFAULT_STRATEGY_ATTEMPTS_MS.to_vec() }
    }
}

impl StrategyConfig {
    pub fn new(attempts_ms: impl Into<Vec<u64>>) -> Self {
        Self { attempts_ms: attempts_ms.into() }
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.attempts_ms.iter().copied().map(Duration::from_millis).collect()
    }
}
