//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `ATS2_REFRESH_TOKEN` is missing, falls back to loading from file
//! 3. Probes the working directory for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `ATS2_REFRESH_TOKEN`: Bootstrap refresh token (required)
//! - `ATS2_BASE_URL`: API host, defaults to the production host
//! - `ATS2_TOKEN_FILE`: Token file path
//! - `ATS2_TIMEOUT_SECS`: HTTP timeout in seconds
//! - `ATS2_STRATEGY_ATTEMPTS`: Comma-separated store poll delays in ms
//!   (empty string disables polling)
//! - `ATS2_PROXY_HOST` / `ATS2_PROXY_PORT`: Outbound HTTP proxy
//! - `ATS2_PROXY_USER` / `ATS2_PROXY_PASS`: Proxy basic auth
//!
//! ## File Locations
//! `./ats2.json`, `./ats2.toml`, `./config.json`, `./config.toml`, in that
//! order.

use std::path::{Path, PathBuf};

use ats2_domain::{Ats2Error, ClientConfig, ProxyHttp, Result, StrategyConfig};

use crate::errors::InfraError;

const CONFIG_FILE_NAMES: [&str; 4] = ["ats2.json", "ats2.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `Ats2Error::Client` if configuration cannot be loaded from
/// either source or a value is invalid.
pub fn load() -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `Ats2Error::Client` if `ATS2_REFRESH_TOKEN` is missing or a
/// value cannot be parsed.
pub fn load_from_env() -> Result<ClientConfig> {
    load_from_vars(|key| std::env::var(key).ok())
}

fn load_from_vars(var: impl Fn(&str) -> Option<String>) -> Result<ClientConfig> {
    let refresh_token = var("ATS2_REFRESH_TOKEN")
        .filter(|v| !v.is_empty())
        .ok_or_else(|| config_error("Missing required environment variable: ATS2_REFRESH_TOKEN"))?;

    let mut config = ClientConfig { refresh_token: Some(refresh_token), ..Default::default() };

    if let Some(base_url) = var("ATS2_BASE_URL") {
        config.base_url = base_url;
    }
    if let Some(token_file) = var("ATS2_TOKEN_FILE") {
        config.token_file = token_file;
    }
    if let Some(timeout) = var("ATS2_TIMEOUT_SECS") {
        config.timeout_secs = timeout
            .trim()
            .parse()
            .map_err(|e| config_error(format!("Invalid timeout: {e}")))?;
    }
    if let Some(attempts) = var("ATS2_STRATEGY_ATTEMPTS") {
        config.strategy = parse_attempts(&attempts)?;
    }
    config.proxy = proxy_from_vars(&var)?;

    Ok(config)
}

fn parse_attempts(raw: &str) -> Result<StrategyConfig> {
    let attempts = raw
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u64>()
                .map_err(|e| config_error(format!("Invalid strategy attempt '{part}': {e}")))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(StrategyConfig::new(attempts))
}

fn proxy_from_vars(var: &impl Fn(&str) -> Option<String>) -> Result<Option<ProxyHttp>> {
    let Some(host) = var("ATS2_PROXY_HOST").filter(|h| !h.is_empty()) else {
        return Ok(None);
    };
    let port = var("ATS2_PROXY_PORT")
        .ok_or_else(|| config_error("ATS2_PROXY_PORT is required when ATS2_PROXY_HOST is set"))?
        .trim()
        .parse::<u16>()
        .map_err(|e| config_error(format!("Invalid proxy port: {e}")))?;

    let mut proxy = ProxyHttp::new(host, port);
    proxy.user = var("ATS2_PROXY_USER");
    proxy.pass = var("ATS2_PROXY_PASS");
    Ok(Some(proxy))
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the working directory for config files.
/// Format is detected by file extension.
///
/// # Errors
/// Returns `Ats2Error::Client` if the file is missing or invalid.
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(config_error(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths()
            .ok_or_else(|| config_error("No config file found in any of the standard locations"))?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| config_error(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration; format is chosen by the extension of `path`.
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    let config: ClientConfig = match extension {
        "toml" => toml::from_str(contents).map_err(InfraError::from)?,
        "json" => serde_json::from_str(contents).map_err(InfraError::from)?,
        _ => return Err(config_error(format!("Unsupported config format: {extension}"))),
    };
    Ok(config)
}

/// First existing config file in the working directory
pub fn probe_config_paths() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    CONFIG_FILE_NAMES.iter().map(|name| cwd.join(name)).find(|path| path.exists())
}

fn config_error(message: impl Into<String>) -> Ats2Error {
    Ats2Error::client(message)
}
