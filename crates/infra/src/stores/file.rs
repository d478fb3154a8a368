//! File-backed token store
//!
//! Persists the token pair as one JSON document:
//!
//! ```json
//! { "accessToken": "...", "refreshToken": "...", "startRefreshToken": "..." }
//! ```
//!
//! `startRefreshToken` is the refresh token the store was seeded with. When
//! the store is constructed with a different seed, the file belongs to an
//! older credential: its access token is ignored and the constructor's
//! refresh token wins.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ats2_core::TokenStore;
use ats2_domain::constants::DEFAULT_TOKEN_FILENAME;
use ats2_domain::{Ats2Error, Result, TokenPair};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::errors::InfraError;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenFile {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    start_refresh_token: Option<String>,
}

/// Token store backed by a JSON file. Suited to a single long-running
/// process; several processes may share the file for out-of-band rotation.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
    refresh_token: Option<String>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>, refresh_token: Option<String>) -> Self {
        Self { path: path.into(), refresh_token: refresh_token.filter(|t| !t.is_empty()) }
    }

    /// Store at `.tele2ats2.token.json` in the working directory
    pub fn with_default_path(refresh_token: Option<String>) -> Self {
        Self::new(DEFAULT_TOKEN_FILENAME, refresh_token)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Option<TokenFile>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(InfraError::from(err).into()),
        };
        let file = serde_json::from_str(&content).map_err(InfraError::from)?;
        Ok(Some(file))
    }

    /// `true` when the file was written for a different seed token
    fn seeded_elsewhere(&self, file: &TokenFile) -> bool {
        self.refresh_token.is_some() && file.start_refresh_token != self.refresh_token
    }

    fn seed_or_missing(&self) -> Result<String> {
        self.refresh_token.clone().ok_or_else(|| Ats2Error::client("No refresh token provided"))
    }
}

/// Write through a temp file unique to this writer in the target directory,
/// then rename it over `path`. Concurrent writers never share a temp file.
fn write_atomically(path: &Path, content: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(InfraError::from)?;
    tmp.write_all(content).map_err(InfraError::from)?;
    tmp.persist(path).map_err(|err| InfraError::from(err.error))?;
    Ok(())
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load_access_token(&self) -> Result<Option<String>> {
        let Some(file) = self.read().await? else {
            debug!(path = %self.path.display(), "Token file does not exist yet");
            return Ok(None);
        };
        if self.seeded_elsewhere(&file) {
            warn!(path = %self.path.display(), "Token file was seeded with another refresh token");
            return Ok(None);
        }
        Ok(file.access_token.filter(|t| !t.is_empty()))
    }

    async fn load_refresh_token(&self) -> Result<String> {
        let Some(file) = self.read().await? else {
            return self.seed_or_missing();
        };
        if self.seeded_elsewhere(&file) {
            return self.seed_or_missing();
        }
        match file.refresh_token.filter(|t| !t.is_empty()) {
            Some(token) => Ok(token),
            None => self.seed_or_missing(),
        }
    }

    async fn save_tokens(&self, tokens: &TokenPair) -> Result<()> {
        let file = TokenFile {
            access_token: Some(tokens.access_token.clone()),
            refresh_token: Some(tokens.refresh_token.clone()),
            start_refresh_token: self.refresh_token.clone(),
        };
        let content = serde_json::to_string_pretty(&file).map_err(InfraError::from)?;

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&path, content.as_bytes()))
            .await
            .map_err(|err| Ats2Error::client(format!("Token file write task failed: {err}")))??;
        debug!(path = %self.path.display(), "Token pair saved");
        Ok(())
    }
}
