//! Shared test helpers for `ats2-core` integration tests.
//!
//! In-memory token store, proxy store and refresher mocks that record how
//! the coordinator drives them.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use ats2_core::{ProxyStore, TokenRefresher, TokenStore};
use ats2_domain::{Ats2Error, ProxyHttp, Result as DomainResult, TokenPair};
use parking_lot::Mutex;
use tokio::time::Instant;

/// Token store with an optional script of answers for access token loads.
///
/// While the script is non-empty each load pops one answer; afterwards the
/// stored access token is returned.
pub struct MockTokenStore {
    access: Mutex<Option<String>>,
    script: Mutex<VecDeque<Option<String>>>,
    refresh: Option<String>,
    saved: Mutex<Vec<TokenPair>>,
    loads: Mutex<Vec<Instant>>,
    load_delay: Duration,
}

impl MockTokenStore {
    pub fn new(refresh: &str) -> Self {
        Self {
            access: Mutex::new(None),
            script: Mutex::new(VecDeque::new()),
            refresh: Some(refresh.to_string()),
            saved: Mutex::new(Vec::new()),
            loads: Mutex::new(Vec::new()),
            load_delay: Duration::ZERO,
        }
    }

    pub fn without_refresh_token() -> Self {
        Self { refresh: None, ..Self::new("") }
    }

    pub fn with_access(self, access: &str) -> Self {
        *self.access.lock() = Some(access.to_string());
        self
    }

    pub fn with_script(self, answers: Vec<Option<&str>>) -> Self {
        *self.script.lock() = answers.into_iter().map(|a| a.map(str::to_string)).collect();
        self
    }

    /// Access token loads take a snapshot, then wait `delay` before
    /// answering with it.
    pub fn with_load_delay(mut self, delay: Duration) -> Self {
        self.load_delay = delay;
        self
    }

    pub fn saved(&self) -> Vec<TokenPair> {
        self.saved.lock().clone()
    }

    pub fn load_times(&self) -> Vec<Instant> {
        self.loads.lock().clone()
    }
}

#[async_trait]
impl TokenStore for MockTokenStore {
    async fn load_access_token(&self) -> DomainResult<Option<String>> {
        self.loads.lock().push(Instant::now());
        let scripted = self.script.lock().pop_front();
        let answer = scripted.unwrap_or_else(|| self.access.lock().clone());
        if !self.load_delay.is_zero() {
            tokio::time::sleep(self.load_delay).await;
        }
        Ok(answer)
    }

    async fn load_refresh_token(&self) -> DomainResult<String> {
        self.refresh.clone().ok_or_else(|| Ats2Error::client("No refresh token provided"))
    }

    async fn save_tokens(&self, tokens: &TokenPair) -> DomainResult<()> {
        *self.access.lock() = Some(tokens.access_token.clone());
        self.saved.lock().push(tokens.clone());
        Ok(())
    }
}

enum Outcome {
    Pair(TokenPair),
    Fail(Ats2Error),
    Panic,
}

/// Refresher that answers every call the same way after an optional delay
pub struct MockRefresher {
    outcome: Outcome,
    delay: Duration,
    calls: AtomicUsize,
    seen: Mutex<Vec<(String, Option<ProxyHttp>)>>,
}

impl MockRefresher {
    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn succeeding(access: &str, refresh: &str) -> Self {
        Self::with_outcome(Outcome::Pair(TokenPair::new(access, refresh)))
    }

    pub fn failing(err: Ats2Error) -> Self {
        Self::with_outcome(Outcome::Fail(err))
    }

    pub fn panicking() -> Self {
        Self::with_outcome(Outcome::Panic)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<(String, Option<ProxyHttp>)> {
        self.seen.lock().clone()
    }
}

#[async_trait]
impl TokenRefresher for MockRefresher {
    async fn refresh_tokens(
        &self,
        refresh_token: &str,
        proxy: Option<&ProxyHttp>,
    ) -> DomainResult<TokenPair> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().push((refresh_token.to_string(), proxy.cloned()));
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.outcome {
            Outcome::Pair(pair) => Ok(pair.clone()),
            Outcome::Fail(err) => Err(err.clone()),
            Outcome::Panic => panic!("refresher blew up"),
        }
    }
}

/// Proxy store returning a fixed answer
pub struct MockProxyStore {
    answer: DomainResult<Option<ProxyHttp>>,
    loads: AtomicUsize,
}

impl MockProxyStore {
    pub fn returning(proxy: Option<ProxyHttp>) -> Self {
        Self { answer: Ok(proxy), loads: AtomicUsize::new(0) }
    }

    pub fn failing(err: Ats2Error) -> Self {
        Self { answer: Err(err), loads: AtomicUsize::new(0) }
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProxyStore for MockProxyStore {
    async fn load_proxy(&self) -> DomainResult<Option<ProxyHttp>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.answer.clone()
    }
}
