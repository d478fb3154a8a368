//! Auth coordinator
//!
//! Keeps one access token available to any number of concurrent callers:
//! - the token is cached in memory and only dropped when a refresh starts
//! - at most one refresh strategy runs per coordinator; late callers join it
//! - a call rejected as unauthorized forces one refresh and is retried once
//! - when neither the remote refresh nor the token store can produce a token,
//!   callers get the terminal lost-truth-token error
//!
//! The coordinator never predicts expiry. It only reacts to the remote side
//! rejecting a token.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use ats2_domain::constants::DEFAULT_STRATEGY_ATTEMPTS_MS;
use ats2_domain::utils::token_preview;
use ats2_domain::{Ats2Error, ProxyHttp, Result, StrategyConfig};
use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use super::ports::{ProxyStore, TokenRefresher, TokenStore};

type SharedRefresh = Shared<BoxFuture<'static, Result<String>>>;

/// Refresh strategy currently running, tagged so a finished strategy only
/// clears its own slot
struct InFlight {
    id: u64,
    refresh: SharedRefresh,
}

#[derive(Default)]
struct State {
    cached: Option<String>,
    in_flight: Option<InFlight>,
    next_id: u64,
}

struct Inner {
    token_store: Arc<dyn TokenStore>,
    proxy_store: Option<Arc<dyn ProxyStore>>,
    refresher: Arc<dyn TokenRefresher>,
    schedule: Vec<Duration>,
    state: Mutex<State>,
}

/// Clears the in-flight slot when the strategy task ends, whatever the exit
/// path (success, error or panic).
struct InFlightGuard {
    inner: Arc<Inner>,
    id: u64,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut state = self.inner.state.lock();
        if state.in_flight.as_ref().is_some_and(|flight| flight.id == self.id) {
            state.in_flight = None;
        }
    }
}

/// Access token lifecycle for one credential pair.
///
/// Cloning is cheap and clones share the cache and the in-flight refresh.
/// Separately constructed coordinators share nothing.
#[derive(Clone)]
pub struct AuthCoordinator {
    inner: Arc<Inner>,
}

impl AuthCoordinator {
    /// Create a coordinator with no proxy store and the default retry
    /// schedule.
    pub fn new(token_store: Arc<dyn TokenStore>, refresher: Arc<dyn TokenRefresher>) -> Self {
        Self {
            inner: Arc::new(Inner {
                token_store,
                proxy_store: None,
                refresher,
                schedule: DEFAULT_STRATEGY_ATTEMPTS_MS
                    .iter()
                    .copied()
                    .map(Duration::from_millis)
                    .collect(),
                state: Mutex::new(State::default()),
            }),
        }
    }

    /// Attach a proxy store consulted before every remote call
    ///
    /// The returned coordinator starts with an empty cache.
    #[must_use]
    pub fn with_proxy_store(self, proxy_store: Arc<dyn ProxyStore>) -> Self {
        self.rebuild(|inner| inner.proxy_store = Some(proxy_store))
    }

    /// Replace the store-polling schedule used after a failed refresh
    ///
    /// The returned coordinator starts with an empty cache.
    #[must_use]
    pub fn with_schedule(self, schedule: Vec<Duration>) -> Self {
        self.rebuild(|inner| inner.schedule = schedule)
    }

    /// Replace the schedule from configuration
    #[must_use]
    pub fn with_strategy(self, strategy: &StrategyConfig) -> Self {
        self.with_schedule(strategy.delays())
    }

    fn rebuild(&self, apply: impl FnOnce(&mut Inner)) -> Self {
        let mut inner = Inner {
            token_store: Arc::clone(&self.inner.token_store),
            proxy_store: self.inner.proxy_store.clone(),
            refresher: Arc::clone(&self.inner.refresher),
            schedule: self.inner.schedule.clone(),
            state: Mutex::new(State::default()),
        };
        apply(&mut inner);
        Self { inner: Arc::new(inner) }
    }

    /// Access token currently cached in memory
    pub fn cached_access_token(&self) -> Option<String> {
        self.inner.state.lock().cached.clone()
    }

    /// `true` while a refresh strategy is outstanding
    pub fn is_refreshing(&self) -> bool {
        self.inner.state.lock().in_flight.is_some()
    }

    /// Current access token.
    ///
    /// Order of sources: memory cache, an in-flight refresh, the token store,
    /// and finally a new refresh strategy.
    pub async fn get_access_token(&self) -> Result<String> {
        let (joined, epoch) = {
            let state = self.inner.state.lock();
            if let Some(token) = &state.cached {
                return Ok(token.clone());
            }
            (state.in_flight.as_ref().map(|flight| flight.refresh.clone()), state.next_id)
        };
        if let Some(refresh) = joined {
            debug!("Waiting for in-flight token refresh");
            return refresh.await;
        }

        if let Some(token) = self.inner.token_store.load_access_token().await? {
            // A refresh that started while the store was read, running or
            // already finished, makes this snapshot stale.
            let joined = {
                let mut state = self.inner.state.lock();
                if let Some(flight) = &state.in_flight {
                    Some(flight.refresh.clone())
                } else {
                    let refreshed = state.cached.clone().filter(|_| state.next_id != epoch);
                    if let Some(refreshed) = refreshed {
                        debug!("Store read raced a finished refresh, keeping the refreshed token");
                        return Ok(refreshed);
                    }
                    state.cached = Some(token.clone());
                    None
                }
            };
            if let Some(refresh) = joined {
                return refresh.await;
            }
            debug!(token = %token_preview(&token), "Access token loaded from store");
            return Ok(token);
        }

        self.run_strategy_auth().await
    }

    /// Start the refresh strategy, or join the one already running.
    ///
    /// The cache is cleared and the in-flight slot is filled under one lock
    /// acquisition, so every caller arriving afterwards joins this refresh.
    /// The strategy runs as its own task: callers that stop waiting do not
    /// cancel it.
    pub async fn run_strategy_auth(&self) -> Result<String> {
        let refresh = {
            let mut state = self.inner.state.lock();
            let joined = state.in_flight.as_ref().map(|flight| flight.refresh.clone());
            if let Some(refresh) = joined {
                debug!("Joining in-flight token refresh");
                refresh
            } else {
                state.cached = None;
                state.next_id += 1;
                let id = state.next_id;

                info!(refresh_id = id, "Starting token refresh");
                let inner = Arc::clone(&self.inner);
                let task = tokio::spawn(async move {
                    let _guard = InFlightGuard { inner: Arc::clone(&inner), id };
                    inner.strategy_auth().await
                });
                let refresh = task
                    .map(|joined| {
                        joined.unwrap_or_else(|err| {
                            Err(Ats2Error::client(format!("Token refresh task failed: {err}")))
                        })
                    })
                    .boxed()
                    .shared();

                state.in_flight = Some(InFlight { id, refresh: refresh.clone() });
                refresh
            }
        };

        refresh.await
    }

    /// Run `call` with a valid access token and the current proxy.
    ///
    /// An unauthorized failure forces one refresh and one retry; a second
    /// unauthorized failure is terminal. Other failures surface as client
    /// errors, except errors the client raised itself, which pass unchanged.
    pub async fn call_with_auth<T, F, Fut>(&self, call: F) -> Result<T>
    where
        F: Fn(String, Option<ProxyHttp>) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let proxy = self.load_proxy().await?;
        let token = self.get_access_token().await.map_err(Ats2Error::into_client)?;

        match call(token, proxy).await {
            Ok(value) => Ok(value),
            Err(err) if err.is_unauthorized() => {
                warn!("Access token rejected, forcing re-authentication");
                let token = self.run_strategy_auth().await.map_err(Ats2Error::into_client)?;
                let proxy = self.load_proxy().await?;

                match call(token, proxy).await {
                    Ok(value) => Ok(value),
                    Err(err) if err.is_unauthorized() => {
                        error!("Fresh access token rejected as well");
                        Err(Ats2Error::LostTruthToken(err.to_string()))
                    }
                    Err(err) => Err(err.into_client()),
                }
            }
            Err(err) => Err(err.into_client()),
        }
    }

    async fn load_proxy(&self) -> Result<Option<ProxyHttp>> {
        self.inner.load_proxy().await
    }
}

impl Inner {
    async fn load_proxy(&self) -> Result<Option<ProxyHttp>> {
        let Some(store) = &self.proxy_store else {
            return Ok(None);
        };
        store.load_proxy().await.map_err(|err| match err {
            Ats2Error::Proxy(_) => err,
            other => {
                warn!(error = %other, "Failed to load proxy settings");
                Ats2Error::Proxy(format!("Error load proxy: {other}"))
            }
        })
    }

    fn cache(&self, token: &str) {
        self.state.lock().cached = Some(token.to_string());
    }

    /// One remote refresh, then store polls on the configured schedule.
    async fn strategy_auth(&self) -> Result<String> {
        let refresh_token = self.token_store.load_refresh_token().await?;
        let proxy = self.load_proxy().await?;

        debug!(refresh_token = %token_preview(&refresh_token), "Calling remote token refresh");
        let refresh_err = match self.refresher.refresh_tokens(&refresh_token, proxy.as_ref()).await
        {
            Ok(pair) => {
                self.token_store.save_tokens(&pair).await?;
                self.cache(&pair.access_token);
                info!(token = %token_preview(&pair.access_token), "Token refresh succeeded");
                return Ok(pair.access_token);
            }
            Err(err) => err,
        };

        warn!(
            error = %refresh_err,
            polls = self.schedule.len(),
            "Remote token refresh failed, polling token store"
        );

        for (attempt, delay) in self.schedule.iter().enumerate() {
            tokio::time::sleep(*delay).await;
            match self.token_store.load_access_token().await {
                Ok(Some(token)) => {
                    info!(attempt = attempt + 1, "Recovered access token from store");
                    self.cache(&token);
                    return Ok(token);
                }
                Ok(None) => debug!(attempt = attempt + 1, "No access token in store yet"),
                Err(err) => warn!(attempt = attempt + 1, error = %err, "Token store poll failed"),
            }
        }

        error!(error = %refresh_err, "Lost truth token: refresh and store polls exhausted");
        Err(Ats2Error::LostTruthToken(refresh_err.to_string()))
    }
}
