//! Client facade
//!
//! Every operation goes through [`AuthCoordinator::call_with_auth`], so
//! callers only ever see the typed [`Ats2Error`] taxonomy: a stale token is
//! refreshed once and the call retried once before anything surfaces.

use std::sync::Arc;
use std::time::Instant;

use ats2_core::{AuthCoordinator, ProxyStore, TokenRefresher, TokenStore};
use ats2_domain::{
    Ats2Error, CallRecordInfo, CallRecordsQuery, ClientConfig, Employee, MonitoringCall,
    MonitoringCallPending, Result, StrategyConfig,
};
use ats2_infra::{ApiClient, FileTokenStore, RecordingFile, StaticProxyStore};
use tracing::instrument;

use crate::logging::log_operation;

/// Tele2 ATS2 PBX client
///
/// Cloning is cheap; clones share the token cache and any in-flight refresh.
#[derive(Clone)]
pub struct Ats2Client {
    api: Arc<ApiClient>,
    coordinator: AuthCoordinator,
}

impl Ats2Client {
    /// Compose a client from its parts.
    pub fn new(
        api: Arc<ApiClient>,
        token_store: Arc<dyn TokenStore>,
        proxy_store: Arc<dyn ProxyStore>,
        strategy: &StrategyConfig,
    ) -> Self {
        let refresher: Arc<dyn TokenRefresher> = Arc::clone(&api) as Arc<dyn TokenRefresher>;
        let coordinator = AuthCoordinator::new(token_store, refresher)
            .with_proxy_store(proxy_store)
            .with_strategy(strategy);
        Self { api, coordinator }
    }

    /// File token store, static proxy store and an HTTP client built from
    /// `config`. An empty `token_file` means the default file in the working
    /// directory.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let api = Arc::new(ApiClient::from_config(config)?);
        let seed = config.refresh_token.clone();
        let token_store = if config.token_file.is_empty() {
            FileTokenStore::with_default_path(seed)
        } else {
            FileTokenStore::new(&config.token_file, seed)
        };
        let proxy_store = StaticProxyStore::new(config.proxy.clone());

        Ok(Self::new(api, Arc::new(token_store), Arc::new(proxy_store), &config.strategy))
    }

    pub fn coordinator(&self) -> &AuthCoordinator {
        &self.coordinator
    }

    /// Run one refresh cycle now, or join the one in flight.
    ///
    /// Meant for schedulers that rotate tokens ahead of time.
    #[instrument(skip(self))]
    pub async fn forced_auth(&self) -> Result<()> {
        let started = Instant::now();
        let result =
            self.coordinator.run_strategy_auth().await.map(|_| ()).map_err(Ats2Error::into_client);
        log_operation("forced_auth", started.elapsed(), &result);
        result
    }

    /// Company employees
    #[instrument(skip(self))]
    pub async fn employees(&self) -> Result<Vec<Employee>> {
        let api = &self.api;
        let started = Instant::now();
        let result = self
            .coordinator
            .call_with_auth(move |token, proxy| async move {
                api.employees(&token, proxy.as_ref()).await
            })
            .await;
        log_operation("employees", started.elapsed(), &result);
        result
    }

    /// Calls currently in progress
    #[instrument(skip(self))]
    pub async fn monitoring_calls(&self) -> Result<Vec<MonitoringCall>> {
        let api = &self.api;
        let started = Instant::now();
        let result = self
            .coordinator
            .call_with_auth(move |token, proxy| async move {
                api.monitoring_calls(&token, proxy.as_ref()).await
            })
            .await;
        log_operation("monitoring_calls", started.elapsed(), &result);
        result
    }

    /// Calls waiting in queues
    #[instrument(skip(self))]
    pub async fn monitoring_calls_pending(&self) -> Result<Vec<MonitoringCallPending>> {
        let api = &self.api;
        let started = Instant::now();
        let result = self
            .coordinator
            .call_with_auth(move |token, proxy| async move {
                api.monitoring_calls_pending(&token, proxy.as_ref()).await
            })
            .await;
        log_operation("monitoring_calls_pending", started.elapsed(), &result);
        result
    }

    /// Ring `employee_phone` and connect it to `client_phone`.
    ///
    /// An unknown employee surfaces as a client error whose
    /// [`Ats2Error::api_kind`] is not-found.
    #[instrument(skip(self))]
    pub async fn click_to_call(&self, employee_phone: &str, client_phone: &str) -> Result<()> {
        let api = &self.api;
        let started = Instant::now();
        let result = self
            .coordinator
            .call_with_auth(move |token, proxy| async move {
                api.click_to_call(&token, proxy.as_ref(), employee_phone, client_phone).await
            })
            .await;
        log_operation("click_to_call", started.elapsed(), &result);
        result
    }

    /// Call records matching `query`, with download URIs filled in
    #[instrument(skip(self))]
    pub async fn call_records_info(&self, query: &CallRecordsQuery) -> Result<Vec<CallRecordInfo>> {
        let api = &self.api;
        let started = Instant::now();
        let result = self
            .coordinator
            .call_with_auth(move |token, proxy| async move {
                api.call_records_info(&token, proxy.as_ref(), query).await
            })
            .await;
        log_operation("call_records_info", started.elapsed(), &result);
        result
    }

    /// One recording as a named byte stream
    #[instrument(skip(self))]
    pub async fn call_records_file(&self, record_file_name: &str) -> Result<RecordingFile> {
        let api = &self.api;
        let started = Instant::now();
        let result = self
            .coordinator
            .call_with_auth(move |token, proxy| async move {
                api.call_records_file(&token, proxy.as_ref(), record_file_name).await
            })
            .await;
        log_operation("call_records_file", started.elapsed(), &result);
        result
    }
}
