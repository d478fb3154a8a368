//! PBX open API client
//!
//! Each endpoint performs exactly one HTTP call with the raw token in the
//! `Authorization` header and runs the outcome through the classifier with
//! the endpoint's rule set. Retrying on a rejected token is the auth
//! coordinator's job, not this client's.

use async_trait::async_trait;
use ats2_core::{classify, TokenRefresher};
use ats2_domain::constants::RECORDING_CONTENT_TYPE;
use ats2_domain::{
    Ats2Error, CallRecordInfo, CallRecordsQuery, ClassificationRule, ClientConfig, Employee,
    MonitoringCall, MonitoringCallPending, ProxyHttp, RemoteFailure, Result, TokenPair,
};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::recording::RecordingFile;
use super::rules::{click_to_call_rules, default_rules, recording_rules};
use crate::errors::IntoRemoteFailure;
use crate::http::HttpClient;

type Query<'a> = &'a [(&'static str, String)];

/// HTTP client for the PBX open API
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` (without trailing slash).
    pub fn new(base_url: impl Into<String>, http: HttpClient) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self::new(config.base_url.clone(), http))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /employees`
    #[instrument(skip(self, token, proxy))]
    pub async fn employees(&self, token: &str, proxy: Option<&ProxyHttp>) -> Result<Vec<Employee>> {
        self.get_json("/employees", token, proxy, &[], &default_rules()).await
    }

    /// `GET /monitoring/calls`
    #[instrument(skip(self, token, proxy))]
    pub async fn monitoring_calls(
        &self,
        token: &str,
        proxy: Option<&ProxyHttp>,
    ) -> Result<Vec<MonitoringCall>> {
        self.get_json("/monitoring/calls", token, proxy, &[], &default_rules()).await
    }

    /// `GET /monitoring/calls/pending`
    #[instrument(skip(self, token, proxy))]
    pub async fn monitoring_calls_pending(
        &self,
        token: &str,
        proxy: Option<&ProxyHttp>,
    ) -> Result<Vec<MonitoringCallPending>> {
        self.get_json("/monitoring/calls/pending", token, proxy, &[], &default_rules()).await
    }

    /// `POST /call/outgoing/` - ring `employee_phone`, then connect it to
    /// `client_phone`. An unknown employee is reported as not found.
    #[instrument(skip(self, token, proxy))]
    pub async fn click_to_call(
        &self,
        token: &str,
        proxy: Option<&ProxyHttp>,
        employee_phone: &str,
        client_phone: &str,
    ) -> Result<()> {
        let query = [
            ("source", employee_phone.to_string()),
            ("destination", client_phone.to_string()),
        ];
        classify(
            async {
                self.execute(Method::POST, "/call/outgoing/", token, proxy, &query).await?;
                Ok(())
            },
            &click_to_call_rules(),
        )
        .await
    }

    /// `GET /call-records/info`
    ///
    /// Items that name a recording get a download URI pointing at
    /// `/call-records/file`.
    #[instrument(skip(self, token, proxy))]
    pub async fn call_records_info(
        &self,
        token: &str,
        proxy: Option<&ProxyHttp>,
        query: &CallRecordsQuery,
    ) -> Result<Vec<CallRecordInfo>> {
        let pairs = query.query_pairs();
        let mut records: Vec<CallRecordInfo> =
            self.get_json("/call-records/info", token, proxy, &pairs, &recording_rules()).await?;

        for record in &mut records {
            if let Some(name) = record.record_file_name.as_deref() {
                record.record_file_uri = Some(self.record_file_uri(name)?);
            }
        }
        debug!(count = records.len(), "Fetched call records");
        Ok(records)
    }

    /// `GET /call-records/file` as a byte stream
    #[instrument(skip(self, token, proxy))]
    pub async fn call_records_file(
        &self,
        token: &str,
        proxy: Option<&ProxyHttp>,
        record_file_name: &str,
    ) -> Result<RecordingFile> {
        let query = [("filename", record_file_name.to_string())];
        let response = classify(
            async {
                let builder = self
                    .authorized(Method::GET, "/call-records/file", token, proxy, &query)?
                    .header(CONTENT_TYPE, RECORDING_CONTENT_TYPE);
                self.http.send(builder).await
            },
            &recording_rules(),
        )
        .await?;

        Ok(RecordingFile::from_response(record_file_name, response))
    }

    /// Download URI for a recording file name
    pub fn record_file_uri(&self, record_file_name: &str) -> Result<String> {
        let url = Url::parse_with_params(
            &format!("{}/call-records/file", self.base_url),
            [("filename", record_file_name)],
        )
        .map_err(|err| Ats2Error::client(format!("Invalid base URL {}: {err}", self.base_url)))?;
        Ok(url.into())
    }

    fn authorized(
        &self,
        method: Method,
        path: &str,
        token: &str,
        proxy: Option<&ProxyHttp>,
        query: Query<'_>,
    ) -> Result<reqwest::RequestBuilder> {
        let mut builder = self
            .http
            .request(method, format!("{}{path}", self.base_url), proxy)?
            .header(AUTHORIZATION, token);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        Ok(builder)
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        token: &str,
        proxy: Option<&ProxyHttp>,
        query: Query<'_>,
    ) -> std::result::Result<Response, RemoteFailure> {
        let builder = self.authorized(method, path, token, proxy, query)?;
        self.http.send(builder).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
        proxy: Option<&ProxyHttp>,
        query: Query<'_>,
        rules: &[ClassificationRule],
    ) -> Result<T> {
        classify(
            async {
                let response = self.execute(Method::GET, path, token, proxy, query).await?;
                response.json::<T>().await.map_err(IntoRemoteFailure::into_remote_failure)
            },
            rules,
        )
        .await
    }
}

#[async_trait]
impl TokenRefresher for ApiClient {
    /// `PUT /authorization/refresh/token` with the refresh token as
    /// `Authorization`.
    #[instrument(skip_all)]
    async fn refresh_tokens(
        &self,
        refresh_token: &str,
        proxy: Option<&ProxyHttp>,
    ) -> Result<TokenPair> {
        classify(
            async {
                let response = self
                    .execute(Method::PUT, "/authorization/refresh/token", refresh_token, proxy, &[])
                    .await?;
                response.json::<TokenPair>().await.map_err(IntoRemoteFailure::into_remote_failure)
            },
            &default_rules(),
        )
        .await
    }
}
