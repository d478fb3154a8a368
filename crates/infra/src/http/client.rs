use std::collections::HashMap;
use std::time::Duration;

use ats2_domain::constants::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use ats2_domain::{Ats2Error, ErrorBody, ProxyHttp, RemoteFailure, Result};
use parking_lot::Mutex;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

use super::proxy::to_reqwest_proxy;
use crate::errors::{InfraError, IntoRemoteFailure};

/// HTTP client with one reqwest client per distinct proxy.
///
/// No retries: a failed call is handed to the classifier as is. System proxy
/// variables are ignored; only an explicit [`ProxyHttp`] routes through a
/// proxy.
pub struct HttpClient {
    timeout: Duration,
    user_agent: String,
    clients: Mutex<HashMap<Option<ProxyHttp>, ReqwestClient>>,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// reqwest client for `proxy`, built on first use.
    pub fn client_for(&self, proxy: Option<&ProxyHttp>) -> Result<ReqwestClient> {
        let key = proxy.cloned();
        if let Some(client) = self.clients.lock().get(&key) {
            return Ok(client.clone());
        }

        let client = self.build_client(proxy)?;
        debug!(proxy = ?proxy, "Built HTTP client");
        Ok(self.clients.lock().entry(key).or_insert(client).clone())
    }

    /// Create a request builder routed through `proxy`.
    pub fn request<U>(
        &self,
        method: Method,
        url: U,
        proxy: Option<&ProxyHttp>,
    ) -> Result<RequestBuilder>
    where
        U: reqwest::IntoUrl,
    {
        Ok(self.client_for(proxy)?.request(method, url))
    }

    /// Execute the request once.
    ///
    /// Non-success statuses are returned as [`RemoteFailure::Response`] with
    /// the body parsed leniently for `message`/`details`.
    pub async fn send(&self, builder: RequestBuilder) -> std::result::Result<Response, RemoteFailure> {
        let (client, request) = builder.build_split();
        let request = request.map_err(|err| {
            RemoteFailure::from(Ats2Error::client(format!("Invalid HTTP request: {err}")))
        })?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, url = %url.path(), "sending HTTP request");

        let response = client.execute(request).await.map_err(|err| {
            debug!(%method, url = %url.path(), error = %err, "HTTP request failed");
            err.into_remote_failure()
        })?;

        let status = response.status();
        debug!(%method, url = %url.path(), %status, "received HTTP response");
        if status.is_success() {
            return Ok(response);
        }

        let raw = match response.bytes().await {
            Ok(raw) => raw,
            Err(err) => {
                debug!(%method, url = %url.path(), %status, error = %err, "failed to read error body");
                bytes::Bytes::new()
            }
        };
        Err(RemoteFailure::response(status.as_u16(), ErrorBody::parse(&raw)))
    }

    fn build_client(&self, proxy: Option<&ProxyHttp>) -> Result<ReqwestClient> {
        let mut builder =
            ReqwestClient::builder().timeout(self.timeout).user_agent(self.user_agent.as_str());

        builder = match proxy {
            Some(proxy) => builder.proxy(to_reqwest_proxy(proxy)?),
            None => builder.no_proxy(),
        };

        builder.build().map_err(|err| Ats2Error::from(InfraError::from(err)))
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client and its direct-connection reqwest client.
    pub fn build(self) -> Result<HttpClient> {
        let client = HttpClient {
            timeout: self.timeout,
            user_agent: self.user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            clients: Mutex::new(HashMap::new()),
        };
        client.client_for(None)?;
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use wiremock::matchers::{header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn returns_successful_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let request = client.request(Method::GET, server.uri(), None).unwrap();
        let response = client.send(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn does_not_retry_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({ "details": "Tele2 Server Error" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let request = client.request(Method::GET, server.uri(), None).unwrap();
        let failure = client.send(request).await.unwrap_err();

        match failure {
            RemoteFailure::Response { status, body, .. } => {
                assert_eq!(status, 500);
                assert_eq!(body.and_then(|b| b.details).as_deref(), Some("Tele2 Server Error"));
            }
            other => panic!("expected response failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_body_has_no_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let request = client.request(Method::GET, server.uri(), None).unwrap();

        assert_eq!(client.send(request).await.unwrap_err(), RemoteFailure::response(502, None));
    }

    #[tokio::test]
    async fn truncated_error_body_counts_as_no_body() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            socket
                .write_all(b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 64\r\n\r\n{\"det")
                .await
                .unwrap();
            socket.shutdown().await.unwrap();
        });

        let client = HttpClient::new().unwrap();
        let request = client.request(Method::GET, format!("http://{addr}/"), None).unwrap();

        assert_eq!(client.send(request).await.unwrap_err(), RemoteFailure::response(500, None));
    }

    #[tokio::test]
    async fn sends_configured_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("user-agent", "ats2-test/1.0"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::builder().user_agent("ats2-test/1.0").build().unwrap();
        let request = client.request(Method::GET, server.uri(), None).unwrap();

        assert!(client.send(request).await.is_ok());
    }

    #[test]
    fn caches_one_client_per_proxy() {
        let client = HttpClient::new().unwrap();
        let proxy = ProxyHttp::new("127.0.0.1", 3128);

        client.client_for(Some(&proxy)).unwrap();
        client.client_for(Some(&proxy)).unwrap();
        client.client_for(None).unwrap();

        assert_eq!(client.clients.lock().len(), 2);
    }
}
