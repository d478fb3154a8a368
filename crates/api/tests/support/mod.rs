use std::sync::Arc;

use ats2_client::Ats2Client;
use ats2_domain::StrategyConfig;
use ats2_infra::{ApiClient, HttpClient, MemoryTokenStore, StaticProxyStore};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Facade wired to `server` with an in-memory token store.
pub fn client_for(
    server: &MockServer,
    store: Arc<MemoryTokenStore>,
    attempts_ms: Vec<u64>,
) -> Ats2Client {
    let api = Arc::new(ApiClient::new(server.uri(), HttpClient::new().expect("http client")));
    Ats2Client::new(
        api,
        store,
        Arc::new(StaticProxyStore::direct()),
        &StrategyConfig::new(attempts_ms),
    )
}

/// 403 response the PBX sends for a stale access token.
pub fn stale_token() -> ResponseTemplate {
    ResponseTemplate::new(403).set_body_json(json!({
        "message": "Forbidden",
        "details": "The token has already been updated"
    }))
}

/// Expect exactly `times` refreshes with `refresh`, each minting
/// `access`/`next_refresh`.
pub async fn mount_refresh(
    server: &MockServer,
    refresh: &str,
    access: &str,
    next_refresh: &str,
    times: u64,
) {
    Mock::given(method("PUT"))
        .and(path("/authorization/refresh/token"))
        .and(header("authorization", refresh))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "accessToken": access, "refreshToken": next_refresh })),
        )
        .expect(times)
        .mount(server)
        .await;
}

/// Successful `/employees` response for `token`.
pub async fn mount_employees(server: &MockServer, token: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path("/employees"))
        .and(header("authorization", token))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "employeeId": 1, "name": "Ann", "shortNumber": "101" }
        ])))
        .expect(times)
        .mount(server)
        .await;
}
