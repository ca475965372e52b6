//! Shared helpers for the mock-server tests.

#![allow(dead_code)]

use serde_json::json;
use sugar_rest::{ClientConfig, SugarClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// REST prefix the mock instance is served under.
pub const BASE_PATH: &str = "/rest/v11";

/// Absolute request path for an endpoint relative to the base URL.
pub fn api_path(endpoint: &str) -> String {
    format!("{BASE_PATH}/{endpoint}")
}

/// Base URL of the mock instance, with the trailing slash users copy from
/// their browser.
pub fn base_url(server: &MockServer) -> String {
    format!("{}{BASE_PATH}/", server.uri())
}

/// Client for the mock instance, not yet logged in.
pub fn client(server: &MockServer) -> SugarClient {
    let config = ClientConfig::new(&base_url(server), "admin", "secret").unwrap();
    SugarClient::new(config).unwrap()
}

/// Mock for the token endpoint.
pub fn token_mock(token: &str) -> Mock {
    Mock::given(method("POST"))
        .and(path(api_path("oauth2/token")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": token,
            "expires_in": 3600,
            "token_type": "bearer",
            "scope": null,
            "refresh_token": "unused-refresh-token"
        })))
}

/// Token endpoint that always issues `token`.
pub async fn mount_token(server: &MockServer, token: &str) {
    token_mock(token).mount(server).await;
}

/// Client that has already logged in with `token`.
pub async fn connected_client(server: &MockServer, token: &str) -> SugarClient {
    mount_token(server, token).await;
    let client = client(server);
    client.connect().await.unwrap();
    client
}
