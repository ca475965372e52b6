//! Endpoint paths and OAuth payloads.

use serde::{Deserialize, Serialize};

use crate::types::Endpoint;

/// OAuth2 token endpoint, relative to the base URL.
pub const TOKEN_PATH: &str = "oauth2/token";

/// OAuth2 logout endpoint.
pub const LOGOUT_PATH: &str = "oauth2/logout";

/// Current user endpoint.
pub const ME_PATH: &str = "me";

/// `format` value required by file uploads.
pub const UPLOAD_FORMAT: &str = "sugar-html-json";

/// Request body for the password grant.
#[derive(Debug, Serialize)]
pub struct TokenRequest<'a> {
    pub grant_type: &'a str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub username: &'a str,
    pub password: &'a str,
    pub platform: &'a str,
}

/// Response from the token endpoint. Only the access token is used.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

/// `{module}`
pub fn module(module: &str) -> Endpoint {
    Endpoint::new(module)
}

/// `{module}/{id}`
pub fn record(module: &str, id: &str) -> Endpoint {
    Endpoint::new(module).join(id)
}

/// `{module}/{id}/favorite`
pub fn favorite(module: &str, id: &str) -> Endpoint {
    record(module, id).join("favorite")
}

/// `{module}/{id}/file`
pub fn files(module: &str, id: &str) -> Endpoint {
    record(module, id).join("file")
}

/// `{module}/{id}/file/{field}`
pub fn file(module: &str, id: &str, field: &str) -> Endpoint {
    files(module, id).join(field)
}

/// `{module}/{id}/link/{link}`
pub fn link(module: &str, id: &str, link: &str) -> Endpoint {
    record(module, id).join("link").join(link)
}

/// `{module}/{id}/link/{link}/{related_id}`
pub fn linked_record(module: &str, id: &str, link_name: &str, related_id: &str) -> Endpoint {
    link(module, id, link_name).join(related_id)
}
