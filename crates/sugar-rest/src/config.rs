//! Client configuration.
//!
//! A [`ClientConfig`] is handed to [`AuthSession::new`](crate::AuthSession::new)
//! once; transport options are applied when the session builds its HTTP
//! client and are shared by every request made through it.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::auth::Credentials;
use crate::error::ConfigError;

/// Transport-level options merged into every request.
///
/// All fields are optional; unset fields fall back to the HTTP client's
/// defaults (which means no overall timeout).
///
/// # Example
///
/// ```
/// use sugar_rest::ClientOptions;
///
/// let options: ClientOptions = serde_json::from_str(
///     r#"{ "timeout_secs": 30, "headers": { "X-Sugar-Team": "east" } }"#,
/// ).unwrap();
/// assert_eq!(options.timeout_secs, Some(30));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    /// Overall per-request timeout.
    pub timeout_secs: Option<u64>,
    /// Timeout for establishing the connection.
    pub connect_timeout_secs: Option<u64>,
    /// User agent; defaults to `sugar-rest/<version>`.
    pub user_agent: Option<String>,
    /// Skip TLS certificate verification (self-signed test instances).
    pub accept_invalid_certs: bool,
    /// Extra headers sent with every request.
    pub headers: BTreeMap<String, String>,
}

impl ClientOptions {
    /// Set the overall request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = Some(timeout.as_secs());
        self
    }

    /// Add a header sent with every request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Build the HTTP client these options describe.
    pub(crate) fn build_http_client(&self) -> Result<reqwest::Client, ConfigError> {
        let user_agent = self
            .user_agent
            .clone()
            .unwrap_or_else(|| concat!("sugar-rest/", env!("CARGO_PKG_VERSION")).to_string());

        let mut builder = reqwest::Client::builder()
            .user_agent(user_agent)
            .default_headers(self.default_headers()?)
            .danger_accept_invalid_certs(self.accept_invalid_certs);

        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = self.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }

        builder.build().map_err(ConfigError::HttpClient)
    }

    fn default_headers(&self) -> Result<HeaderMap, ConfigError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| ConfigError::Header {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| ConfigError::Header {
                name: name.clone(),
                reason: e.to_string(),
            })?;
            headers.insert(header_name, header_value);
        }
        Ok(headers)
    }
}

/// Everything a session needs: credentials plus transport options.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    credentials: Credentials,
    options: ClientOptions,
}

impl ClientConfig {
    /// Create a configuration with default platform and options.
    ///
    /// # Errors
    ///
    /// Fails if the base URL is empty or invalid, or the username is empty.
    pub fn new(
        base_url: &str,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::from_credentials(Credentials::new(
            base_url, username, password,
        )?))
    }

    /// Create a configuration from existing credentials.
    pub fn from_credentials(credentials: Credentials) -> Self {
        Self {
            credentials,
            options: ClientOptions::default(),
        }
    }

    /// Set the platform sent during authentication.
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.credentials = self.credentials.with_platform(platform);
        self
    }

    /// Replace the transport options.
    pub fn with_options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the transport options.
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub(crate) fn into_parts(self) -> (Credentials, ClientOptions) {
        (self.credentials, self.options)
    }
}
