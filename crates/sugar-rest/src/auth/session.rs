//! Session management for authenticated SugarCRM calls.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use reqwest::StatusCode;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{AuthError, ConfigError};
use crate::http::{LOGOUT_PATH, TOKEN_PATH, TokenRequest, TokenResponse};
use crate::types::{BaseUrl, Endpoint};

use super::OAUTH_TOKEN_HEADER;
use super::credentials::{CLIENT_ID, Credentials};
use super::tokens::AccessToken;

/// An authentication session against one SugarCRM instance.
///
/// The session owns the credentials and the current access token and knows
/// how to obtain a new token with the OAuth2 password grant. It starts
/// unauthenticated; the first request (or an explicit [`connect`]) logs in.
///
/// # Thread Safety
///
/// Sessions are cheap to clone (they use internal `Arc`) and are safe to
/// share across tasks. Logging in is serialized: concurrent callers that
/// find the session unauthenticated, or whose token was rejected, wait for
/// a single token request instead of each issuing their own.
///
/// [`connect`]: AuthSession::connect
#[derive(Clone)]
pub struct AuthSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    http: reqwest::Client,
    credentials: RwLock<Credentials>,
    token: RwLock<Option<AccessToken>>,
    login: Mutex<()>,
}

impl AuthSession {
    /// Create an unauthenticated session.
    ///
    /// # Errors
    ///
    /// Fails if the transport options cannot be turned into an HTTP client.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let (credentials, options) = config.into_parts();
        let http = options.build_http_client()?;

        Ok(Self {
            inner: Arc::new(SessionInner {
                http,
                credentials: RwLock::new(credentials),
                token: RwLock::new(None),
                login: Mutex::new(()),
            }),
        })
    }

    /// Replace the credentials used for the next login.
    ///
    /// The current token, if any, is kept until the server rejects it.
    ///
    /// # Errors
    ///
    /// Fails if the base URL or username is empty, or the base URL is invalid.
    pub fn set_credentials(
        &self,
        base_url: &str,
        username: &str,
        password: &str,
        platform: &str,
    ) -> Result<(), ConfigError> {
        let credentials = Credentials::new(base_url, username, password)?.with_platform(platform);
        debug!(base_url = %credentials.base_url(), username, "credentials updated");
        *self.write_credentials() = credentials;
        Ok(())
    }

    /// Returns true if a token is held. Does not contact the server.
    pub fn is_authenticated(&self) -> bool {
        self.read_token().is_some()
    }

    /// Returns the current token, if any.
    pub fn token(&self) -> Option<AccessToken> {
        self.read_token().clone()
    }

    /// Adopt a token obtained elsewhere, such as one saved from an earlier
    /// session. It replaces any token held and is used until the server
    /// rejects it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NoToken`] for an empty string and
    /// [`AuthError::InvalidToken`] if the value cannot be sent as a header.
    pub fn set_token(&self, token: &str) -> Result<(), AuthError> {
        let token = AccessToken::new(token)?;
        *self.write_token() = Some(token);
        debug!("access token set by caller");
        Ok(())
    }

    /// Returns a snapshot of the current credentials.
    pub fn credentials(&self) -> Credentials {
        self.read_credentials().clone()
    }

    /// Returns the base URL requests are resolved against.
    pub fn base_url(&self) -> BaseUrl {
        self.read_credentials().base_url().clone()
    }

    /// Log in with the password grant and store the issued token.
    ///
    /// A successful login replaces any token already held.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NoToken`] if the response carries no access
    /// token, and [`AuthError::TransportFailure`] if the token endpoint
    /// cannot be reached.
    pub async fn connect(&self) -> Result<AccessToken, AuthError> {
        let _login = self.inner.login.lock().await;
        self.login().await
    }

    /// Log in unless a token is already held, and return the token.
    pub async fn ensure_connected(&self) -> Result<AccessToken, AuthError> {
        if let Some(token) = self.token() {
            return Ok(token);
        }

        let _login = self.inner.login.lock().await;
        // Another caller may have logged in while we waited.
        if let Some(token) = self.token() {
            return Ok(token);
        }
        self.login().await
    }

    /// Obtain a replacement for a token the server rejected.
    ///
    /// If another caller already replaced `stale`, its token is returned
    /// without logging in again.
    pub(crate) async fn reauthenticate(
        &self,
        stale: &AccessToken,
    ) -> Result<AccessToken, AuthError> {
        let _login = self.inner.login.lock().await;
        if let Some(current) = self.token().filter(|current| current != stale) {
            debug!("token already replaced by a concurrent request");
            return Ok(current);
        }
        self.login().await
    }

    /// Revoke the current token with `POST oauth2/logout` and forget it.
    ///
    /// Does nothing if no token is held. A 401 answer means the server no
    /// longer accepts the token, so it is dropped as well.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`] for any other non-2xx answer and
    /// [`AuthError::TransportFailure`] if the server cannot be reached. The
    /// token is kept in both cases.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), AuthError> {
        let _login = self.inner.login.lock().await;
        let Some(token) = self.token() else {
            debug!("no token held, nothing to revoke");
            return Ok(());
        };

        let url = self.endpoint_url(&Endpoint::parse(LOGOUT_PATH));
        let response = self
            .inner
            .http
            .post(url)
            .header(OAUTH_TOKEN_HEADER, token.header_value())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() && status != StatusCode::UNAUTHORIZED {
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        *self.write_token() = None;
        info!("logged out");
        Ok(())
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    pub(crate) fn endpoint_url(&self, endpoint: &Endpoint) -> Url {
        self.read_credentials().base_url().endpoint_url(endpoint)
    }

    /// Token request proper. Callers hold the login lock.
    #[instrument(skip(self))]
    async fn login(&self) -> Result<AccessToken, AuthError> {
        let credentials = self.credentials();
        let url = credentials
            .base_url()
            .endpoint_url(&Endpoint::parse(TOKEN_PATH));
        info!(
            username = credentials.username(),
            platform = credentials.platform(),
            "requesting access token"
        );

        let request = TokenRequest {
            grant_type: "password",
            client_id: CLIENT_ID,
            client_secret: "",
            username: credentials.username(),
            password: credentials.password(),
            platform: credentials.platform(),
        };

        let response = self.inner.http.post(url).json(&request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let response: TokenResponse = serde_json::from_slice(&body).map_err(AuthError::Decode)?;
        let token = AccessToken::new(response.access_token.unwrap_or_default())?;

        *self.write_token() = Some(token.clone());
        debug!("access token stored");

        Ok(token)
    }

    fn read_token(&self) -> RwLockReadGuard<'_, Option<AccessToken>> {
        self.inner.token.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_token(&self) -> RwLockWriteGuard<'_, Option<AccessToken>> {
        self.inner.token.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_credentials(&self) -> RwLockReadGuard<'_, Credentials> {
        self.inner
            .credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_credentials(&self) -> RwLockWriteGuard<'_, Credentials> {
        self.inner
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

// Custom Debug impl that hides sensitive data
impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("credentials", &*self.read_credentials())
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
