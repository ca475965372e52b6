//! The SugarCRM API client.

use tracing::instrument;

use crate::auth::{AccessToken, AuthSession};
use crate::config::ClientConfig;
use crate::error::{AuthError, ConfigError};
use crate::http::Executor;
use crate::types::BaseUrl;

/// Client for one SugarCRM instance.
///
/// Wraps an [`Executor`] and maps record, relationship and file operations
/// onto API endpoints. Cloning is cheap; clones share the session and its
/// token.
///
/// Nothing is validated client-side: unknown modules, ids or links are
/// reported by the server as [`RequestError::HttpStatus`].
///
/// [`RequestError::HttpStatus`]: crate::RequestError::HttpStatus
#[derive(Debug, Clone)]
pub struct SugarClient {
    executor: Executor,
}

impl SugarClient {
    /// Create a client with a fresh, unauthenticated session.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_session(AuthSession::new(config)?))
    }

    /// Create a client over an existing session.
    pub fn with_session(session: AuthSession) -> Self {
        Self {
            executor: Executor::new(session),
        }
    }

    /// Returns the underlying session.
    pub fn session(&self) -> &AuthSession {
        self.executor.session()
    }

    /// Returns the executor, for calls not covered by the typed methods.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Returns the instance base URL.
    pub fn base_url(&self) -> BaseUrl {
        self.session().base_url()
    }

    /// Log in now instead of on the first request.
    #[instrument(skip(self))]
    pub async fn connect(&self) -> Result<AccessToken, AuthError> {
        self.session().connect().await
    }

    /// Revoke the current token and forget it. See [`AuthSession::logout`].
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.session().logout().await
    }

    /// Resume with a previously issued token instead of logging in.
    pub fn set_token(&self, token: &str) -> Result<(), AuthError> {
        self.session().set_token(token)
    }

    /// Returns the current token, if any.
    pub fn token(&self) -> Option<AccessToken> {
        self.session().token()
    }

    /// Returns true if the session holds a token.
    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }
}
