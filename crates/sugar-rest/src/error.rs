//! Error types for the sugar-rest library.
//!
//! Each layer has its own error type: configuration problems surface as
//! [`ConfigError`], token acquisition as [`AuthError`], and authenticated
//! calls as [`RequestError`]. [`Error`] unifies them for callers that just
//! want to use `?`.

use thiserror::Error;

/// The unified error type for sugar-rest operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed client configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// Token acquisition failed.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// An authenticated request failed.
    #[error("request error: {0}")]
    Request(#[from] RequestError),
}

/// Configuration errors, raised before any network traffic happens.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The base URL was empty.
    #[error("base URL is required")]
    MissingBaseUrl,

    /// The username was empty.
    #[error("username is required")]
    MissingUsername,

    /// The base URL could not be used.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// A default header from the client options is not a valid HTTP header.
    #[error("invalid header '{name}': {reason}")]
    Header { name: String, reason: String },

    /// The HTTP client could not be constructed from the options.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Transport-level errors (nothing usable came back from the server).
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Any other transport failure.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

/// Errors from the OAuth2 password grant.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token endpoint answered without a usable `access_token`.
    #[error("no access token in OAuth response")]
    NoToken,

    /// The issued token cannot be sent as an HTTP header value.
    #[error("access token contains characters not allowed in a header")]
    InvalidToken,

    /// The token endpoint rejected the credentials.
    #[error("token request rejected with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The token endpoint returned a body that is not JSON.
    #[error("malformed OAuth response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The token endpoint could not be reached.
    #[error("transport failure during authentication: {0}")]
    TransportFailure(#[from] TransportError),

    /// The session configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::TransportFailure(TransportError::from(err))
    }
}

/// Errors from an authenticated API call.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The session could not obtain a token, either up front or while
    /// re-authenticating after a 401.
    #[error("authentication failed: {0}")]
    AuthFailed(#[source] AuthError),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The request never produced a response.
    #[error("transport failure: {0}")]
    TransportFailure(#[from] TransportError),

    /// A JSON response was expected but the body did not parse.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// A path segment would be dropped or merged when the URL is resolved,
    /// so the request would reach a different endpoint.
    #[error("cannot address '{path}': segment '{segment}' is not a valid path segment")]
    InvalidPath { path: String, segment: String },

    /// Reading an upload source or writing a download sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        RequestError::TransportFailure(TransportError::from(err))
    }
}

impl RequestError {
    /// Returns the HTTP status if the server answered with an error status.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the server rejected the request as unauthenticated.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Check if the addressed record or endpoint does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
