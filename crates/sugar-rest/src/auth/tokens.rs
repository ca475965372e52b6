//! Access token type.

use std::fmt;

use reqwest::header::HeaderValue;

use crate::error::AuthError;

/// An OAuth2 access token issued by the instance's token endpoint.
///
/// The lifetime is enforced by the server only; a held token may already be
/// rejected, which is why requests re-authenticate on HTTP 401.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - The header form is marked sensitive
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    value: String,
    header: HeaderValue,
}

impl AccessToken {
    /// Wrap a token string, for example one saved from an earlier session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NoToken`] for an empty string and
    /// [`AuthError::InvalidToken`] if the value cannot be sent as a header.
    pub fn new(token: impl Into<String>) -> Result<Self, AuthError> {
        let value = token.into();
        if value.is_empty() {
            return Err(AuthError::NoToken);
        }

        let mut header = HeaderValue::from_str(&value).map_err(|_| AuthError::InvalidToken)?;
        header.set_sensitive(true);

        Ok(Self { value, header })
    }

    /// Returns the raw token.
    ///
    /// Treat the value as a secret; anyone holding it can act as the user
    /// until it expires.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns the token as an `OAuth-Token` header value.
    pub(crate) fn header_value(&self) -> HeaderValue {
        self.header.clone()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}
