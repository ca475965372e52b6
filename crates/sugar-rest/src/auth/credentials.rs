//! Login credentials type.

use std::fmt;

use crate::error::ConfigError;
use crate::types::BaseUrl;

/// OAuth2 client id sent with every password grant.
pub const CLIENT_ID: &str = "sugar";

/// Platform sent when none is configured.
pub const DEFAULT_PLATFORM: &str = "api";

/// Everything needed to obtain a token from an instance: where it lives,
/// who is logging in, and the platform the session is registered under.
///
/// # Security
///
/// The password is never exposed in Debug output.
///
/// # Example
///
/// ```
/// use sugar_rest::Credentials;
///
/// let creds = Credentials::new("https://crm.example.com/rest/v11/", "admin", "secret")
///     .unwrap()
///     .with_platform("mobile");
/// assert_eq!(creds.username(), "admin");
/// assert_eq!(creds.platform(), "mobile");
/// ```
#[derive(Clone)]
pub struct Credentials {
    base_url: BaseUrl,
    username: String,
    password: String,
    platform: String,
}

impl Credentials {
    /// Create credentials with the default platform.
    ///
    /// # Errors
    ///
    /// Fails if the base URL is empty or invalid, or the username is empty.
    /// An empty password is accepted; the server decides whether it is valid.
    pub fn new(
        base_url: &str,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let base_url = BaseUrl::new(base_url)?;
        let username = username.into();
        if username.is_empty() {
            return Err(ConfigError::MissingUsername);
        }

        Ok(Self {
            base_url,
            username,
            password: password.into(),
            platform: DEFAULT_PLATFORM.to_string(),
        })
    }

    /// Set the platform string. An empty value keeps the default.
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        let platform = platform.into();
        if !platform.is_empty() {
            self.platform = platform;
        }
        self
    }

    /// Returns the instance base URL.
    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the platform.
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Returns the password. Only used to build the token request.
    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("platform", &self.platform)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_hides_password_in_debug() {
        let creds = Credentials::new("https://crm.example.com", "admin", "secret123").unwrap();
        let debug = format!("{:?}", creds);
        assert!(debug.contains("admin"));
        assert!(!debug.contains("secret123"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn required_fields() {
        assert!(matches!(
            Credentials::new("", "admin", "pw"),
            Err(ConfigError::MissingBaseUrl)
        ));
        assert!(matches!(
            Credentials::new("https://crm.example.com", "", "pw"),
            Err(ConfigError::MissingUsername)
        ));
        assert!(Credentials::new("https://crm.example.com", "admin", "").is_ok());
    }

    #[test]
    fn platform_defaults_to_api() {
        let creds = Credentials::new("https://crm.example.com", "admin", "pw").unwrap();
        assert_eq!(creds.platform(), DEFAULT_PLATFORM);
        assert_eq!(creds.with_platform("").platform(), DEFAULT_PLATFORM);
    }
}
