//! Instance base URL type.

use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::ConfigError;

use super::Endpoint;

/// A validated base URL of a SugarCRM REST API, such as
/// `https://crm.example.com/rest/v11/`.
///
/// Every endpoint of the API is resolved relative to this URL by appending
/// path-escaped segments to its path.
///
/// # Example
///
/// ```
/// use sugar_rest::{BaseUrl, Endpoint};
///
/// let base = BaseUrl::new("https://crm.example.com/rest/v11/").unwrap();
/// let url = base.endpoint_url(&Endpoint::new("Cases").join("abc 1"));
/// assert_eq!(url.as_str(), "https://crm.example.com/rest/v11/Cases/abc%201");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Parse and validate a base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingBaseUrl`] for an empty string and
    /// [`ConfigError::BaseUrl`] when the value is not an absolute HTTP(S) URL
    /// with a host.
    pub fn new(s: impl AsRef<str>) -> Result<Self, ConfigError> {
        let s = s.as_ref().trim();
        if s.is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }

        let mut url = Url::parse(s).map_err(|e| ConfigError::BaseUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        url.set_query(None);
        url.set_fragment(None);

        Ok(Self(url))
    }

    /// Resolve an endpoint against this base URL.
    pub fn endpoint_url(&self, endpoint: &Endpoint) -> Url {
        let mut url = self.0.clone();
        // Validation guarantees the URL can be a base, so this always succeeds.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(endpoint.segments());
        }
        url
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, input: &str) -> Result<(), ConfigError> {
        if url.cannot_be_a_base() {
            return Err(ConfigError::BaseUrl {
                value: input.to_string(),
                reason: "must be an absolute URL".to_string(),
            });
        }

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::BaseUrl {
                value: input.to_string(),
                reason: "must use http or https".to_string(),
            });
        }

        if url.host_str().is_none_or(str::is_empty) {
            return Err(ConfigError::BaseUrl {
                value: input.to_string(),
                reason: "must have a host".to_string(),
            });
        }

        Ok(())
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BaseUrl {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}
