//! sugar-rest - SugarCRM REST API client
//!
//! This library wraps the SugarCRM REST API behind a [`SugarClient`].
//! Authentication is handled by an [`AuthSession`]: the first request logs
//! in with the OAuth2 password grant, and a request rejected with HTTP 401
//! logs in again and is resent exactly once.
//!
//! # Example
//!
//! ```no_run
//! use serde_json::json;
//! use sugar_rest::{ClientConfig, SugarClient};
//!
//! # async fn example() -> Result<(), sugar_rest::Error> {
//! let config = ClientConfig::new("https://crm.example.com/rest/v11/", "admin", "secret")?;
//! let client = SugarClient::new(config)?;
//!
//! let case = client.create("Cases", json!({ "name": "Printer on fire" })).await?;
//! let id = case["id"].as_str().unwrap_or_default();
//!
//! client.relate("Accounts", "acme-1", "cases", id, json!({})).await?;
//! let cases = client.related("Accounts", "acme-1", "cases", json!({ "max_num": 5 })).await?;
//! println!("{}", cases["records"]);
//! # Ok(())
//! # }
//! ```

mod api;
pub mod auth;
mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

// Re-export primary types at crate root for convenience
pub use auth::{AccessToken, AuthSession, Credentials};
pub use client::SugarClient;
pub use config::{ClientConfig, ClientOptions};
pub use error::{AuthError, ConfigError, Error, RequestError, TransportError};
pub use http::{Body, Executor, Part, Request};
pub use types::{BaseUrl, Endpoint};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
