//! Authenticated HTTP execution.
//!
//! This module turns [`Request`] descriptors into HTTP calls that carry the
//! session token, re-authenticating once when the server answers 401.

pub(crate) mod endpoints;
mod executor;
mod query;
mod request;

pub(crate) use endpoints::{LOGOUT_PATH, TOKEN_PATH, TokenRequest, TokenResponse};
pub use executor::Executor;
pub use request::{Body, Part, Request};
