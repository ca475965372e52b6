//! Credentials, access tokens and the authenticated session.
//!
//! Every API call goes through an [`AuthSession`], which owns the
//! credentials and the current OAuth2 access token.

mod credentials;
mod session;
mod tokens;

pub use credentials::{CLIENT_ID, Credentials, DEFAULT_PLATFORM};
pub use session::AuthSession;
pub use tokens::AccessToken;

/// Header carrying the access token on every authenticated request.
pub const OAUTH_TOKEN_HEADER: &str = "OAuth-Token";
