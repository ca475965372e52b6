//! Addressing types for the SugarCRM REST API.

mod base_url;
mod endpoint;

pub use base_url::BaseUrl;
pub use endpoint::Endpoint;
