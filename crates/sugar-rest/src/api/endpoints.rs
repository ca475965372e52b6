//! Generic endpoint calls and the current user.

use serde_json::Value;
use tracing::instrument;

use crate::client::SugarClient;
use crate::error::RequestError;
use crate::http::{Request, endpoints};
use crate::types::Endpoint;

impl SugarClient {
    /// `GET` an arbitrary endpoint, with `params` in the query string.
    ///
    /// `path` is relative to the base URL; each `/`-separated segment is
    /// escaped on its own. Paths with `.` or `..` segments are refused with
    /// [`RequestError::InvalidPath`].
    #[instrument(skip(self, params))]
    pub async fn get_endpoint(&self, path: &str, params: Value) -> Result<Value, RequestError> {
        let request = Request::get(Endpoint::parse(path)).query(params);
        self.executor().execute_json(&request).await
    }

    /// `POST` to an arbitrary endpoint with a JSON body.
    #[instrument(skip(self, params))]
    pub async fn post_endpoint(&self, path: &str, params: Value) -> Result<Value, RequestError> {
        let request = Request::post(Endpoint::parse(path)).json(params);
        self.executor().execute_json(&request).await
    }

    /// `PUT` to an arbitrary endpoint with a JSON body.
    #[instrument(skip(self, params))]
    pub async fn put_endpoint(&self, path: &str, params: Value) -> Result<Value, RequestError> {
        let request = Request::put(Endpoint::parse(path)).json(params);
        self.executor().execute_json(&request).await
    }

    /// `DELETE` an arbitrary endpoint.
    #[instrument(skip(self))]
    pub async fn delete_endpoint(&self, path: &str) -> Result<Value, RequestError> {
        let request = Request::delete(Endpoint::parse(path));
        self.executor().execute_json(&request).await
    }

    /// Fetch the current user. `GET me`
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<Value, RequestError> {
        let request = Request::get(Endpoint::new(endpoints::ME_PATH));
        self.executor().execute_json(&request).await
    }
}
