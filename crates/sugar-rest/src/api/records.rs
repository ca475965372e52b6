//! Record operations.

use serde_json::Value;
use tracing::{debug, instrument};

use crate::client::SugarClient;
use crate::error::RequestError;
use crate::http::{Request, endpoints};

impl SugarClient {
    /// Create a record. `POST {module}`
    ///
    /// Returns the created record as the server echoes it.
    #[instrument(skip(self, fields))]
    pub async fn create(&self, module: &str, fields: Value) -> Result<Value, RequestError> {
        debug!("creating record");
        let request = Request::post(endpoints::module(module)).json(fields);
        self.executor().execute_json(&request).await
    }

    /// List or search records. `GET {module}`
    ///
    /// Common parameters are `q`, `max_num`, `offset`, `fields`, `order_by`,
    /// `favorites` and `deleted`.
    #[instrument(skip(self, params))]
    pub async fn search(&self, module: &str, params: Value) -> Result<Value, RequestError> {
        let request = Request::get(endpoints::module(module)).query(params);
        self.executor().execute_json(&request).await
    }

    /// Filter records. `GET {module}/filter`
    ///
    /// ```no_run
    /// # async fn example(client: sugar_rest::SugarClient) -> Result<(), sugar_rest::RequestError> {
    /// let accounts = client
    ///     .filter("Accounts", serde_json::json!({
    ///         "filter": [{ "name": { "$starts": "Acme" } }],
    ///         "max_num": 20,
    ///     }))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self, params))]
    pub async fn filter(&self, module: &str, params: Value) -> Result<Value, RequestError> {
        let request = Request::get(endpoints::module(module).join("filter")).query(params);
        self.executor().execute_json(&request).await
    }

    /// Count records matching a filter. `GET {module}/count`
    #[instrument(skip(self, params))]
    pub async fn count_records(
        &self,
        module: &str,
        params: Value,
    ) -> Result<Value, RequestError> {
        let request = Request::get(endpoints::module(module).join("count")).query(params);
        self.executor().execute_json(&request).await
    }

    /// Fetch a single record. `GET {module}/{id}`
    #[instrument(skip(self))]
    pub async fn retrieve(&self, module: &str, id: &str) -> Result<Value, RequestError> {
        let request = Request::get(endpoints::record(module, id));
        self.executor().execute_json(&request).await
    }

    /// Update a record. `PUT {module}/{id}`
    #[instrument(skip(self, fields))]
    pub async fn update(
        &self,
        module: &str,
        id: &str,
        fields: Value,
    ) -> Result<Value, RequestError> {
        debug!("updating record");
        let request = Request::put(endpoints::record(module, id)).json(fields);
        self.executor().execute_json(&request).await
    }

    /// Delete a record. `DELETE {module}/{id}`
    #[instrument(skip(self))]
    pub async fn delete(&self, module: &str, id: &str) -> Result<Value, RequestError> {
        debug!("deleting record");
        let request = Request::delete(endpoints::record(module, id));
        self.executor().execute_json(&request).await
    }

    /// Mark a record as a favorite of the current user. `PUT {module}/{id}/favorite`
    #[instrument(skip(self))]
    pub async fn favorite(&self, module: &str, id: &str) -> Result<Value, RequestError> {
        let request = Request::put(endpoints::favorite(module, id));
        self.executor().execute_json(&request).await
    }

    /// Remove a record from the current user's favorites. `DELETE {module}/{id}/favorite`
    #[instrument(skip(self))]
    pub async fn unfavorite(&self, module: &str, id: &str) -> Result<Value, RequestError> {
        let request = Request::delete(endpoints::favorite(module, id));
        self.executor().execute_json(&request).await
    }
}
