//! Relationship (link) operations.

use serde_json::Value;
use tracing::instrument;

use crate::client::SugarClient;
use crate::error::RequestError;
use crate::http::{Request, endpoints};

impl SugarClient {
    /// List records related through a link. `GET {module}/{id}/link/{link}`
    #[instrument(skip(self, params))]
    pub async fn related(
        &self,
        module: &str,
        id: &str,
        link: &str,
        params: Value,
    ) -> Result<Value, RequestError> {
        let request = Request::get(endpoints::link(module, id, link)).query(params);
        self.executor().execute_json(&request).await
    }

    /// Relate two records, with optional relationship fields.
    /// `POST {module}/{id}/link/{link}/{related_id}`
    #[instrument(skip(self, fields))]
    pub async fn relate(
        &self,
        module: &str,
        id: &str,
        link: &str,
        related_id: &str,
        fields: Value,
    ) -> Result<Value, RequestError> {
        let request =
            Request::post(endpoints::linked_record(module, id, link, related_id)).json(fields);
        self.executor().execute_json(&request).await
    }

    /// Remove the relationship between two records.
    /// `DELETE {module}/{id}/link/{link}/{related_id}`
    #[instrument(skip(self))]
    pub async fn unrelate(
        &self,
        module: &str,
        id: &str,
        link: &str,
        related_id: &str,
    ) -> Result<Value, RequestError> {
        let request = Request::delete(endpoints::linked_record(module, id, link, related_id));
        self.executor().execute_json(&request).await
    }

    /// Update the fields of an existing relationship.
    /// `PUT {module}/{id}/link/{link}/{related_id}`
    #[instrument(skip(self, fields))]
    pub async fn update_relationship(
        &self,
        module: &str,
        id: &str,
        link: &str,
        related_id: &str,
        fields: Value,
    ) -> Result<Value, RequestError> {
        let request =
            Request::put(endpoints::linked_record(module, id, link, related_id)).json(fields);
        self.executor().execute_json(&request).await
    }
}
