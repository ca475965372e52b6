//! File attachment operations.

use std::path::Path;

use futures_util::StreamExt;
use reqwest::StatusCode;
use serde_json::Value;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, instrument, warn};

use crate::client::SugarClient;
use crate::error::RequestError;
use crate::http::endpoints::{self, UPLOAD_FORMAT};
use crate::http::{Part, Request};

impl SugarClient {
    /// List the file fields of a record. `GET {module}/{id}/file`
    #[instrument(skip(self))]
    pub async fn files(&self, module: &str, id: &str) -> Result<Value, RequestError> {
        let request = Request::get(endpoints::files(module, id));
        self.executor().execute_json(&request).await
    }

    /// Download a file field to `destination`, creating or truncating it.
    /// `GET {module}/{id}/file/{field}`
    ///
    /// The file is only created once the server has answered 200, and is
    /// removed again if the transfer fails part way. Returns the number of
    /// bytes written.
    #[instrument(skip(self, destination), fields(destination = %destination.as_ref().display()))]
    pub async fn download(
        &self,
        module: &str,
        id: &str,
        field: &str,
        destination: impl AsRef<Path>,
    ) -> Result<u64, RequestError> {
        let destination = destination.as_ref();
        let response = self.fetch_file(module, id, field).await?;
        let mut file = tokio::fs::File::create(destination).await?;

        match stream_body(response, &mut file).await {
            Ok(written) => Ok(written),
            Err(err) => {
                drop(file);
                if let Err(remove_err) = tokio::fs::remove_file(destination).await {
                    warn!(error = %remove_err, "failed to remove partial download");
                }
                Err(err)
            }
        }
    }

    /// Download a file field into any async writer. Returns the number of
    /// bytes written.
    #[instrument(skip(self, sink))]
    pub async fn download_to<W>(
        &self,
        module: &str,
        id: &str,
        field: &str,
        sink: &mut W,
    ) -> Result<u64, RequestError>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let response = self.fetch_file(module, id, field).await?;
        stream_body(response, sink).await
    }

    /// Upload a local file into a file field. `POST {module}/{id}/file/{field}`
    ///
    /// The multipart body carries `format=sugar-html-json`,
    /// `delete_if_fails=true`, the current token as `oauth_token`, and the
    /// file under the field's name. The content type is guessed from the
    /// file extension.
    #[instrument(skip(self, source), fields(source = %source.as_ref().display()))]
    pub async fn upload(
        &self,
        module: &str,
        id: &str,
        field: &str,
        source: impl AsRef<Path>,
    ) -> Result<Value, RequestError> {
        let source = source.as_ref();
        let contents = tokio::fs::read(source).await?;
        let file_name = source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| field.to_string());
        let content_type = mime_guess::from_path(source)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        debug!(bytes = contents.len(), %content_type, "uploading file");

        let parts = vec![
            Part::text("format", UPLOAD_FORMAT),
            Part::text("delete_if_fails", "true"),
            Part::Token {
                name: "oauth_token".to_string(),
            },
            Part::File {
                name: field.to_string(),
                file_name,
                content_type,
                contents,
            },
        ];

        let request = Request::post(endpoints::file(module, id, field)).multipart(parts);
        self.executor().execute_json(&request).await
    }

    /// Remove the file stored in a file field. `DELETE {module}/{id}/file/{field}`
    #[instrument(skip(self))]
    pub async fn delete_file(
        &self,
        module: &str,
        id: &str,
        field: &str,
    ) -> Result<Value, RequestError> {
        let request = Request::delete(endpoints::file(module, id, field));
        self.executor().execute_json(&request).await
    }

    async fn fetch_file(
        &self,
        module: &str,
        id: &str,
        field: &str,
    ) -> Result<reqwest::Response, RequestError> {
        let request = Request::get(endpoints::file(module, id, field));
        let response = self.executor().execute(&request).await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(RequestError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

/// Copy a response body into `sink` chunk by chunk.
async fn stream_body<W>(response: reqwest::Response, sink: &mut W) -> Result<u64, RequestError>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut body = response.bytes_stream();
    let mut written = 0u64;

    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        sink.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    sink.flush().await?;

    debug!(bytes = written, "download complete");
    Ok(written)
}
