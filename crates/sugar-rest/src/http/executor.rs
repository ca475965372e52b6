//! Authenticated request execution.

use reqwest::StatusCode;
use reqwest::multipart::{Form, Part as FormPart};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, trace, warn};

use crate::auth::{AccessToken, AuthSession, OAUTH_TOKEN_HEADER};
use crate::error::RequestError;

use super::query::to_query_pairs;
use super::request::{Body, Part, Request};

/// Executes [`Request`]s on behalf of an [`AuthSession`].
///
/// Every call logs in first if the session holds no token, sends the token
/// in the `OAuth-Token` header and, if the server answers 401, logs in once
/// more and resends. The outcome of that second attempt is returned as is;
/// there is no further retry.
#[derive(Debug, Clone)]
pub struct Executor {
    session: AuthSession,
}

impl Executor {
    /// Create an executor for a session.
    pub fn new(session: AuthSession) -> Self {
        Self { session }
    }

    /// Returns the session this executor authenticates with.
    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// Execute a request and return the raw response.
    ///
    /// The response body is left unread, so callers can stream it.
    ///
    /// # Errors
    ///
    /// - [`RequestError::InvalidPath`] if an id, link or field is empty, `.`
    ///   or `..`; nothing is sent
    /// - [`RequestError::AuthFailed`] if no token could be obtained
    /// - [`RequestError::HttpStatus`] for any non-2xx answer, including a
    ///   401 on the resend
    /// - [`RequestError::TransportFailure`] if no response was received
    #[instrument(
        skip(self, request),
        fields(method = %request.method(), path = %request.endpoint())
    )]
    pub async fn execute(&self, request: &Request) -> Result<reqwest::Response, RequestError> {
        if let Some(segment) = request.endpoint().collapsing_segment() {
            return Err(RequestError::InvalidPath {
                path: request.endpoint().to_string(),
                segment: segment.to_string(),
            });
        }

        let token = self
            .session
            .ensure_connected()
            .await
            .map_err(RequestError::AuthFailed)?;

        let response = self.send(request, &token).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return check_status(response).await;
        }

        warn!("token rejected, re-authenticating");
        let token = self
            .session
            .reauthenticate(&token)
            .await
            .map_err(RequestError::AuthFailed)?;

        let response = self.send(request, &token).await?;
        check_status(response).await
    }

    /// Execute a request and decode the JSON response.
    ///
    /// An empty body decodes as JSON `null`.
    pub async fn execute_json<R>(&self, request: &Request) -> Result<R, RequestError>
    where
        R: DeserializeOwned,
    {
        let response = self.execute(request).await?;
        let body = response.bytes().await?;
        decode_body(&body)
    }

    async fn send(
        &self,
        request: &Request,
        token: &AccessToken,
    ) -> Result<reqwest::Response, RequestError> {
        let url = self.session.endpoint_url(request.endpoint());
        debug!(%url, "sending request");

        let builder = self
            .session
            .http()
            .request(request.method().clone(), url)
            .header(OAUTH_TOKEN_HEADER, token.header_value());

        let builder = match request.body() {
            Body::Empty => builder,
            Body::Query(params) => {
                let pairs = to_query_pairs(params);
                trace!(?pairs, "query parameters");
                builder.query(&pairs)
            }
            Body::Json(body) => builder.json(body),
            Body::Multipart(parts) => builder.multipart(build_form(parts, token)?),
        };

        Ok(builder.send().await?)
    }
}

/// Build a multipart form, filling token fields with `token`.
fn build_form(parts: &[Part], token: &AccessToken) -> Result<Form, RequestError> {
    let mut form = Form::new();
    for part in parts {
        form = match part {
            Part::Text { name, value } => form.text(name.clone(), value.clone()),
            Part::Token { name } => form.text(name.clone(), token.as_str().to_string()),
            Part::File {
                name,
                file_name,
                content_type,
                contents,
            } => {
                let file = FormPart::bytes(contents.clone())
                    .file_name(file_name.clone())
                    .mime_str(content_type)?;
                form.part(name.clone(), file)
            }
        };
    }
    Ok(form)
}

/// Pass 2xx responses through; turn anything else into `HttpStatus`.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, RequestError> {
    let status = response.status();
    debug!(%status, "response received");

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(RequestError::HttpStatus {
        status: status.as_u16(),
        body,
    })
}

fn decode_body<R: DeserializeOwned>(body: &[u8]) -> Result<R, RequestError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_value(Value::Null).map_err(RequestError::Decode);
    }
    serde_json::from_slice(body).map_err(RequestError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_body_decodes_as_null() {
        let value: Value = decode_body(b"").unwrap();
        assert_eq!(value, Value::Null);

        let value: Option<Vec<String>> = decode_body(b"  \n").unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn json_body_decodes() {
        let value: Value = decode_body(br#"{"records":[]}"#).unwrap();
        assert_eq!(value, json!({ "records": [] }));
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let result: Result<Value, _> = decode_body(b"<html>oops</html>");
        assert!(matches!(result, Err(RequestError::Decode(_))));
    }

    #[test]
    fn form_builds_with_token_and_file() {
        let token = AccessToken::new("tok").unwrap();
        let parts = vec![
            Part::text("format", "sugar-html-json"),
            Part::Token {
                name: "oauth_token".to_string(),
            },
            Part::File {
                name: "filename".to_string(),
                file_name: "a.txt".to_string(),
                content_type: "text/plain".to_string(),
                contents: b"hello".to_vec(),
            },
        ];
        assert!(build_form(&parts, &token).is_ok());
    }
}
