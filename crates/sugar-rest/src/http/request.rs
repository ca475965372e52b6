//! Request descriptors.

use std::fmt;

use reqwest::Method;
use serde_json::Value;

use crate::types::Endpoint;

/// One logical API call: verb, endpoint and payload.
///
/// Descriptors are plain data so the executor can rebuild the HTTP request
/// when it has to resend with a fresh token.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    endpoint: Endpoint,
    body: Body,
}

/// How the parameters of a request are encoded.
#[derive(Debug, Clone, Default)]
pub enum Body {
    /// No parameters.
    #[default]
    Empty,
    /// Parameters flattened into the query string.
    Query(Value),
    /// Parameters sent as a JSON body.
    Json(Value),
    /// A `multipart/form-data` body.
    Multipart(Vec<Part>),
}

/// A part of a multipart body.
#[derive(Clone)]
pub enum Part {
    /// A plain string field.
    Text { name: String, value: String },
    /// A string field holding the access token used for this attempt.
    Token { name: String },
    /// File contents.
    File {
        name: String,
        file_name: String,
        content_type: String,
        contents: Vec<u8>,
    },
}

impl Request {
    /// Create a request without parameters.
    pub fn new(method: Method, endpoint: Endpoint) -> Self {
        Self {
            method,
            endpoint,
            body: Body::Empty,
        }
    }

    /// `GET` request.
    pub fn get(endpoint: Endpoint) -> Self {
        Self::new(Method::GET, endpoint)
    }

    /// `POST` request.
    pub fn post(endpoint: Endpoint) -> Self {
        Self::new(Method::POST, endpoint)
    }

    /// `PUT` request.
    pub fn put(endpoint: Endpoint) -> Self {
        Self::new(Method::PUT, endpoint)
    }

    /// `DELETE` request.
    pub fn delete(endpoint: Endpoint) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    /// Send `params` in the query string.
    pub fn query(mut self, params: Value) -> Self {
        self.body = Body::Query(params);
        self
    }

    /// Send `body` as JSON. `null` is sent as an empty object.
    pub fn json(mut self, body: Value) -> Self {
        let body = match body {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };
        self.body = Body::Json(body);
        self
    }

    /// Send a multipart form.
    pub fn multipart(mut self, parts: Vec<Part>) -> Self {
        self.body = Body::Multipart(parts);
        self
    }

    /// Returns the HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the endpoint.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns the body.
    pub fn body(&self) -> &Body {
        &self.body
    }
}

impl Part {
    /// A plain string field.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Part::Text {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Debug for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Part::Text { name, value } => f
                .debug_struct("Text")
                .field("name", name)
                .field("value", value)
                .finish(),
            Part::Token { name } => f.debug_struct("Token").field("name", name).finish(),
            Part::File {
                name,
                file_name,
                content_type,
                contents,
            } => f
                .debug_struct("File")
                .field("name", name)
                .field("file_name", file_name)
                .field("content_type", content_type)
                .field("len", &contents.len())
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_json_body_becomes_empty_object() {
        let request = Request::post(Endpoint::new("Cases")).json(Value::Null);
        assert!(matches!(request.body(), Body::Json(v) if *v == json!({})));
    }

    #[test]
    fn file_part_debug_omits_contents() {
        let part = Part::File {
            name: "filename".to_string(),
            file_name: "notes.txt".to_string(),
            content_type: "text/plain".to_string(),
            contents: b"top secret".to_vec(),
        };
        let debug = format!("{:?}", part);
        assert!(debug.contains("notes.txt"));
        assert!(!debug.contains("top secret"));
    }
}
