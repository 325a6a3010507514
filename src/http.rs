//! Plain-data HTTP request and response types.
//!
//! The endpoint table produces [`HttpRequest`] values and a [`Transport`]
//! turns them into [`HttpResponse`] values. Neither type knows about the
//! network, so both can be built and inspected in tests.
//!
//! [`Transport`]: crate::transport::Transport

use crate::error::{ApiError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use url::Url;

/// HTTP method of an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A fully resolved request, ready to be sent.
///
/// `url` carries no query string; query parameters live in `query` and are
/// appended by the transport. `form` is `Some` exactly when the endpoint is
/// form-url-encoded, even if it ends up with no fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Name of the endpoint that built this request
    pub operation: &'static str,
    pub method: HttpMethod,
    pub url: Url,
    pub query: Vec<(String, String)>,
    pub form: Option<Vec<(String, String)>>,
}

impl HttpRequest {
    /// Value of a query parameter, if present
    pub fn query_value(&self, key: &str) -> Option<&str> {
        lookup(&self.query, key)
    }

    /// Value of a form field, if present
    pub fn form_value(&self, key: &str) -> Option<&str> {
        self.form.as_deref().and_then(|form| lookup(form, key))
    }

    /// Whether the request carries a form-url-encoded body
    pub fn is_form(&self) -> bool {
        self.form.is_some()
    }
}

fn lookup<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Raw response as returned by a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        HttpResponse {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, replacing invalid UTF-8
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body into the target type.
    ///
    /// Non-2xx statuses become [`ApiError::Http`] without looking at the
    /// body. An empty body decodes as JSON `null`, so status-only endpoints
    /// can still produce a value.
    pub fn decode<T>(&self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        if !self.is_success() {
            return Err(ApiError::http(self.status, self.text()));
        }

        let decoded = if self.body.iter().all(u8::is_ascii_whitespace) {
            serde_json::from_value(Value::Null)
        } else {
            serde_json::from_slice(&self.body)
        };

        decoded.map_err(|source| ApiError::Decode {
            source,
            body: self.text(),
        })
    }
}
