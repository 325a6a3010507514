//! The seam between the endpoint table and the network.

use crate::client::{create_http_client, Config};
use crate::error::Result;
use crate::http::{HttpRequest, HttpResponse};
use async_trait::async_trait;
use reqwest::Client;

/// Executes one [`HttpRequest`] and hands back the raw response.
///
/// Implementations must not retry and must not interpret the status: a
/// 4xx/5xx answer is still an `Ok(HttpResponse)`. Only failures to get an
/// answer at all are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with a client built from the configuration
    pub fn new(config: &Config) -> Result<Self> {
        Ok(HttpTransport {
            client: create_http_client(config)?,
        })
    }

    /// Wrap an existing reqwest client, sharing its connection pool
    pub fn with_client(client: Client) -> Self {
        HttpTransport { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self.client.request(request.method.into(), request.url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(ref form) = request.form {
            builder = builder.form(form);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(HttpResponse::new(status, body.to_vec()))
    }
}
