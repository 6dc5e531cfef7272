use std::future::Future;

use reqwest::header::CONTENT_TYPE;
use thiserror::Error;

/// Raw answer of the service, before any interpretation of its status or body.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    /// Canonical reason phrase of `status`, empty if unknown
    pub reason: String,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP transport failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("transport failed: {0}")]
    Other(String),
}

/// Moves a JSON document to an endpoint and brings back whatever the endpoint answered.
///
/// Implementations make exactly one attempt and do not retry.
pub trait Transport {
    fn post_json(
        &self,
        url: &str,
        body: String,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send;
}

/// [`Transport`] over HTTP, with the default timeouts of [`reqwest`].
#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        HttpTransport { client }
    }
}

impl Transport for HttpTransport {
    fn post_json(
        &self,
        url: &str,
        body: String,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send {
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        async move {
            let response = request.send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok(TransportResponse {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            })
        }
    }
}
