use std::time::Instant;

use log::{debug, info, warn};
use nestview::entities::{NestingRequest, PlacementResult, RequestError};
use nestview::io::export::export_request;
use nestview::io::import::{ImportError, import_response};
use thiserror::Error;

use crate::guard::SubmissionGuard;
use crate::transport::{HttpTransport, Transport, TransportError};

/// Endpoint of a nesting service running on the local machine.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/nest";

#[derive(Debug, Error)]
pub enum ClientError {
    /// The service answered with a non-2xx status
    #[error("Error {status}: {reason}")]
    Status { status: u16, reason: String },
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("could not interpret the service response: {0}")]
    Decode(#[from] ImportError),
    #[error("could not encode the request: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("a submission is already in progress")]
    Busy,
    #[error("request cannot be submitted: {0}")]
    Request(#[from] RequestError),
}

/// Submits nesting requests to a single endpoint.
#[derive(Debug)]
pub struct NestClient<T = HttpTransport> {
    transport: T,
    endpoint: String,
    guard: SubmissionGuard,
}

impl NestClient<HttpTransport> {
    pub fn new(endpoint: impl Into<String>) -> Self {
        NestClient::with_transport(HttpTransport::new(), endpoint)
    }
}

impl Default for NestClient<HttpTransport> {
    fn default() -> Self {
        NestClient::new(DEFAULT_ENDPOINT)
    }
}

impl<T: Transport> NestClient<T> {
    pub fn with_transport(transport: T, endpoint: impl Into<String>) -> Self {
        NestClient {
            transport,
            endpoint: endpoint.into(),
            guard: SubmissionGuard::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The busy flag used by [`NestClient::submit_guarded`], for front ends that want to
    /// disable their submit action while it is set.
    pub fn guard(&self) -> &SubmissionGuard {
        &self.guard
    }

    /// Sends `request` to the endpoint and resolves the answer against it.
    ///
    /// Blocking validation errors are returned before anything is sent, warnings are logged.
    /// A single attempt is made.
    pub async fn submit(&self, request: &NestingRequest) -> Result<PlacementResult, ClientError> {
        for warning in request.validate()? {
            warn!("[CLIENT] {warning}");
        }
        let body = serde_json::to_string(&export_request(request))?;
        info!(
            "[CLIENT] submitting {} pieces ({} copies, {}) to {}",
            request.pieces.len(),
            request.total_copies(),
            request.strategy,
            self.endpoint
        );
        debug!("[CLIENT] request body: {} bytes", body.len());

        let start = Instant::now();
        let response = self.transport.post_json(&self.endpoint, body).await?;
        if !response.is_success() {
            warn!(
                "[CLIENT] service answered {} {} after {}ms",
                response.status,
                response.reason,
                start.elapsed().as_millis()
            );
            return Err(ClientError::Status {
                status: response.status,
                reason: response.reason,
            });
        }

        let result = import_response(&response.body, request)?;
        info!(
            "[CLIENT] received {} bins, {} pieces placed, avg efficiency {:.2}% in {}ms",
            result.summary.total_bins,
            result.summary.total_pieces_placed,
            result.summary.average_efficiency,
            start.elapsed().as_millis()
        );
        Ok(result)
    }

    /// Like [`NestClient::submit`], but fails with [`ClientError::Busy`] without sending
    /// anything while another guarded submission of this client is pending.
    pub async fn submit_guarded(
        &self,
        request: &NestingRequest,
    ) -> Result<PlacementResult, ClientError> {
        let _ticket = self.guard.try_begin().inspect_err(|_| {
            debug!("[CLIENT] submission refused, another one is in flight");
        })?;
        self.submit(request).await
    }
}
