//! Asynchronous client for a remote nesting service.
//!
//! A [`NestClient`] posts a [`NestingRequest`](nestview::entities::NestingRequest) as JSON to a
//! single endpoint and resolves the response into a
//! [`PlacementResult`](nestview::entities::PlacementResult). One attempt is made per call and
//! [`NestClient::submit_guarded`] refuses to start a second submission while one is in flight.

mod client;
mod guard;
mod transport;

#[doc(inline)]
pub use client::{ClientError, DEFAULT_ENDPOINT, NestClient};

#[doc(inline)]
pub use guard::{SubmissionGuard, Ticket};

#[doc(inline)]
pub use transport::{HttpTransport, Transport, TransportError, TransportResponse};
