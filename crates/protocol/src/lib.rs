//! Message types and the transport contract for the micro-fetch HTTP client.
//!
//! This crate is the boundary between the client pipeline and the HTTP libraries that
//! actually move bytes. Every backend adapter implements [`transport::Transport`] and
//! exchanges [`protocol::ClientRequest`] / [`protocol::ClientResponse`] values, so the
//! pipeline above it never depends on a particular library.
//!
//! # Example
//!
//! ```
//! use http::{StatusCode, Uri};
//! use micro_fetch_protocol::protocol::{ClientRequest, ClientResponse};
//! use micro_fetch_protocol::transport::{InMemoryTransport, Transport};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let transport = InMemoryTransport::new()
//!     .route("http://example.com/", ClientResponse::new(StatusCode::OK).with_body("hello"));
//!
//! let request = ClientRequest::get(Uri::from_static("http://example.com/"));
//! let response = transport.send(&request).await.unwrap();
//! assert_eq!(response.status(), StatusCode::OK);
//! # });
//! ```
//!
//! # Architecture
//!
//! - [`protocol`]: requests, responses, bodies, per-message parameters and errors
//! - [`transport`]: the [`transport::Transport`] trait and an in-memory implementation
//!
//! # Limitations
//!
//! - Response bodies are fully buffered
//! - Connection pooling, TLS and DNS belong to the concrete transport

pub mod protocol;
pub mod transport;
