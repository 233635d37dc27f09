//! An asynchronous micro HTTP client pipeline
//!
//! This crate puts one request/response contract in front of interchangeable transport
//! backends and runs cross-cutting stages around the raw send. The central stage follows
//! HTTP redirects: it decides whether a response asks for another hop, derives the next
//! request with the method and body rules of RFC 9110, bounds the chain, and stamps the
//! terminal response with where the chain ended up.
//!
//! # Example
//!
//! ```
//! use http::{StatusCode, Uri};
//! use micro_fetch::{Client, RedirectConfig};
//! use micro_fetch_protocol::protocol::ClientResponse;
//! use micro_fetch_protocol::transport::InMemoryTransport;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let transport = InMemoryTransport::new()
//!     .redirect("http://example.com/old", StatusCode::MOVED_PERMANENTLY, "http://example.com/new")
//!     .route("http://example.com/new", ClientResponse::new(StatusCode::OK));
//!
//! let client = Client::builder()
//!     .transport(transport)
//!     .redirect(RedirectConfig::default().max_redirects(3))
//!     .build()
//!     .unwrap();
//!
//! let response = client.get(Uri::from_static("http://example.com/old")).await.unwrap();
//! assert_eq!(response.status(), StatusCode::OK);
//! assert_eq!(response.params().redirect_count(), 1);
//! assert_eq!(response.params().effective_url().unwrap(), "http://example.com/new");
//! # });
//! ```
//!
//! # Architecture
//!
//! - [`Client`]: the send pipeline, built with [`Client::builder`]
//! - [`interceptor`]: ordered stages around the transport send
//! - [`redirect`]: redirect policy, chain tracking, hop guard and finalization
//! - [`config`]: redirect and timeout settings
//! - [`error`]: [`FetchError`], the only failure a send reports
//!
//! # Redirect rules
//!
//! - A response is a redirect iff its status is in `[300, 400)` and it has a `Location`
//! - `303` always, and `300`..=`302` unless strict, continue as a bodyless `GET`
//! - `Location` is used literally, relative references are not resolved
//! - More than `max_redirects` hops either fails or returns the last response seen

pub mod config;
pub mod error;
pub mod interceptor;
pub mod redirect;

mod client;

pub use client::Client;
pub use client::ClientBuildError;
pub use client::ClientBuilder;
pub use config::ClientConfig;
pub use config::RedirectConfig;
pub use error::FetchError;
pub use error::RedirectLimitExceeded;
