//! A transport answering from a fixed route table.
//!
//! [`InMemoryTransport`] never touches the network. Each route maps the exact string
//! form of a request URI to a canned [`ClientResponse`], optionally delayed to exercise
//! per-hop timeouts. Every request it receives is recorded so callers can inspect what
//! a pipeline actually sent.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use http::header::LOCATION;
use http::{HeaderValue, StatusCode};
use tracing::trace;

use crate::protocol::{ClientRequest, ClientResponse, TransportError};
use crate::transport::Transport;

#[derive(Debug, Default)]
pub struct InMemoryTransport {
    routes: HashMap<String, Route>,
    sent: Mutex<Vec<ClientRequest>>,
    skip_recording: bool,
}

#[derive(Debug, Clone)]
struct Route {
    response: ClientResponse,
    latency: Option<Duration>,
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers requests for `uri` with a clone of `response`.
    #[must_use]
    pub fn route<U: Into<String>>(mut self, uri: U, response: ClientResponse) -> Self {
        self.routes.insert(uri.into(), Route { response, latency: None });
        self
    }

    /// Like [`route`](Self::route), but the answer is delayed by `latency`.
    #[must_use]
    pub fn route_with_latency<U: Into<String>>(mut self, uri: U, response: ClientResponse, latency: Duration) -> Self {
        self.routes.insert(uri.into(), Route { response, latency: Some(latency) });
        self
    }

    /// Answers requests for `from` with `status` and a `Location: to` header.
    ///
    /// # Panics
    ///
    /// Panics if `to` is not a valid header value.
    #[must_use]
    pub fn redirect<U: Into<String>>(self, from: U, status: StatusCode, to: &str) -> Self {
        let location = HeaderValue::from_str(to).expect("redirect target must be a valid header value");
        self.route(from, ClientResponse::new(status).with_header(LOCATION, location))
    }

    /// Stops keeping a copy of every request, for long running loops.
    #[must_use]
    pub fn skip_recording(mut self) -> Self {
        self.skip_recording = true;
        self
    }

    /// Every request received so far, in arrival order.
    pub fn sent_requests(&self) -> Vec<ClientRequest> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[async_trait]
impl Transport for InMemoryTransport {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn send(&self, request: &ClientRequest) -> Result<ClientResponse, TransportError> {
        if !self.skip_recording {
            self.sent.lock().unwrap_or_else(PoisonError::into_inner).push(request.clone());
        }

        let key = request.uri().to_string();
        let Some(route) = self.routes.get(&key) else {
            return Err(TransportError::connect(format!("no route to {key}")));
        };

        if let Some(latency) = route.latency {
            let delay = tokio::time::sleep(latency);
            match request.timeout() {
                Some(timeout) => {
                    tokio::time::timeout(timeout, delay).await.map_err(|_elapsed| TransportError::timeout(timeout))?;
                }
                None => delay.await,
            }
        }

        let mut response = route.response.clone();
        response.set_version(request.version());
        trace!(method = %request.method(), uri = %key, status = response.status().as_u16(), "answered from route table");
        Ok(response)
    }
}
