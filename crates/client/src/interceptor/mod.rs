//! Ordered request/response stages around the transport send.
//!
//! An [`Interceptor`] sees the root request before it is sent and the resulting
//! [`Exchange`] afterwards. Stages run in the order they were added; a stage may rewrite
//! the exchange wholesale, which is how redirect following hands the terminal
//! request/response pair to the stages after it.

mod default_headers;

pub use default_headers::DefaultHeaders;

use std::fmt;
use std::mem;

use async_trait::async_trait;
use micro_fetch_protocol::protocol::{ClientRequest, ClientResponse};
use micro_fetch_protocol::transport::Transport;

use crate::error::FetchError;

#[async_trait]
pub trait Interceptor: Send + Sync {
    /// Stage name, used in logs.
    fn name(&self) -> &'static str;

    async fn on_request(&self, _req: &mut ClientRequest) {}

    async fn on_response(&self, _exchange: &mut Exchange<'_>) -> Result<(), FetchError> {
        Ok(())
    }
}

/// The transport, request and response of one completed send.
pub struct Exchange<'t> {
    transport: &'t dyn Transport,
    request: ClientRequest,
    response: ClientResponse,
}

impl<'t> Exchange<'t> {
    pub fn new(transport: &'t dyn Transport, request: ClientRequest, response: ClientResponse) -> Self {
        Self { transport, request, response }
    }

    pub fn transport(&self) -> &'t dyn Transport {
        self.transport
    }

    pub fn request(&self) -> &ClientRequest {
        &self.request
    }

    pub fn response(&self) -> &ClientResponse {
        &self.response
    }

    pub fn response_mut(&mut self) -> &mut ClientResponse {
        &mut self.response
    }

    /// Moves the request and response out, leaving defaults behind until
    /// [`replace`](Self::replace) puts a pair back.
    pub fn take(&mut self) -> (ClientRequest, ClientResponse) {
        (mem::take(&mut self.request), mem::take(&mut self.response))
    }

    pub fn replace(&mut self, request: ClientRequest, response: ClientResponse) {
        self.request = request;
        self.response = response;
    }

    pub fn into_parts(self) -> (ClientRequest, ClientResponse) {
        (self.request, self.response)
    }

    pub fn into_response(self) -> ClientResponse {
        self.response
    }
}

impl fmt::Debug for Exchange<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exchange")
            .field("transport", &self.transport.name())
            .field("request", &self.request)
            .field("response", &self.response)
            .finish()
    }
}

pub struct Interceptors {
    inner: Vec<Box<dyn Interceptor>>,
}

#[async_trait]
impl Interceptor for Interceptors {
    fn name(&self) -> &'static str {
        "interceptors"
    }

    async fn on_request(&self, req: &mut ClientRequest) {
        for interceptor in &self.inner {
            interceptor.on_request(req).await;
        }
    }

    async fn on_response(&self, exchange: &mut Exchange<'_>) -> Result<(), FetchError> {
        for interceptor in &self.inner {
            interceptor.on_response(exchange).await?;
        }
        Ok(())
    }
}

impl Interceptors {
    pub fn builder() -> InterceptorsBuilder {
        InterceptorsBuilder::new()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.inner.iter().map(|interceptor| interceptor.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for Interceptors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

pub struct InterceptorsBuilder {
    inner: Vec<Box<dyn Interceptor>>,
}

impl InterceptorsBuilder {
    fn new() -> Self {
        Self { inner: vec![] }
    }

    #[must_use]
    pub fn add_last<I: Interceptor + 'static>(mut self, interceptor: I) -> Self {
        self.inner.push(Box::new(interceptor));
        self
    }

    #[must_use]
    pub fn add_first<I: Interceptor + 'static>(mut self, interceptor: I) -> Self {
        self.inner.insert(0, Box::new(interceptor));
        self
    }

    pub fn build(self) -> Interceptors {
        Interceptors { inner: self.inner }
    }
}

impl fmt::Debug for InterceptorsBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.iter().map(|interceptor| interceptor.name())).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::HeaderName;
    use http::{HeaderValue, StatusCode, Uri};
    use micro_fetch_protocol::transport::InMemoryTransport;

    struct Tag(&'static str);

    #[async_trait]
    impl Interceptor for Tag {
        fn name(&self) -> &'static str {
            self.0
        }

        async fn on_request(&self, req: &mut ClientRequest) {
            append(req.headers_mut(), self.0);
        }

        async fn on_response(&self, exchange: &mut Exchange<'_>) -> Result<(), FetchError> {
            append(exchange.response_mut().headers_mut(), self.0);
            Ok(())
        }
    }

    fn append(headers: &mut http::HeaderMap, tag: &str) {
        let name = HeaderName::from_static("x-order");
        let current = headers.get(&name).and_then(|v| v.to_str().ok()).unwrap_or_default().to_string();
        headers.insert(name, HeaderValue::from_str(&format!("{current}{tag}")).unwrap());
    }

    #[tokio::test]
    async fn stages_run_in_order() {
        let interceptors = Interceptors::builder().add_last(Tag("b")).add_last(Tag("c")).add_first(Tag("a")).build();
        assert_eq!(interceptors.names(), vec!["a", "b", "c"]);

        let mut request = ClientRequest::get(Uri::from_static("http://a/"));
        interceptors.on_request(&mut request).await;
        assert_eq!(request.headers().get("x-order").unwrap(), "abc");

        let transport = InMemoryTransport::new();
        let mut exchange = Exchange::new(&transport, request, ClientResponse::new(StatusCode::OK));
        interceptors.on_response(&mut exchange).await.unwrap();
        assert_eq!(exchange.response().headers().get("x-order").unwrap(), "abc");
    }

    #[test]
    fn take_and_replace() {
        let transport = InMemoryTransport::new();
        let mut exchange = Exchange::new(
            &transport,
            ClientRequest::get(Uri::from_static("http://a/")),
            ClientResponse::new(StatusCode::FOUND),
        );

        let (request, _response) = exchange.take();
        assert_eq!(request.uri(), &Uri::from_static("http://a/"));

        exchange.replace(ClientRequest::get(Uri::from_static("http://b/")), ClientResponse::new(StatusCode::OK));
        assert_eq!(exchange.request().uri(), &Uri::from_static("http://b/"));
        assert_eq!(exchange.transport().name(), "memory");
        assert_eq!(exchange.into_response().status(), StatusCode::OK);
    }
}
