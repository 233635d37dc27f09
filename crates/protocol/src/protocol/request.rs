//! Outgoing HTTP request implementation.
//!
//! [`ClientRequest`] wraps a standard `http::Request` carrying a [`RequestBody`] and adds
//! the pieces a transport needs beyond the message itself: a per-hop timeout and a
//! [`Params`] store for pipeline metadata.
//!
//! Requests are cloned, never mutated, when a pipeline stage derives a follow-up
//! request, so a clone must be fully independent. The body is reference counted
//! `Bytes` and the parameter store is copied, which keeps cloning cheap.
//!
//! A redirect request owns its predecessor through [`ParentRequest`], so a long chain is
//! a long singly linked list. Dropping and formatting a request therefore never recurse
//! into the parent.

use std::fmt;
use std::mem;
use std::time::Duration;

use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Method, Request, Uri, Version};

use triomphe::Arc;

use crate::protocol::{ParentRequest, Params, RequestBody};

#[derive(Clone, Default)]
pub struct ClientRequest {
    inner: Request<RequestBody>,
    timeout: Option<Duration>,
    params: Params,
}

impl AsRef<Request<RequestBody>> for ClientRequest {
    fn as_ref(&self) -> &Request<RequestBody> {
        &self.inner
    }
}

impl AsMut<Request<RequestBody>> for ClientRequest {
    fn as_mut(&mut self) -> &mut Request<RequestBody> {
        &mut self.inner
    }
}

impl ClientRequest {
    /// Creates a bodyless HTTP/1.1 request.
    pub fn new(method: Method, uri: Uri) -> Self {
        let mut inner = Request::new(RequestBody::empty());
        *inner.method_mut() = method;
        *inner.uri_mut() = uri;
        Self { inner, timeout: None, params: Params::new() }
    }

    pub fn get(uri: Uri) -> Self {
        Self::new(Method::GET, uri)
    }

    pub fn post<B: Into<RequestBody>>(uri: Uri, body: B) -> Self {
        Self::new(Method::POST, uri).with_body(body)
    }

    /// Sets a header, replacing any previous values under the same name.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.inner.headers_mut().insert(name, value);
        self
    }

    #[must_use]
    pub fn with_body<B: Into<RequestBody>>(mut self, body: B) -> Self {
        *self.inner.body_mut() = body.into();
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: Version) -> Self {
        *self.inner.version_mut() = version;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Consumes the request and returns the inner `Request<RequestBody>`.
    ///
    /// The timeout and parameter store are dropped.
    pub fn into_inner(mut self) -> Request<RequestBody> {
        mem::take(&mut self.inner)
    }

    pub fn method(&self) -> &Method {
        self.inner.method()
    }

    pub fn set_method(&mut self, method: Method) {
        *self.inner.method_mut() = method;
    }

    pub fn uri(&self) -> &Uri {
        self.inner.uri()
    }

    pub fn set_uri(&mut self, uri: Uri) {
        *self.inner.uri_mut() = uri;
    }

    pub fn version(&self) -> Version {
        self.inner.version()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        self.inner.headers_mut()
    }

    pub fn body(&self) -> &RequestBody {
        self.inner.body()
    }

    pub fn body_mut(&mut self) -> &mut RequestBody {
        self.inner.body_mut()
    }

    /// The timeout a transport must enforce for this single exchange.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut Params {
        &mut self.params
    }
}

/// Unlinks the parent chain one request at a time while this is its only owner.
impl Drop for ClientRequest {
    fn drop(&mut self) {
        let mut next = self.params.remove::<ParentRequest>();
        while let Some(ParentRequest(parent)) = next {
            next = match Arc::try_unwrap(parent) {
                Ok(mut request) => request.params.remove::<ParentRequest>(),
                Err(_shared) => None,
            };
        }
    }
}

impl fmt::Debug for ClientRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientRequest")
            .field("method", self.method())
            .field("uri", self.uri())
            .field("version", &self.version())
            .field("headers", self.headers())
            .field("body", self.body())
            .field("timeout", &self.timeout)
            .field("redirect_count", &self.params.redirect_count())
            .field("parent", &self.params.parent_request().map(ClientRequest::uri))
            .finish()
    }
}

/// Converts a plain `http::Request` into a root request with an empty parameter store.
impl From<Request<RequestBody>> for ClientRequest {
    #[inline]
    fn from(inner: Request<RequestBody>) -> Self {
        Self { inner, timeout: None, params: Params::new() }
    }
}
