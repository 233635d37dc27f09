//! Incoming HTTP response implementation.
//!
//! [`ClientResponse`] wraps `http::Response<Bytes>` together with a [`Params`] store. The
//! redirect stage stamps the terminal response of a chain through that store.
//!
//! A transport may carry the reason phrase the peer actually sent; without one the
//! canonical phrase of the status code is reported.

use bytes::Bytes;
use http::{HeaderMap, Response, StatusCode, Version};

use crate::protocol::Params;

#[derive(Debug, Clone, Default)]
pub struct ClientResponse {
    inner: Response<Bytes>,
    reason: Option<String>,
    params: Params,
}

impl AsRef<Response<Bytes>> for ClientResponse {
    fn as_ref(&self) -> &Response<Bytes> {
        &self.inner
    }
}

impl ClientResponse {
    pub fn new(status: StatusCode) -> Self {
        let mut inner = Response::new(Bytes::new());
        *inner.status_mut() = status;
        Self { inner, reason: None, params: Params::new() }
    }

    #[must_use]
    pub fn with_header(mut self, name: http::header::HeaderName, value: http::HeaderValue) -> Self {
        self.inner.headers_mut().insert(name, value);
        self
    }

    /// Sets a reason phrase that differs from the canonical one.
    #[must_use]
    pub fn with_reason<S: Into<String>>(mut self, reason: S) -> Self {
        self.reason = Some(reason.into());
        self
    }

    #[must_use]
    pub fn with_body<B: Into<Bytes>>(mut self, body: B) -> Self {
        *self.inner.body_mut() = body.into();
        self
    }

    pub fn into_inner(self) -> Response<Bytes> {
        self.inner
    }

    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    /// The reason phrase received with the status line, falling back to the canonical
    /// phrase of the status code.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref().or_else(|| self.inner.status().canonical_reason())
    }

    pub fn set_reason(&mut self, reason: Option<String>) {
        self.reason = reason;
    }

    pub fn version(&self) -> Version {
        self.inner.version()
    }

    pub fn set_version(&mut self, version: Version) {
        *self.inner.version_mut() = version;
    }

    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        self.inner.headers_mut()
    }

    pub fn body(&self) -> &Bytes {
        self.inner.body()
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut Params {
        &mut self.params
    }
}

impl From<Response<Bytes>> for ClientResponse {
    #[inline]
    fn from(inner: Response<Bytes>) -> Self {
        Self { inner, reason: None, params: Params::new() }
    }
}
