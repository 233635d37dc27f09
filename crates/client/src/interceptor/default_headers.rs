//! Headers added to every root request that does not already carry them.

use async_trait::async_trait;
use http::header::{HeaderName, HeaderValue, USER_AGENT};
use http::HeaderMap;
use micro_fetch_protocol::protocol::ClientRequest;
use tracing::trace;

use crate::interceptor::Interceptor;

#[derive(Debug, Clone, Default)]
pub struct DefaultHeaders {
    headers: HeaderMap,
}

impl DefaultHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// `User-Agent: micro-fetch/<version>`.
    pub fn user_agent() -> Self {
        Self::new().header(USER_AGENT, HeaderValue::from_static(concat!("micro-fetch/", env!("CARGO_PKG_VERSION"))))
    }

    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

#[async_trait]
impl Interceptor for DefaultHeaders {
    fn name(&self) -> &'static str {
        "default-headers"
    }

    async fn on_request(&self, req: &mut ClientRequest) {
        for (name, value) in &self.headers {
            if !req.headers().contains_key(name) {
                trace!(header = %name, "adding default header");
                req.headers_mut().insert(name.clone(), value.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Uri;
    use http::header::ACCEPT;

    #[tokio::test]
    async fn fills_missing_headers_only() {
        let defaults = DefaultHeaders::user_agent().header(ACCEPT, HeaderValue::from_static("*/*"));
        let mut request = ClientRequest::get(Uri::from_static("http://a/"))
            .with_header(USER_AGENT, HeaderValue::from_static("custom/1.0"));

        defaults.on_request(&mut request).await;

        assert_eq!(request.headers().get(USER_AGENT).unwrap(), "custom/1.0");
        assert_eq!(request.headers().get(ACCEPT).unwrap(), "*/*");
    }

    #[tokio::test]
    async fn user_agent_names_the_crate() {
        let mut request = ClientRequest::get(Uri::from_static("http://a/"));
        DefaultHeaders::user_agent().on_request(&mut request).await;

        let agent = request.headers().get(USER_AGENT).unwrap().to_str().unwrap();
        assert!(agent.starts_with("micro-fetch/"));
    }
}
