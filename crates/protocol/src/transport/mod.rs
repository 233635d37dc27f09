//! The transport contract.
//!
//! A [`Transport`] wraps one concrete HTTP client library. It sends exactly one prepared
//! request and returns exactly one response; redirects, retries and annotation all live
//! above it in the pipeline.

use async_trait::async_trait;

use crate::protocol::{ClientRequest, ClientResponse, TransportError};

mod memory;
pub use memory::InMemoryTransport;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Identifier of the backend, reported in pipeline errors.
    fn name(&self) -> &'static str;

    /// Sends `request` and waits for the complete response.
    ///
    /// Implementations must enforce [`ClientRequest::timeout`] for this exchange and
    /// speak the protocol version the request asks for.
    async fn send(&self, request: &ClientRequest) -> Result<ClientResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn send(&self, request: &ClientRequest) -> Result<ClientResponse, TransportError> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn send(&self, request: &ClientRequest) -> Result<ClientResponse, TransportError> {
        (**self).send(request).await
    }
}
