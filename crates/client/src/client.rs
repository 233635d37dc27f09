use std::fmt;
use std::time::Duration;

use http::Uri;
use micro_fetch_protocol::protocol::{ClientRequest, ClientResponse};
use micro_fetch_protocol::transport::Transport;
use thiserror::Error;
use tracing::{error, trace};

use crate::config::{ClientConfig, RedirectConfig};
use crate::error::FetchError;
use crate::interceptor::{Exchange, Interceptor, Interceptors, InterceptorsBuilder};
use crate::redirect::RedirectFollower;

pub struct ClientBuilder {
    transport: Option<Box<dyn Transport>>,
    config: ClientConfig,
    interceptors: InterceptorsBuilder,
}

impl ClientBuilder {
    fn new() -> Self {
        Self { transport: None, config: ClientConfig::default(), interceptors: Interceptors::builder() }
    }

    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn redirect(mut self, redirect: RedirectConfig) -> Self {
        self.config.redirect = redirect;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Appends a stage; stages run after redirect following, in the order added.
    pub fn interceptor<I: Interceptor + 'static>(mut self, interceptor: I) -> Self {
        self.interceptors = self.interceptors.add_last(interceptor);
        self
    }

    pub fn build(self) -> Result<Client, ClientBuildError> {
        let transport = self.transport.ok_or(ClientBuildError::MissingTransport)?;
        let interceptors = self.interceptors.add_first(RedirectFollower::new(self.config.redirect)).build();
        Ok(Client { transport, interceptors, config: self.config })
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("transport", &self.transport.as_ref().map(|transport| transport.name()))
            .field("config", &self.config)
            .field("interceptors", &self.interceptors)
            .finish()
    }
}

#[derive(Error, Debug)]
pub enum ClientBuildError {
    #[error("transport must be set")]
    MissingTransport,
}

/// Sends requests through a transport and the configured stages.
///
/// A `Client` holds no per-call state and can be shared between tasks.
pub struct Client {
    transport: Box<dyn Transport>,
    interceptors: Interceptors,
    config: ClientConfig,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn interceptors(&self) -> &Interceptors {
        &self.interceptors
    }

    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    pub async fn get(&self, uri: Uri) -> Result<ClientResponse, FetchError> {
        self.send(ClientRequest::get(uri)).await
    }

    /// Sends `request` and returns the terminal response of its redirect chain.
    ///
    /// The response carries the hop count and effective URL in its parameters.
    pub async fn send(&self, mut request: ClientRequest) -> Result<ClientResponse, FetchError> {
        if request.timeout().is_none() {
            request.set_timeout(self.config.timeout);
        }

        self.interceptors.on_request(&mut request).await;

        let transport: &dyn Transport = &*self.transport;
        let response = send_once(transport, &request).await?;

        let mut exchange = Exchange::new(transport, request, response);
        self.interceptors.on_response(&mut exchange).await?;
        Ok(exchange.into_response())
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("transport", &self.transport.name())
            .field("interceptors", &self.interceptors)
            .field("config", &self.config)
            .finish()
    }
}

/// One transport round trip, with failures tagged by URL and transport name.
pub(crate) async fn send_once(transport: &dyn Transport, request: &ClientRequest) -> Result<ClientResponse, FetchError> {
    trace!(method = %request.method(), uri = %request.uri(), transport = transport.name(), "sending request");

    transport.send(request).await.map_err(|e| {
        error!(cause = %e, uri = %request.uri(), transport = transport.name(), "transport failed");
        FetchError::transport(request.uri().clone(), transport.name(), e)
    })
}
