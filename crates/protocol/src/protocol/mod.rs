//! Client-side HTTP message abstractions.
//!
//! This module provides the message types shared by every transport backend and by
//! every pipeline stage:
//!
//! - **Requests** ([`request`]): [`ClientRequest`], an outgoing request with a timeout
//!   and a parameter store
//! - **Responses** ([`response`]): [`ClientResponse`], a fully buffered response
//! - **Bodies** ([`body`]): [`RequestBody`] and [`FilePart`]
//! - **Parameters** ([`params`]): [`Params`] and its typed keys
//! - **Errors** ([`error`]): [`TransportError`]
//!
//! Transports only see these types, which is what lets divergent HTTP libraries sit
//! behind one contract.

mod body;
pub use body::FilePart;
pub use body::RequestBody;

mod params;
pub use params::DisableRedirects;
pub use params::EffectiveUrl;
pub use params::ParentRequest;
pub use params::Params;
pub use params::RedirectCount;
pub use params::RedirectHistory;

mod request;
pub use request::ClientRequest;

mod response;
pub use response::ClientResponse;

mod error;
pub use error::TransportError;
