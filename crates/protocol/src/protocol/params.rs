//! Per-message parameter storage.
//!
//! Every [`ClientRequest`] and [`ClientResponse`](crate::protocol::ClientResponse) owns a
//! [`Params`] store which carries metadata alongside the message without touching its
//! headers or body. The store is keyed by type: each key is a small newtype defined in
//! this module, so lookups are checked at compile time instead of by string name.
//!
//! The keys used by the redirect machinery are:
//!
//! - [`ParentRequest`]: the request that preceded this one in a redirect chain
//! - [`RedirectCount`]: the number of hops taken so far
//! - [`EffectiveUrl`]: the URI that produced the terminal response
//! - [`RedirectHistory`]: every URI visited by the chain, root first
//! - [`DisableRedirects`]: opt a single request out of redirect following

use std::fmt;

use http::{Extensions, Uri};
use triomphe::Arc;

use crate::protocol::ClientRequest;

/// A type-keyed bag of values scoped to one message.
///
/// Cloning a message clones its store; two messages never share one.
#[derive(Debug, Clone, Default)]
pub struct Params {
    inner: Extensions,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, returning the previous value of the same type if any.
    pub fn insert<T: Clone + Send + Sync + 'static>(&mut self, value: T) -> Option<T> {
        self.inner.insert(value)
    }

    pub fn get<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.inner.get::<T>()
    }

    pub fn remove<T: Send + Sync + 'static>(&mut self) -> Option<T> {
        self.inner.remove::<T>()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Number of redirect hops recorded on this message, `0` when absent.
    #[inline]
    pub fn redirect_count(&self) -> u32 {
        self.get::<RedirectCount>().map_or(0, |count| count.0)
    }

    /// The request that preceded this one, `None` on a chain root.
    #[inline]
    pub fn parent_request(&self) -> Option<&ClientRequest> {
        self.get::<ParentRequest>().map(|parent| &*parent.0)
    }

    #[inline]
    pub fn effective_url(&self) -> Option<&Uri> {
        self.get::<EffectiveUrl>().map(|url| &url.0)
    }

    #[inline]
    pub fn redirect_history(&self) -> Option<&[Uri]> {
        self.get::<RedirectHistory>().map(|history| history.0.as_slice())
    }

    #[inline]
    pub fn redirects_disabled(&self) -> bool {
        self.get::<DisableRedirects>().is_some()
    }
}

/// Link from a redirect request to its predecessor.
///
/// The predecessor is an immutable snapshot held by a strong, non-weak pointer, so a
/// request can only ever point at requests created before it.
#[derive(Clone)]
pub struct ParentRequest(pub Arc<ClientRequest>);

impl fmt::Debug for ParentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ParentRequest").field(self.0.uri()).finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct RedirectCount(pub u32);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveUrl(pub Uri);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RedirectHistory(pub Vec<Uri>);

/// Marker: do not follow redirects for the request carrying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisableRedirects;
