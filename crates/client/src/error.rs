use http::Uri;
use micro_fetch_protocol::protocol::TransportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport `{transport}` failed to send {url}: {source}")]
    Transport {
        url: Uri,
        transport: &'static str,
        #[source]
        source: TransportError,
    },

    #[error(transparent)]
    RedirectLimitExceeded(#[from] RedirectLimitExceeded),
}

impl FetchError {
    pub fn transport(url: Uri, transport: &'static str, source: TransportError) -> Self {
        Self::Transport { url, transport, source }
    }

    /// The URL that triggered the failure.
    ///
    /// For a redirect limit this is the root of the chain, not the last hop.
    pub fn url(&self) -> &Uri {
        match self {
            Self::Transport { url, .. } => url,
            Self::RedirectLimitExceeded(exceeded) => &exceeded.url,
        }
    }

    pub fn transport_name(&self) -> &'static str {
        match self {
            Self::Transport { transport, .. } => transport,
            Self::RedirectLimitExceeded(exceeded) => exceeded.transport,
        }
    }
}

/// A redirect chain needed more hops than allowed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("will not follow more than {max_redirects} redirects for {url} (transport `{transport}`)")]
pub struct RedirectLimitExceeded {
    pub url: Uri,
    pub max_redirects: u32,
    pub transport: &'static str,
}
