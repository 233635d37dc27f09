use std::io;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single transport exchange.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("connection error: {reason}")]
    Connect { reason: String },

    #[error("protocol error: {reason}")]
    Protocol { reason: String },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl TransportError {
    pub fn timeout(timeout: Duration) -> Self {
        Self::Timeout { timeout }
    }

    pub fn connect<S: ToString>(str: S) -> Self {
        Self::Connect { reason: str.to_string() }
    }

    pub fn protocol<S: ToString>(str: S) -> Self {
        Self::Protocol { reason: str.to_string() }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }

    /// True for an expired per-hop timeout, including an I/O error of kind `TimedOut`.
    #[inline]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Io { source } => source.kind() == io::ErrorKind::TimedOut,
            Self::Connect { .. } | Self::Protocol { .. } => false,
        }
    }
}
