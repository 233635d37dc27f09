//! Client configuration.
//!
//! Configuration is passed in by the caller; nothing here discovers or loads files.
//! [`RedirectConfig`] deserializes with serde so it can be embedded in whatever settings
//! format the host application uses, with every missing field taking its default.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_REDIRECTS: u32 = 5;

/// Redirect following knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedirectConfig {
    /// Maximum number of hops to follow.
    pub max_redirects: u32,
    /// When set, only `303 See Other` downgrades the next request to a bodyless GET;
    /// `301` and `302` keep method and body like `307` and `308` do.
    pub strict: bool,
    /// Whether exceeding `max_redirects` is an error or a quiet stop at the last
    /// response seen.
    pub throw_exception: bool,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self { max_redirects: DEFAULT_MAX_REDIRECTS, strict: false, throw_exception: true }
    }
}

impl RedirectConfig {
    #[must_use]
    pub fn max_redirects(mut self, max_redirects: u32) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn throw_exception(mut self, throw_exception: bool) -> Self {
        self.throw_exception = throw_exception;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Per-hop timeout applied to requests that do not carry their own.
    pub timeout: Option<Duration>,
    pub redirect: RedirectConfig,
}
