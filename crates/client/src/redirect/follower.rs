//! The hop loop.
//!
//! [`RedirectFollower`] takes over after the first transport send and keeps sending
//! until it holds a response that should be returned:
//!
//! 1. the response is not a redirect, or the request opted out: finalize, done
//! 2. the guard refuses another hop: fail, or finalize the current pair when the
//!    configuration asks for a quiet stop
//! 3. otherwise derive the next request, send it, and evaluate again
//!
//! Each hop completes before the next request is built, and all chain state lives in
//! the requests themselves, so concurrent sends never interact.

use async_trait::async_trait;
use micro_fetch_protocol::protocol::{ClientRequest, ClientResponse};
use micro_fetch_protocol::transport::Transport;
use tracing::{debug, warn};
use triomphe::Arc;

use crate::client::send_once;
use crate::config::RedirectConfig;
use crate::error::FetchError;
use crate::interceptor::{Exchange, Interceptor};
use crate::redirect::{GuardDecision, RedirectGuard, RedirectPolicy, finalize};

#[derive(Debug, Clone, Copy)]
pub struct RedirectFollower {
    policy: RedirectPolicy,
    guard: RedirectGuard,
    throw_exception: bool,
}

impl RedirectFollower {
    pub fn new(config: RedirectConfig) -> Self {
        Self {
            policy: RedirectPolicy::new(config.strict),
            guard: RedirectGuard::new(config.max_redirects),
            throw_exception: config.throw_exception,
        }
    }

    pub fn policy(&self) -> &RedirectPolicy {
        &self.policy
    }

    pub fn guard(&self) -> &RedirectGuard {
        &self.guard
    }

    /// Follows redirects starting from an already sent `request` and its `response`.
    ///
    /// Returns the terminal pair, with the response finalized.
    pub async fn follow(
        &self,
        transport: &dyn Transport,
        mut request: ClientRequest,
        mut response: ClientResponse,
    ) -> Result<(ClientRequest, ClientResponse), FetchError> {
        loop {
            if request.params().redirects_disabled() {
                break;
            }

            let Some(target) = self.policy.evaluate(&response) else {
                break;
            };

            match self.guard.check_limit(&request, transport.name()) {
                GuardDecision::Continue => {}
                GuardDecision::Exceeded(exceeded) if self.throw_exception => {
                    warn!(url = %exceeded.url, max_redirects = exceeded.max_redirects, "too many redirects");
                    return Err(exceeded.into());
                }
                GuardDecision::Exceeded(exceeded) => {
                    debug!(
                        url = %request.uri(),
                        max_redirects = exceeded.max_redirects,
                        "redirect limit reached, returning last response"
                    );
                    break;
                }
            }

            let next = self.policy.build_next_request(Arc::new(request), &target);
            debug!(
                hop = next.params().redirect_count(),
                status = target.status.as_u16(),
                method = %next.method(),
                location = %target.location,
                "following redirect"
            );

            response = send_once(transport, &next).await?;
            request = next;
        }

        finalize(&request, &mut response);
        Ok((request, response))
    }
}

impl Default for RedirectFollower {
    fn default() -> Self {
        Self::new(RedirectConfig::default())
    }
}

#[async_trait]
impl Interceptor for RedirectFollower {
    fn name(&self) -> &'static str {
        "redirect"
    }

    async fn on_response(&self, exchange: &mut Exchange<'_>) -> Result<(), FetchError> {
        let transport = exchange.transport();
        let (request, response) = exchange.take();
        let (request, response) = self.follow(transport, request, response).await?;
        exchange.replace(request, response);
        Ok(())
    }
}
