use micro_fetch_protocol::protocol::ClientRequest;

use crate::error::RedirectLimitExceeded;
use crate::redirect::chain;

/// Outcome of a hop-limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Continue,
    Exceeded(RedirectLimitExceeded),
}

/// Caps the number of hops a chain may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedirectGuard {
    max_redirects: u32,
}

impl RedirectGuard {
    pub fn new(max_redirects: u32) -> Self {
        Self { max_redirects }
    }

    pub fn max_redirects(&self) -> u32 {
        self.max_redirects
    }

    /// Decides whether `request` may be followed by one more hop.
    ///
    /// The exceeded payload names the root of the chain, never the current hop.
    pub fn check_limit(&self, request: &ClientRequest, transport: &'static str) -> GuardDecision {
        let next_count = request.params().redirect_count().saturating_add(1);
        if next_count > self.max_redirects {
            return GuardDecision::Exceeded(RedirectLimitExceeded {
                url: chain::root_request(request).uri().clone(),
                max_redirects: self.max_redirects,
                transport,
            });
        }
        GuardDecision::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Uri;
    use micro_fetch_protocol::protocol::{ParentRequest, RedirectCount};
    use triomphe::Arc;

    fn hop(count: u32) -> ClientRequest {
        let root = ClientRequest::get(Uri::from_static("http://a/"));
        let mut request = ClientRequest::get(Uri::from_static("http://c/"));
        request.params_mut().insert(RedirectCount(count));
        request.params_mut().insert(ParentRequest(Arc::new(root)));
        request
    }

    #[test]
    fn continue_below_cap() {
        let guard = RedirectGuard::new(2);
        assert_eq!(guard.check_limit(&ClientRequest::get(Uri::from_static("http://a/")), "memory"), GuardDecision::Continue);
        assert_eq!(guard.check_limit(&hop(1), "memory"), GuardDecision::Continue);
    }

    #[test]
    fn exceeded_at_cap_reports_root() {
        let guard = RedirectGuard::new(2);
        let decision = guard.check_limit(&hop(2), "memory");

        assert_eq!(
            decision,
            GuardDecision::Exceeded(RedirectLimitExceeded {
                url: Uri::from_static("http://a/"),
                max_redirects: 2,
                transport: "memory",
            })
        );
    }

    #[test]
    fn zero_cap_refuses_first_hop() {
        let guard = RedirectGuard::new(0);
        let root = ClientRequest::get(Uri::from_static("http://a/"));

        assert!(matches!(guard.check_limit(&root, "memory"), GuardDecision::Exceeded(_)));
    }
}
