//! Redirect detection and next-request derivation.
//!
//! [`RedirectPolicy`] performs no I/O. It looks at a response to decide whether it asks
//! for a redirect, and derives the follow-up request from the one that produced it:
//!
//! - `303 See Other` always turns the next request into a bodyless GET
//! - `300`, `301` and `302` do the same unless the policy is strict
//! - every other redirect keeps method and body untouched
//!
//! The `Location` value is used literally as the next URI; relative references are not
//! resolved against the previous request.

use http::header::{CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
use http::{Method, StatusCode, Uri};
use micro_fetch_protocol::protocol::{ClientRequest, ClientResponse, ParentRequest, RedirectCount};
use triomphe::Arc;

/// Where a redirect response points, and with which status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    pub status: StatusCode,
    pub location: Uri,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedirectPolicy {
    strict: bool,
}

impl RedirectPolicy {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// True iff the status is in `[300, 400)` and a usable `Location` header is present.
    ///
    /// A `Location` that is not valid UTF-8 or does not parse as a URI reference makes the
    /// response a malformed redirect: it is not followed and is handed back as is, just
    /// like a 3xx without `Location`.
    #[inline]
    pub fn is_redirect(&self, response: &ClientResponse) -> bool {
        self.evaluate(response).is_some()
    }

    /// Extracts the redirect target, or `None` if the response must be returned as is.
    ///
    /// `None` covers non-3xx statuses, a missing `Location` and a `Location` that cannot
    /// be read as a URI.
    pub fn evaluate(&self, response: &ClientResponse) -> Option<RedirectTarget> {
        let status = response.status();
        if !status.is_redirection() {
            return None;
        }

        let location = response.headers().get(LOCATION)?.to_str().ok()?.parse::<Uri>().ok()?;
        Some(RedirectTarget { status, location })
    }

    /// Whether a redirect with `status` turns the next request into a bodyless GET.
    #[inline]
    pub fn downgrades_to_get(&self, status: StatusCode) -> bool {
        status == StatusCode::SEE_OTHER || (status.as_u16() <= 302 && !self.strict)
    }

    /// Derives the request for the next hop.
    ///
    /// `original` is moved into the new request as its parent; the new request starts
    /// as a full clone of it and is then rewritten for `target`.
    pub fn build_next_request(&self, original: Arc<ClientRequest>, target: &RedirectTarget) -> ClientRequest {
        let mut next = ClientRequest::clone(&original);

        if self.downgrades_to_get(target.status) {
            next.set_method(Method::GET);
            next.headers_mut().remove(CONTENT_TYPE);
            next.headers_mut().remove(CONTENT_LENGTH);
            next.body_mut().clear();
        }

        next.set_uri(target.location.clone());

        let count = original.params().redirect_count().saturating_add(1);
        next.params_mut().insert(RedirectCount(count));
        next.params_mut().insert(ParentRequest(original));
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use micro_fetch_protocol::protocol::RequestBody;

    fn redirect(status: u16, location: &'static str) -> ClientResponse {
        ClientResponse::new(StatusCode::from_u16(status).unwrap())
            .with_header(LOCATION, HeaderValue::from_static(location))
    }

    fn post_with_body() -> ClientRequest {
        ClientRequest::post(Uri::from_static("http://a/"), "x")
            .with_header(CONTENT_TYPE, HeaderValue::from_static("text/plain"))
            .with_header(CONTENT_LENGTH, HeaderValue::from_static("1"))
    }

    fn next_for(policy: RedirectPolicy, original: ClientRequest, status: u16) -> ClientRequest {
        let target = policy.evaluate(&redirect(status, "http://b/")).unwrap();
        policy.build_next_request(Arc::new(original), &target)
    }

    #[test]
    fn redirect_requires_3xx_and_location() {
        let policy = RedirectPolicy::default();

        for status in [300, 301, 302, 303, 304, 305, 307, 308, 399] {
            assert!(policy.is_redirect(&redirect(status, "http://b/")), "status {status}");
        }

        for status in [200, 201, 299, 400, 404, 500] {
            assert!(!policy.is_redirect(&redirect(status, "http://b/")), "status {status}");
        }

        assert!(!policy.is_redirect(&ClientResponse::new(StatusCode::MOVED_PERMANENTLY)));
    }

    #[test]
    fn location_is_taken_literally() {
        let policy = RedirectPolicy::default();
        let target = policy.evaluate(&redirect(302, "/relative/path?q=1")).unwrap();

        assert_eq!(target.location, Uri::from_static("/relative/path?q=1"));
        assert_eq!(target.location.host(), None);
    }

    #[test]
    fn unparsable_location_is_not_a_redirect() {
        let response = ClientResponse::new(StatusCode::FOUND).with_header(LOCATION, HeaderValue::from_static("http://[bad"));
        assert!(!RedirectPolicy::default().is_redirect(&response));
    }

    #[test]
    fn unparsable_location_is_returned_by_evaluate_as_none() {
        let response = ClientResponse::new(StatusCode::MOVED_PERMANENTLY)
            .with_header(LOCATION, HeaderValue::from_bytes(b"http://b/\xff").unwrap());
        assert!(RedirectPolicy::default().evaluate(&response).is_none());
    }

    #[test]
    fn long_derived_chain_drops_cleanly() {
        let policy = RedirectPolicy::default();
        let target = policy.evaluate(&redirect(302, "http://loop/")).unwrap();

        let mut request = ClientRequest::get(Uri::from_static("http://loop/"));
        for _ in 0..200_000 {
            request = policy.build_next_request(Arc::new(request), &target);
        }

        assert_eq!(request.params().redirect_count(), 200_000);
        drop(request);
    }

    #[test]
    fn get_after_301() {
        let root = ClientRequest::get(Uri::from_static("http://a/"));
        let next = next_for(RedirectPolicy::default(), root, 301);

        assert_eq!(next.method(), &Method::GET);
        assert!(next.body().is_empty());
        assert_eq!(next.uri(), &Uri::from_static("http://b/"));
        assert_eq!(next.params().redirect_count(), 1);
        assert_eq!(next.params().parent_request().unwrap().uri(), &Uri::from_static("http://a/"));
    }

    #[test]
    fn see_other_downgrades_in_both_modes() {
        for strict in [false, true] {
            let next = next_for(RedirectPolicy::new(strict), post_with_body(), 303);

            assert_eq!(next.method(), &Method::GET);
            assert!(next.body().is_empty());
            assert!(next.headers().get(CONTENT_TYPE).is_none());
            assert!(next.headers().get(CONTENT_LENGTH).is_none());
        }
    }

    #[test]
    fn found_downgrades_only_when_lenient() {
        let lenient = next_for(RedirectPolicy::new(false), post_with_body(), 302);
        assert_eq!(lenient.method(), &Method::GET);
        assert!(lenient.body().is_empty());
        assert!(lenient.headers().get(CONTENT_TYPE).is_none());

        let strict = next_for(RedirectPolicy::new(true), post_with_body(), 302);
        assert_eq!(strict.method(), &Method::POST);
        assert_eq!(strict.body(), &RequestBody::bytes("x"));
        assert_eq!(strict.headers().get(CONTENT_TYPE), Some(&HeaderValue::from_static("text/plain")));
    }

    #[test]
    fn temporary_and_permanent_redirects_preserve_method_and_body() {
        for strict in [false, true] {
            for status in [307, 308] {
                let original = post_with_body();
                let next = next_for(RedirectPolicy::new(strict), original.clone(), status);

                assert_eq!(next.method(), original.method());
                assert_eq!(next.body(), original.body());
                assert_eq!(next.headers().get(CONTENT_LENGTH), original.headers().get(CONTENT_LENGTH));
                assert_eq!(next.uri(), &Uri::from_static("http://b/"));
            }
        }
    }

    #[test]
    fn count_increments_from_parent() {
        let policy = RedirectPolicy::default();
        let mut request = ClientRequest::get(Uri::from_static("http://a/"));

        for expected in 1..=4 {
            let target = policy.evaluate(&redirect(302, "http://b/")).unwrap();
            request = policy.build_next_request(Arc::new(request), &target);
            assert_eq!(request.params().redirect_count(), expected);
        }
    }

    #[test]
    fn original_is_left_untouched() {
        let original = Arc::new(post_with_body());
        let target = RedirectPolicy::default().evaluate(&redirect(303, "http://b/")).unwrap();

        let _next = RedirectPolicy::default().build_next_request(Arc::clone(&original), &target);

        assert_eq!(original.method(), &Method::POST);
        assert_eq!(original.body(), &RequestBody::bytes("x"));
        assert_eq!(original.params().redirect_count(), 0);
        assert!(original.params().parent_request().is_none());
    }
}
