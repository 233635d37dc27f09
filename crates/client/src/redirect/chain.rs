//! Navigation of a redirect chain through its parent links.

use http::Uri;
use micro_fetch_protocol::protocol::ClientRequest;

/// Iterator from a request back to the root of its chain, the request itself first.
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    next: Option<&'a ClientRequest>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a ClientRequest;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.params().parent_request();
        Some(current)
    }
}

pub fn ancestors(request: &ClientRequest) -> Ancestors<'_> {
    Ancestors { next: Some(request) }
}

/// The first request of the chain `request` belongs to.
pub fn root_request(request: &ClientRequest) -> &ClientRequest {
    let mut current = request;
    while let Some(parent) = current.params().parent_request() {
        current = parent;
    }
    current
}

/// Every URI visited up to and including `request`, root first.
pub fn history(request: &ClientRequest) -> Vec<Uri> {
    let mut uris: Vec<Uri> = ancestors(request).map(|hop| hop.uri().clone()).collect();
    uris.reverse();
    uris
}

#[cfg(test)]
mod tests {
    use super::*;
    use micro_fetch_protocol::protocol::{ParentRequest, RedirectCount};
    use triomphe::Arc;

    fn link(parent: ClientRequest, uri: Uri) -> ClientRequest {
        let mut next = ClientRequest::get(uri);
        next.params_mut().insert(RedirectCount(parent.params().redirect_count() + 1));
        next.params_mut().insert(ParentRequest(Arc::new(parent)));
        next
    }

    fn chain(depth: usize) -> ClientRequest {
        let mut request = ClientRequest::get(Uri::from_static("http://root/"));
        for hop in 1..=depth {
            request = link(request, format!("http://hop{hop}/").parse().unwrap());
        }
        request
    }

    #[test]
    fn root_of_root_is_itself() {
        let root = ClientRequest::get(Uri::from_static("http://root/"));
        assert!(std::ptr::eq(root_request(&root), &root));
    }

    #[test]
    fn root_is_the_original_object() {
        let root = Arc::new(ClientRequest::get(Uri::from_static("http://root/")));
        let mut request = ClientRequest::get(Uri::from_static("http://hop1/"));
        request.params_mut().insert(ParentRequest(Arc::clone(&root)));
        let request = link(request, Uri::from_static("http://hop2/"));

        assert!(std::ptr::eq(root_request(&request), &*root));
    }

    #[test]
    fn root_at_any_depth() {
        for depth in [0, 1, 2, 10, 50] {
            let request = chain(depth);
            assert_eq!(root_request(&request).uri(), &Uri::from_static("http://root/"), "depth {depth}");
            assert_eq!(ancestors(&request).count(), depth + 1);
        }
    }

    #[test]
    fn history_is_root_first() {
        let request = chain(2);
        assert_eq!(
            history(&request),
            vec![Uri::from_static("http://root/"), Uri::from_static("http://hop1/"), Uri::from_static("http://hop2/")]
        );
    }

    #[test]
    fn ancestors_counts_decrease() {
        let request = chain(3);
        let counts: Vec<u32> = ancestors(&request).map(|hop| hop.params().redirect_count()).collect();
        assert_eq!(counts, vec![3, 2, 1, 0]);
    }
}
