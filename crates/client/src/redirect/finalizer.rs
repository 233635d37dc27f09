use micro_fetch_protocol::protocol::{ClientRequest, ClientResponse, EffectiveUrl, RedirectCount, RedirectHistory};

use crate::redirect::chain;

/// Stamps the terminal `response` with the provenance of the chain ending at `request`.
///
/// Must run exactly once, on the pair that is handed back to the caller.
pub fn finalize(request: &ClientRequest, response: &mut ClientResponse) {
    let params = response.params_mut();
    params.insert(RedirectCount(request.params().redirect_count()));
    params.insert(EffectiveUrl(request.uri().clone()));
    params.insert(RedirectHistory(chain::history(request)));
}
