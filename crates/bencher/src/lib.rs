use micro_fetch_protocol::protocol::ClientResponse;
use micro_fetch_protocol::transport::InMemoryTransport;

#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    group: TestGroup,
    hops: u32,
}

impl TestCase {
    pub fn new(name: &'static str, group: TestGroup, hops: u32) -> Self {
        Self { name, group, hops }
    }

    pub fn short(name: &'static str, hops: u32) -> Self {
        Self::new(name, TestGroup::Short, hops)
    }

    pub fn long(name: &'static str, hops: u32) -> Self {
        Self::new(name, TestGroup::Long, hops)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> TestGroup {
        self.group
    }

    pub fn hops(&self) -> u32 {
        self.hops
    }

    /// URI of the first request of the chain.
    pub fn start(&self) -> String {
        hop_uri(0)
    }

    /// A transport answering `hops` redirects followed by a `200 OK`.
    pub fn transport(&self, status: http::StatusCode) -> InMemoryTransport {
        let transport = (0..self.hops).fold(InMemoryTransport::new().skip_recording(), |transport, hop| {
            transport.redirect(hop_uri(hop), status, &hop_uri(hop + 1))
        });
        transport.route(hop_uri(self.hops), ClientResponse::new(http::StatusCode::OK))
    }
}

fn hop_uri(hop: u32) -> String {
    format!("http://hop{hop}.bench/")
}

#[derive(Clone, Copy, Debug)]
pub enum TestGroup {
    Short,
    Long,
}
