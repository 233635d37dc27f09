use std::time::Duration;

use http::{StatusCode, Uri};
use micro_fetch::interceptor::DefaultHeaders;
use micro_fetch::{Client, FetchError, RedirectConfig};
use micro_fetch_protocol::protocol::{ClientRequest, ClientResponse};
use micro_fetch_protocol::transport::InMemoryTransport;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::DEBUG).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let transport = InMemoryTransport::new()
        .redirect("http://example.com/", StatusCode::MOVED_PERMANENTLY, "https://example.com/")
        .redirect("https://example.com/", StatusCode::FOUND, "https://www.example.com/")
        .route("https://www.example.com/", ClientResponse::new(StatusCode::OK).with_body("Hello World!\r\n"))
        .redirect("http://loop.example.com/", StatusCode::TEMPORARY_REDIRECT, "http://loop.example.com/");

    let client = match Client::builder()
        .transport(transport)
        .timeout(Duration::from_secs(5))
        .redirect(RedirectConfig::default().max_redirects(3))
        .interceptor(DefaultHeaders::user_agent())
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            error!(cause = %e, "failed to build client");
            return;
        }
    };

    match client.get(Uri::from_static("http://example.com/")).await {
        Ok(response) => info!(
            status = response.status().as_u16(),
            redirects = response.params().redirect_count(),
            effective_url = ?response.params().effective_url(),
            history = ?response.params().redirect_history(),
            "finished"
        ),
        Err(e) => error!(cause = %e, "request failed"),
    }

    let looping = ClientRequest::post(Uri::from_static("http://loop.example.com/"), "payload");
    match client.send(looping).await {
        Ok(response) => info!(status = response.status().as_u16(), "unexpectedly finished"),
        Err(FetchError::RedirectLimitExceeded(e)) => info!(url = %e.url, max = e.max_redirects, "loop stopped"),
        Err(e) => error!(cause = %e, "request failed"),
    }
}
