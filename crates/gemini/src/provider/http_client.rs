use std::time::Duration;

use reqwest::{Client, header};

pub(super) fn default_http_client_builder(timeout: Duration) -> reqwest::ClientBuilder {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::CONNECTION, header::HeaderValue::from_static("keep-alive"));

    Client::builder()
        .timeout(timeout)
        // Hyper has no TTL on pooled connections. A short idle timeout is what lets us
        // pick up DNS changes.
        .pool_idle_timeout(Some(Duration::from_secs(5)))
        .tcp_nodelay(true)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .default_headers(headers)
}
